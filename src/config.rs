use crate::error::{GistError, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const GIST_API: &str = "https://api.github.com/gists";
pub const GIST_URL: &str = "https://gist.github.com";
pub const TOKEN_FILENAME: &str = "gist_personal_access_token";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where requests go and where credentials come from.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub web_url: String,
    pub token_path: PathBuf,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: GIST_API.to_string(),
            web_url: GIST_URL.to_string(),
            token_path: default_token_path(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Link to the rendered gist for a user.
    pub fn viewer_url(&self, user: &str, id: &str) -> String {
        format!("{}/{}/{}", self.web_url.trim_end_matches('/'), user, id)
    }
}

fn default_token_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(TOKEN_FILENAME)
}

/// GitHub username and personal access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }

    /// Read `~/gist_personal_access_token`.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_token_path())
    }

    /// First line is the username, everything after it is the token.
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "reading credentials");

        // A missing file gets its own hint
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(GistError::Config(format!(
                    "Unable to locate personal access token at {}. \
                     Are you sure you created one?",
                    path.display()
                )));
            }
            Err(err) => {
                return Err(GistError::Config(format!(
                    "Unable to read personal access token at {}: {}",
                    path.display(),
                    err
                )));
            }
        };

        // Username on line one, token on the rest
        let (user, token) = match contents.split_once('\n') {
            Some((first, rest)) => (first.trim_end(), rest.trim()),
            None => (contents.trim_end(), ""),
        };

        if token.is_empty() {
            return Err(GistError::Config(
                "Token file is empty. Please make sure you copied and pasted \
                 the token string from GitHub!"
                    .to_string(),
            ));
        }

        Ok(Self::new(user, token))
    }

    /// Token with all but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        let keep = chars.len().saturating_sub(4);
        let tail: String = chars[keep..].iter().collect();
        format!("{}{}", "*".repeat(keep.min(8)), tail)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &self.masked_token())
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User: {} Token: {}", self.user, self.masked_token())
    }
}
