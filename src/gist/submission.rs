use crate::error::{GistError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// File types GitHub will highlight for snippets coming out of the host.
pub const VALID_EXTENSIONS: [&str; 5] = [".h", ".vfl", ".c", ".cl", ".py"];

/// Raw, unvalidated field values as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFields {
    pub filename: String,
    pub extension: String,
    pub description: String,
    pub body: String,
    pub visibility: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = GistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            _ => Err(GistError::validation(
                "Invalid visibility selection. Options are \"private\" \"public\" \
                 (without the quotes).",
            )),
        }
    }
}

/// A validated gist ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    extension: String,
    filename: String,
    description: String,
    body: String,
    visibility_label: String,
    visibility: Visibility,
}

impl Submission {
    /// Validates every field, in the order extension, filename,
    /// description, body, visibility. The first failure wins.
    pub fn new(fields: SnippetFields) -> Result<Self> {
        let extension = validate_extension(&fields.extension)?;
        let filename = validate_filename(&fields.filename, &extension)?;
        let description = normalize_description(&fields.description);
        let body = validate_body(fields.body)?;
        let visibility = fields.visibility.parse::<Visibility>()?;

        Ok(Self {
            extension,
            filename,
            description,
            body,
            visibility_label: fields.visibility,
            visibility,
        })
    }

    /// Dot-prefixed extension, e.g. `.py`.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Sanitized filename with the extension appended.
    pub fn composed_filename(&self) -> &str {
        &self.filename
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Visibility exactly as entered.
    pub fn visibility(&self) -> &str {
        &self.visibility_label
    }

    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }
}

fn validate_extension(extension: &str) -> Result<String> {
    let extension = if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    };

    if !VALID_EXTENSIONS.contains(&extension.as_str()) {
        return Err(GistError::Validation(format!(
            "Extension must be one of the following: {}",
            VALID_EXTENSIONS.join(" ")
        )));
    }
    Ok(extension)
}

fn reserved_filename() -> &'static Regex {
    static RESERVED: OnceLock<Regex> = OnceLock::new();
    // GitHub names unnamed files gistfile1, gistfile2, ...
    RESERVED.get_or_init(|| Regex::new(r"^gistfile(\d+|$)").expect("valid regex"))
}

fn validate_filename(name: &str, extension: &str) -> Result<String> {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.is_empty() {
        return Err(GistError::validation("Filename cannot be an empty string!"));
    }
    if reserved_filename().is_match(name.trim_start()) {
        return Err(GistError::validation(
            "Filename cannot be gistfile or gistfile followed by a number",
        ));
    }
    Ok(format!("{}{}", words.join("_"), extension))
}

/// Capitalize the first character and drop trailing periods.
fn normalize_description(description: &str) -> String {
    let mut chars = description.chars();
    match chars.next() {
        Some(first) => {
            let capitalized: String = first.to_uppercase().chain(chars).collect();
            capitalized.trim_end_matches('.').to_string()
        }
        None => String::new(),
    }
}

fn validate_body(body: String) -> Result<String> {
    if body.is_empty() {
        return Err(GistError::validation("Snippet cannot be empty!"));
    }
    Ok(body)
}
