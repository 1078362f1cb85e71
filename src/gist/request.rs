use crate::config::{Credentials, Settings};
use crate::error::{GistError, Result};
use crate::gist::submission::Submission;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const USERNAME_HEADER: &str = "X-Github-Username";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GistFile {
    pub content: String,
}

/// JSON body for `POST /gists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GistPayload {
    pub description: String,
    pub public: bool,
    pub files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistHeaders {
    pub username: String,
    pub content_type: String,
    pub authorization: String,
}

/// Everything needed to create one gist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistRequest {
    pub url: String,
    pub headers: GistHeaders,
    pub body: GistPayload,
}

impl GistRequest {
    pub fn build(settings: &Settings, credentials: &Credentials, gist: &Submission) -> Self {
        let mut files = BTreeMap::new();
        files.insert(
            gist.composed_filename().to_string(),
            GistFile {
                content: gist.body().to_string(),
            },
        );

        Self {
            url: settings.api_url.clone(),
            headers: GistHeaders {
                username: credentials.user.clone(),
                content_type: "application/json".to_string(),
                authorization: format!("token {}", credentials.token),
            },
            body: GistPayload {
                description: gist.description().to_string(),
                public: gist.is_public(),
                files,
            },
        }
    }

    pub fn json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }
}

/// Whatever came back, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct CreatedGist {
    id: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `id` of a created gist, if the body carries one.
    pub fn gist_id(&self) -> Option<String> {
        serde_json::from_str::<CreatedGist>(&self.body)
            .ok()
            .map(|created| created.id)
    }
}

/// Sends a built request. One attempt, no retries.
pub trait Transport {
    fn send(&self, request: &GistRequest) -> Result<RawResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gistsnip/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GistError::network)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &GistRequest) -> Result<RawResponse> {
        tracing::info!(url = %request.url, user = %request.headers.username, "posting gist");

        // `json` keeps a content type that is already set
        let response = self
            .client
            .post(&request.url)
            .header(USERNAME_HEADER, &request.headers.username)
            .header(CONTENT_TYPE, &request.headers.content_type)
            .header(AUTHORIZATION, &request.headers.authorization)
            .json(&request.body)
            .send()
            .map_err(GistError::network)?;

        // Any status comes back as a response
        let status = response.status().as_u16();
        let body = response.text().map_err(GistError::network)?;
        tracing::debug!(status, "gist api responded");
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gist::submission::SnippetFields;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn submission() -> Submission {
        Submission::new(SnippetFields {
            filename: "point jitter".to_string(),
            extension: "vfl".to_string(),
            description: "jitter points.".to_string(),
            body: "@P += rand(@ptnum);".to_string(),
            visibility: "private".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn builds_headers_and_body() {
        let creds = Credentials::new("octocat", "ghp_abc");
        let request = GistRequest::build(&Settings::default(), &creds, &submission());

        assert_eq!(request.url, "https://api.github.com/gists");
        assert_eq!(request.headers.username, "octocat");
        assert_eq!(request.headers.content_type, "application/json");
        assert_eq!(request.headers.authorization, "token ghp_abc");

        let body: serde_json::Value = serde_json::from_str(&request.json().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "description": "Jitter points",
                "public": false,
                "files": {"point_jitter.vfl": {"content": "@P += rand(@ptnum);"}}
            })
        );
    }

    #[test]
    fn response_status_and_id() {
        let created = RawResponse {
            status: 201,
            body: r#"{"id": "aa5a315d61ae9438b18d", "public": true}"#.to_string(),
        };
        assert!(created.ok());
        assert_eq!(created.gist_id().as_deref(), Some("aa5a315d61ae9438b18d"));

        let denied = RawResponse {
            status: 401,
            body: r#"{"message": "Bad credentials"}"#.to_string(),
        };
        assert!(!denied.ok());
        assert_eq!(denied.gist_id(), None);

        let garbage = RawResponse {
            status: 200,
            body: "<html>".to_string(),
        };
        assert!(garbage.ok());
        assert_eq!(garbage.gist_id(), None);
    }

    /// Read one HTTP request: headers, then `Content-Length` bytes of body.
    fn read_request(stream: &mut impl Read) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= end + 4 + length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&raw).to_string()
    }

    #[test]
    fn http_transport_sends_headers_and_body() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let reply = r#"{"id": "aa5a315d"}"#;
            write!(
                stream,
                "HTTP/1.1 201 Created\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.len(),
                reply
            )
            .unwrap();
            request
        });

        let settings = Settings {
            api_url: format!("http://{}/gists", addr),
            ..Settings::default()
        };
        let creds = Credentials::new("octocat", "ghp_abc");
        let request = GistRequest::build(&settings, &creds, &submission());

        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let transport = HttpTransport { client };
        let response = transport.send(&request).unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.gist_id().as_deref(), Some("aa5a315d"));

        let raw = server.join().unwrap();
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        let head = head.to_lowercase();
        assert!(head.starts_with("post /gists http/1.1"));
        assert!(head.contains("x-github-username: octocat"));
        assert!(head.contains("content-type: application/json"));
        assert!(head.contains("authorization: token ghp_abc"));

        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            body,
            json!({
                "description": "Jitter points",
                "public": false,
                "files": {"point_jitter.vfl": {"content": "@P += rand(@ptnum);"}}
            })
        );
    }
}
