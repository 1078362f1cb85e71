pub mod request;
pub mod submission;

pub use request::{GistPayload, GistRequest, HttpTransport, RawResponse, Transport};
pub use submission::{SnippetFields, Submission, Visibility, VALID_EXTENSIONS};
