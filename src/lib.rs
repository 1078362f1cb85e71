//! Publish code snippets from a host application's text fields as GitHub
//! gists.

pub mod commands;
pub mod config;
pub mod error;
pub mod gist;
pub mod heuristics;
pub mod host;
pub mod report;

pub use config::{Credentials, Settings};
pub use error::{GistError, Result};
pub use report::{Context, ErrorReporter};
