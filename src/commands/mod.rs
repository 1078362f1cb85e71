pub mod create;
pub mod source;
pub mod whoami;

pub use create::{CreateGist, Outcome};
