use crate::error::GistError;
use crate::host::{Dialogs, Message};
use std::error::Error as _;

pub const ERROR_TITLE: &str = "Gist Submission Error";

/// Where the current invocation runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Context {
    /// No host at all, e.g. library use or tests.
    #[default]
    Headless,
    /// Inside the host without an interactive UI.
    HostBatch,
    /// Inside the host with a user looking at dialogs.
    HostInteractive,
}

impl Context {
    pub fn is_interactive(self) -> bool {
        self == Context::HostInteractive
    }
}

/// Hands an error back to the caller, or shows it to the user and
/// swallows it when someone is at the UI.
pub struct ErrorReporter {
    context: Context,
}

impl ErrorReporter {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> Context {
        self.context
    }

    pub fn report(&self, err: GistError, dialogs: &mut dyn Dialogs) -> Result<(), GistError> {
        match err.source() {
            Some(cause) => tracing::error!(error = %err, cause = %cause, "gist submission failed"),
            None => tracing::error!(error = %err, "gist submission failed"),
        }

        match self.context {
            Context::Headless | Context::HostBatch => Err(err),
            Context::HostInteractive => {
                dialogs.display_message(&Message::error(ERROR_TITLE, &err.to_string()));
                Ok(())
            }
        }
    }
}
