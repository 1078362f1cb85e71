use crate::config::{Credentials, Settings};
use crate::error::GistError;
use crate::gist::{GistRequest, SnippetFields, Submission, Transport};
use crate::heuristics::{guess_description, guess_filename, guess_filetype};
use crate::host::{Dialogs, Message, MultiInputPrompt, SnippetParm};
use crate::report::ErrorReporter;
use anyhow::Result;

pub const FIELD_LABELS: [&str; 4] = ["Filename", "File Type", "Description", "Visibility"];
const CANCEL: usize = 0;
const OK: usize = 1;

/// How a `create` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user closed the prompt.
    Cancelled,
    /// The gist exists at `url`.
    Created { url: String },
    /// GitHub answered, but did not create a gist.
    Rejected { status: u16 },
    /// An error was shown to the user and went no further.
    Aborted,
    /// Dry run: the JSON body that would have been posted.
    Previewed { json: String },
}

/// The prompt values, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFields {
    pub filename: String,
    pub file_type: String,
    pub description: String,
    pub visibility: String,
}

impl PromptFields {
    fn from_values(values: Vec<String>) -> Result<Self, GistError> {
        let count = values.len();
        let [filename, file_type, description, visibility]: [String; 4] =
            values.try_into().map_err(|_| {
                GistError::Validation(format!(
                    "Expected {} fields from the prompt, got {}",
                    FIELD_LABELS.len(),
                    count
                ))
            })?;

        Ok(Self {
            filename,
            file_type,
            description,
            visibility,
        })
    }

    fn into_snippet(self, body: &str) -> SnippetFields {
        SnippetFields {
            filename: self.filename,
            extension: self.file_type,
            description: self.description,
            body: body.to_string(),
            visibility: self.visibility,
        }
    }
}

/// Default prompt contents guessed from the parameter and its node.
pub fn initial_contents(parm: &SnippetParm) -> Vec<String> {
    let node = &parm.node;
    let base_name = node.node_type.base_name();
    vec![
        guess_filename(&node.name, base_name),
        guess_filetype(parm.editor_lang(), base_name),
        guess_description(parm.eval_as_string()),
        "public".to_string(),
    ]
}

pub struct CreateGist<'a> {
    pub settings: &'a Settings,
    pub transport: &'a dyn Transport,
    pub reporter: ErrorReporter,
    pub dry_run: bool,
}

impl CreateGist<'_> {
    /// Prompt for gist options, then post the parameter's snippet.
    pub fn run(&self, parm: &SnippetParm, dialogs: &mut dyn Dialogs) -> Result<Outcome> {
        let prompt = MultiInputPrompt {
            title: "Create Gist".to_string(),
            message: "Add Gist options".to_string(),
            labels: FIELD_LABELS.iter().map(|label| label.to_string()).collect(),
            initial_contents: initial_contents(parm),
            buttons: vec!["Cancel".to_string(), "OK".to_string()],
            default_choice: OK,
            close_choice: CANCEL,
            help: Some("Visibility options are \"public\" and \"private\"".to_string()),
        };

        // Ask the user, pre-filled with our guesses
        let response = dialogs.read_multi_input(&prompt)?;
        if response.button != OK {
            tracing::debug!("gist prompt cancelled");
            return Ok(Outcome::Cancelled);
        }

        // Validate fields and load credentials before touching the network
        let prepared = PromptFields::from_values(response.values)
            .and_then(|fields| Submission::new(fields.into_snippet(parm.eval_as_string())))
            .and_then(|gist| {
                let credentials = Credentials::load_from(&self.settings.token_path)?;
                Ok((credentials, gist))
            });
        let (credentials, gist) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => return self.abort(err, dialogs),
        };

        let request = GistRequest::build(self.settings, &credentials, &gist);
        if self.dry_run {
            return Ok(Outcome::Previewed {
                json: serde_json::to_string_pretty(&request.body)?,
            });
        }

        // Post it
        let response = match self.transport.send(&request) {
            Ok(response) => response,
            Err(err) => return self.abort(err, dialogs),
        };

        match (response.ok(), response.gist_id()) {
            (true, Some(id)) => {
                let url = self.settings.viewer_url(&credentials.user, &id);
                tracing::info!(url = %url, "created gist");
                dialogs.display_message(
                    &Message::info("Success!", "Created Gist. See link below.")
                        .with_details("Show Link", &url),
                );
                Ok(Outcome::Created { url })
            }
            _ => {
                tracing::warn!(
                    status = response.status,
                    body = %response.body,
                    "gist was not created"
                );
                dialogs.display_message(&Message::error("Fail", "Unable to create gist."));
                Ok(Outcome::Rejected {
                    status: response.status,
                })
            }
        }
    }

    fn abort(&self, err: GistError, dialogs: &mut dyn Dialogs) -> Result<Outcome> {
        self.reporter.report(err, dialogs)?;
        Ok(Outcome::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Node, EDITOR_LANG_TAG};

    #[test]
    fn defaults_come_from_the_node() {
        let parm = SnippetParm::new(
            Node::new("jitter_points", "Sop/attribwrangle::2.0"),
            "// jitter points\n@P += rand(@ptnum);",
        );
        assert_eq!(
            initial_contents(&parm),
            vec!["jitter_points", ".h", "jitter points", "public"]
        );
    }

    #[test]
    fn auto_named_node_leaves_filename_blank() {
        let parm = SnippetParm::new(Node::new("python1", "python"), "print('hi')")
            .with_tag(EDITOR_LANG_TAG, "python");
        assert_eq!(initial_contents(&parm), vec!["", ".py", "", "public"]);
    }

    #[test]
    fn prompt_values_map_by_name() {
        let fields = PromptFields::from_values(vec![
            "name".to_string(),
            "py".to_string(),
            "desc".to_string(),
            "private".to_string(),
        ])
        .unwrap();
        let snippet = fields.into_snippet("print(1)");
        assert_eq!(snippet.filename, "name");
        assert_eq!(snippet.extension, "py");
        assert_eq!(snippet.description, "desc");
        assert_eq!(snippet.body, "print(1)");
        assert_eq!(snippet.visibility, "private");
    }

    #[test]
    fn wrong_field_count_is_a_validation_error() {
        let err = PromptFields::from_values(vec!["only one".to_string()]).unwrap_err();
        assert!(matches!(err, GistError::Validation(_)));
    }
}
