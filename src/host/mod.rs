//! The pieces of the host application that snippet publishing touches:
//! a node, the text parameter holding the snippet, and modal dialogs.

pub mod terminal;

pub use terminal::{BatchDialogs, TerminalDialogs};

use std::collections::BTreeMap;

/// Parameter tag naming the language of a code editor field.
pub const EDITOR_LANG_TAG: &str = "editorlang";

/// A host type name split into its components, e.g.
/// `Sop/user::attribwrangle::2.0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeType {
    pub category: Option<String>,
    pub namespace: Option<String>,
    pub name: String,
    pub version: Option<String>,
}

impl NodeType {
    pub fn parse(full_name: &str) -> Self {
        let (category, rest) = match full_name.split_once('/') {
            Some((category, rest)) => (Some(category.to_string()), rest),
            None => (None, full_name),
        };

        let parts: Vec<&str> = rest.split("::").collect();
        let is_version = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.');
        let owned = |s: &str| Some(s.to_string());

        let (namespace, name, version) = match parts.as_slice() {
            [name] => (None, *name, None),
            [name, version] if is_version(*version) => (None, *name, owned(*version)),
            [namespace, name] => (owned(*namespace), *name, None),
            [namespace, name, version, ..] => (owned(*namespace), *name, owned(*version)),
            [] => (None, "", None),
        };

        Self {
            category,
            namespace,
            name: name.to_string(),
            version,
        }
    }

    /// The type name without namespace or version.
    pub fn base_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub node_type: NodeType,
}

impl Node {
    pub fn new(name: impl Into<String>, type_name: &str) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::parse(type_name),
        }
    }
}

/// A text parameter holding the snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetParm {
    pub node: Node,
    pub text: String,
    pub tags: BTreeMap<String, String>,
}

impl SnippetParm {
    pub fn new(node: Node, text: impl Into<String>) -> Self {
        Self {
            node,
            text: text.into(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    pub fn eval_as_string(&self) -> &str {
        &self.text
    }

    pub fn editor_lang(&self) -> Option<&str> {
        self.tags.get(EDITOR_LANG_TAG).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Message,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    pub text: String,
    pub severity: Severity,
    pub details_label: Option<String>,
    pub details: Option<String>,
    pub details_expanded: bool,
}

impl Message {
    pub fn info(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            severity: Severity::Message,
            details_label: None,
            details: None,
            details_expanded: false,
        }
    }

    pub fn error(title: &str, text: &str) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::info(title, text)
        }
    }

    pub fn with_details(mut self, label: &str, details: &str) -> Self {
        self.details_label = Some(label.to_string());
        self.details = Some(details.to_string());
        self.details_expanded = true;
        self
    }
}

/// A modal form of labelled text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiInputPrompt {
    pub title: String,
    pub message: String,
    pub labels: Vec<String>,
    pub initial_contents: Vec<String>,
    pub buttons: Vec<String>,
    pub default_choice: usize,
    pub close_choice: usize,
    pub help: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResponse {
    pub button: usize,
    pub values: Vec<String>,
}

/// Modal UI offered by the host.
pub trait Dialogs {
    fn read_multi_input(&mut self, prompt: &MultiInputPrompt) -> anyhow::Result<PromptResponse>;

    fn display_message(&mut self, message: &Message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_components() {
        let plain = NodeType::parse("attribwrangle");
        assert_eq!(plain.base_name(), "attribwrangle");
        assert_eq!(plain.category, None);

        let versioned = NodeType::parse("Sop/attribwrangle::2.0");
        assert_eq!(versioned.category.as_deref(), Some("Sop"));
        assert_eq!(versioned.base_name(), "attribwrangle");
        assert_eq!(versioned.version.as_deref(), Some("2.0"));

        let full = NodeType::parse("Sop/studio::pythonsnippet::1.2");
        assert_eq!(full.namespace.as_deref(), Some("studio"));
        assert_eq!(full.base_name(), "pythonsnippet");
        assert_eq!(full.version.as_deref(), Some("1.2"));

        let namespaced = NodeType::parse("studio::opencl");
        assert_eq!(namespaced.namespace.as_deref(), Some("studio"));
        assert_eq!(namespaced.base_name(), "opencl");
    }

    #[test]
    fn parm_reads_editor_lang() {
        let parm = SnippetParm::new(Node::new("wrangle1", "attribwrangle"), "@P.y = 0;")
            .with_tag(EDITOR_LANG_TAG, "vex");
        assert_eq!(parm.editor_lang(), Some("vex"));
        assert_eq!(parm.eval_as_string(), "@P.y = 0;");
    }
}
