//! Best-effort defaults for the gist prompt. Every guess falls back to an
//! empty string.

use regex::Regex;
use std::sync::OnceLock;

/// Editor language tag to file extension.
const LANGUAGE_EXTENSIONS: [(&str, &str); 3] = [("python", ".py"), ("vex", ".h"), ("opencl", ".cl")];

/// Substring of a node type name to file extension.
const TYPE_HINTS: [(&str, &str); 3] = [("wrangle", ".h"), ("python", ".py"), ("opencl", ".cl")];

const LINE_COMMENTS: [&str; 2] = ["//", "#"];

const BLOCK_COMMENTS: [(&str, &str); 3] = [("/*", "*/"), ("'''", "'''"), ("\"\"\"", "\"\"\"")];

fn line_breaks() -> &'static Regex {
    static LINE_BREAKS: OnceLock<Regex> = OnceLock::new();
    LINE_BREAKS.get_or_init(|| Regex::new(r"(\r?\n)+").expect("valid regex"))
}

/// The node's name, unless it still carries the auto-generated
/// `<type><number>` name the host gave it.
pub fn guess_filename(node_name: &str, type_base_name: &str) -> String {
    let pattern = format!(r"^{}\d*$", regex::escape(type_base_name));
    match Regex::new(&pattern) {
        Ok(auto_named) if auto_named.is_match(node_name) => String::new(),
        Ok(_) => node_name.to_string(),
        Err(err) => {
            tracing::debug!(error = %err, "unusable node type name");
            String::new()
        }
    }
}

/// Extension from the editor language tag, else from the node type name.
pub fn guess_filetype(editor_lang: Option<&str>, type_base_name: &str) -> String {
    if let Some(lang) = editor_lang {
        let lang = lang.to_lowercase();
        if let Some((_, ext)) = LANGUAGE_EXTENSIONS.iter().find(|(tag, _)| *tag == lang) {
            return ext.to_string();
        }
        tracing::debug!(editor_lang = %lang, "unknown editor language");
    }

    TYPE_HINTS
        .iter()
        .find(|(hint, _)| type_base_name.contains(hint))
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_default()
}

/// Text of a comment opening the snippet.
pub fn guess_description(snippet: &str) -> String {
    if let Some(marker) = LINE_COMMENTS.iter().find(|m| snippet.starts_with(*m)) {
        let rest = &snippet[marker.len()..];
        let line = rest.split('\n').next().unwrap_or_default();
        return line.trim().to_string();
    }

    for (open, close) in BLOCK_COMMENTS {
        if let Some(rest) = snippet.strip_prefix(open) {
            return match rest.find(close) {
                Some(end) => line_breaks().replace_all(&rest[..end], " ").trim().to_string(),
                None => String::new(),
            };
        }
    }

    String::new()
}
