use crate::host::{Node, SnippetParm, EDITOR_LANG_TAG};
use anyhow::{Context, Result};
use clipboard::{ClipboardContext, ClipboardProvider};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Host context given on the command line.
#[derive(Debug, Clone, Default)]
pub struct HostHints {
    pub node_name: Option<String>,
    pub node_type: Option<String>,
    pub editor_lang: Option<String>,
}

/// Snippet text from a file, from stdin for `-`, or from the clipboard.
pub fn read_snippet(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read snippet from stdin")?;
            Ok(text)
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read snippet: {:?}", path)),
        None => {
            let mut ctx: ClipboardContext = ClipboardProvider::new()
                .map_err(|e| anyhow::anyhow!("Failed to initialize clipboard: {}", e))?;
            ctx.get_contents()
                .map_err(|e| anyhow::anyhow!("Failed to read from clipboard: {}", e))
        }
    }
}

/// Language tag implied by a source file's extension.
fn editor_lang_for(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "py" => Some("python"),
        "vfl" | "h" | "vex" => Some("vex"),
        "cl" => Some("opencl"),
        _ => None,
    }
}

/// Stand in for the host's node and parameter. Missing hints are filled
/// from the file path when there is one.
pub fn snippet_parm(text: String, file: Option<&Path>, hints: HostHints) -> SnippetParm {
    let file = file.filter(|path| *path != Path::new("-"));

    let node_name = hints
        .node_name
        .or_else(|| {
            file.and_then(|path| path.file_stem())
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_default();
    let node_type = hints.node_type.unwrap_or_default();

    let mut parm = SnippetParm::new(Node::new(node_name, &node_type), text);
    let editor_lang = hints
        .editor_lang
        .or_else(|| file.and_then(editor_lang_for).map(str::to_string));
    if let Some(lang) = editor_lang {
        parm = parm.with_tag(EDITOR_LANG_TAG, &lang);
    }
    parm
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_snippet_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jitter.vfl");
        fs::write(&path, "@P += 1;").unwrap();
        assert_eq!(read_snippet(Some(&path)).unwrap(), "@P += 1;");
        assert!(read_snippet(Some(&dir.path().join("missing.py"))).is_err());
    }

    #[test]
    fn file_path_fills_missing_hints() {
        let parm = snippet_parm(
            "@P += 1;".to_string(),
            Some(Path::new("snips/point jitter.vfl")),
            HostHints::default(),
        );
        assert_eq!(parm.node.name, "point jitter");
        assert_eq!(parm.editor_lang(), Some("vex"));
        assert_eq!(parm.eval_as_string(), "@P += 1;");
    }

    #[test]
    fn explicit_hints_win() {
        let hints = HostHints {
            node_name: Some("attribwrangle3".to_string()),
            node_type: Some("Sop/attribwrangle".to_string()),
            editor_lang: None,
        };
        let parm = snippet_parm("x".to_string(), Some(Path::new("-")), hints);
        assert_eq!(parm.node.name, "attribwrangle3");
        assert_eq!(parm.node.node_type.base_name(), "attribwrangle");
        assert_eq!(parm.editor_lang(), None);
    }
}
