use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Malformed line: no open scene, missing choice arrow, unknown format.
    Structural,
    /// Broken reference: unknown choice target, duplicate scene title.
    Referential,
}

/// A recoverable problem found while compiling a script.
///
/// Diagnostics are returned next to the best-effort output instead of
/// aborting, so an editor can show the graph and the fixes side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}{msg}", location(.file, .line))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: Option<usize>,
    pub file: Option<String>,
    /// Scene the problem belongs to, when it belongs to one.
    pub scene: Option<String>,
    pub msg: String,
}

impl Diagnostic {
    pub fn structural(line: usize, msg: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Structural,
            line: Some(line),
            file: None,
            scene: None,
            msg: msg.into(),
        }
    }

    pub fn referential(line: Option<usize>, msg: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Referential,
            line,
            file: None,
            scene: None,
            msg: msg.into(),
        }
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn in_scene(mut self, scene_id: impl Into<String>) -> Self {
        self.scene = Some(scene_id.into());
        self
    }
}

/// `"<file>: Line <n>: "`, with either part left out when unknown.
fn location(file: &Option<String>, line: &Option<usize>) -> String {
    let mut out = String::new();
    if let Some(file) = file {
        out.push_str(file);
        out.push_str(": ");
    }
    if let Some(line) = line {
        out.push_str(&format!("Line {}: ", line));
    }
    out
}
