/// 1-based position of a classified line in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: usize,
}

/// Category of a single non-blank, non-comment script line.
///
/// Each variant carries the text after its prefix, already trimmed.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    SceneHeader(String),
    Description(String),
    CharacterDirective(String),
    Dialogue(String),
    Choice(String),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub kind: LineKind,
    pub span: Span,
}

pub const COMMENT_MARKER: &str = "//";
pub const SCENE_MARKER: char = '#';

const DIRECTIVES: &[(&str, fn(String) -> LineKind)] = &[
    ("Description:", LineKind::Description),
    ("Character:", LineKind::CharacterDirective),
    ("Dialogue:", LineKind::Dialogue),
    ("Choice:", LineKind::Choice),
];

pub struct Lexer<'a> {
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src }
    }

    pub fn run(&mut self) -> Vec<Line> {
        let mut out = Vec::new();
        for (idx, raw) in self.src.lines().enumerate() {
            let text = raw.trim();
            if is_trivia(text) {
                continue;
            }
            let line = idx + 1;
            let kind = classify(text).unwrap_or_else(|| {
                panic!("line classifier produced no category for line {}: {:?}", line, raw)
            });
            out.push(Line { kind, span: Span { line } });
        }
        log::trace!("classified {} lines", out.len());
        out
    }
}

fn is_trivia(text: &str) -> bool {
    text.is_empty() || text.starts_with(COMMENT_MARKER)
}

/// Classify one trimmed line. Returns `None` only for blank or comment lines.
pub fn classify(text: &str) -> Option<LineKind> {
    if is_trivia(text) {
        return None;
    }
    if let Some(rest) = text.strip_prefix(SCENE_MARKER) {
        // "#Title" is not a header; the marker must be followed by whitespace or nothing
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return Some(LineKind::SceneHeader(rest.trim().to_string()));
        }
    }
    for (prefix, make) in DIRECTIVES {
        if let Some(rest) = text.strip_prefix(prefix) {
            return Some(make(rest.trim().to_string()));
        }
    }
    Some(LineKind::Unknown(text.to_string()))
}
