use crate::ast::{Choice, ChoiceTarget, DialogueLine, Scene, SceneActor};
use crate::diagnostic::Diagnostic;
use crate::directive::parse_character_directive;
use crate::lexer::{Line, LineKind, Span};

/// Both arrow spellings accepted between choice text and target title.
pub const CHOICE_ARROWS: [&str; 2] = ["→", "->"];

/// Draft output of the first pass. Choice targets are still titles.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScript {
    pub scenes: Vec<Scene>,
    pub errors: Vec<Diagnostic>,
}

pub struct Parser<'a> {
    lines: &'a [Line],
    cursor: usize,
    scope: Option<String>,
    scenes: Vec<Scene>,
    current: Option<Scene>,
    speaker: Option<String>,
    scene_seq: usize,
    errors: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(lines: &'a [Line]) -> Self {
        Self {
            lines,
            cursor: 0,
            scope: None,
            scenes: Vec::new(),
            current: None,
            speaker: None,
            scene_seq: 0,
            errors: Vec::new(),
        }
    }

    /// Prefix generated scene ids with `scope`, e.g. the file a script came from.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn parse(mut self) -> ParsedScript {
        while let Some(line) = self.bump() {
            let Line { kind, span } = line;
            match kind {
                LineKind::SceneHeader(title) => self.scene_header(title, *span),
                LineKind::Description(text) => self.description(text, *span),
                LineKind::CharacterDirective(body) => self.character(body, *span),
                LineKind::Dialogue(text) => self.dialogue(text, *span),
                LineKind::Choice(body) => self.choice(body, *span),
                LineKind::Unknown(text) => {
                    self.error(*span, format!("Unknown format \"{}\"", text));
                }
            }
        }
        self.close_scene();

        log::debug!(
            "parsed {} scenes from {} lines ({} diagnostics)",
            self.scenes.len(),
            self.lines.len(),
            self.errors.len()
        );
        ParsedScript {
            scenes: self.scenes,
            errors: self.errors,
        }
    }

    fn bump(&mut self) -> Option<&'a Line> {
        let line = self.lines.get(self.cursor)?;
        self.cursor += 1;
        Some(line)
    }

    fn error(&mut self, span: Span, msg: String) {
        log::debug!("line {}: {}", span.line, msg);
        self.errors.push(Diagnostic::structural(span.line, msg));
    }

    fn close_scene(&mut self) {
        if let Some(scene) = self.current.take() {
            self.scenes.push(scene);
        }
    }

    /// The open scene, or a diagnostic naming `what` when there is none.
    fn open_scene(&mut self, what: &str, span: Span) -> Option<&mut Scene> {
        if self.current.is_none() {
            self.error(span, format!("{} found without a scene", what));
        }
        self.current.as_mut()
    }

    fn scene_header(&mut self, title: &str, span: Span) {
        self.close_scene();
        let id = match &self.scope {
            Some(scope) => format!("{}@scene_{}", scope, self.scene_seq),
            None => format!("scene_{}", self.scene_seq),
        };
        self.scene_seq += 1;
        if title.is_empty() {
            self.error(span, "Scene header is missing a title".to_string());
        }
        self.current = Some(Scene::new(id, title.to_string(), span.line));
        self.speaker = None;
    }

    fn description(&mut self, text: &str, span: Span) {
        if let Some(scene) = self.open_scene("Description", span) {
            scene.description = text.to_string();
        }
    }

    fn character(&mut self, body: &str, span: Span) {
        let (name, animation) = parse_character_directive(body);
        if name.is_empty() {
            self.error(span, "Character directive is missing a name".to_string());
            return;
        }
        let Some(scene) = self.open_scene("Character", span) else {
            return;
        };
        scene.characters.push(SceneActor {
            id: format!("{}@actor_{}", scene.id, scene.characters.len()),
            character_name: name.clone(),
            animation,
            cue: scene.dialogue.len(),
        });
        self.speaker = Some(name);
    }

    fn dialogue(&mut self, text: &str, span: Span) {
        let speaker = self.speaker.clone();
        if let Some(scene) = self.open_scene("Dialogue", span) {
            scene.dialogue.push(DialogueLine {
                id: format!("{}@line_{}", scene.id, scene.dialogue.len()),
                speaker,
                text: text.to_string(),
            });
        }
    }

    fn choice(&mut self, body: &str, span: Span) {
        let Some((text, target)) = split_choice(body) else {
            self.error(
                span,
                "Choice must use format \"Choice text → Target Scene\" or \"Choice text -> Target Scene\"".to_string(),
            );
            return;
        };
        if let Some(scene) = self.open_scene("Choice", span) {
            scene.choices.push(Choice {
                id: format!("{}@choice_{}", scene.id, scene.choices.len()),
                text: text.to_string(),
                target: ChoiceTarget::Pending(target.to_string()),
                src_line: span.line,
            });
        }
    }
}

/// Split `text → Target` on the first arrow; `→` is preferred over `->`.
pub fn split_choice(body: &str) -> Option<(&str, &str)> {
    CHOICE_ARROWS.iter().find_map(|arrow| {
        let (text, target) = body.split_once(arrow)?;
        Some((text.trim(), target.trim()))
    })
}
