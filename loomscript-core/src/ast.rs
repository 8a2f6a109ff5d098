//! Scene graph produced by the script parser.
//!
//! Scenes are the nodes, choices are the directed edges. Everything here is
//! plain data: the parser creates it, the resolver rewrites choice targets and
//! the layout engine fills in positions.

use serde::{Deserialize, Serialize};

/// One node of the narrative graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub description: String,
    pub dialogue: Vec<DialogueLine>,
    pub choices: Vec<Choice>,
    pub characters: Vec<SceneActor>,
    pub position: Option<Position>,
    /// Line of the `#` header this scene was opened by.
    pub src_line: usize,
}

impl Scene {
    pub fn new(id: String, title: String, src_line: usize) -> Self {
        Self {
            id,
            title,
            description: String::new(),
            dialogue: Vec::new(),
            choices: Vec::new(),
            characters: Vec::new(),
            position: None,
            src_line,
        }
    }

    pub fn last_dialogue_index(&self) -> usize {
        self.dialogue.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub id: String,
    pub speaker: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub target: ChoiceTarget,
    pub src_line: usize,
}

impl Choice {
    /// Resolved target id, or `""` when the choice does not point at a scene.
    pub fn target_scene_id(&self) -> &str {
        match &self.target {
            ChoiceTarget::Scene(id) => id,
            _ => "",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.target, ChoiceTarget::Scene(_))
    }
}

/// Where a choice leads.
///
/// `Pending` holds the title as written, before resolution. `Unresolved`
/// keeps the title that failed to resolve so an author can still see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum ChoiceTarget {
    Pending(String),
    Scene(String),
    Unresolved(String),
}

/// A character's appearance inside one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneActor {
    pub id: String,
    pub character_name: String,
    pub animation: AnimationSpec,
    /// Number of dialogue lines in the scene that precede the directive.
    pub cue: usize,
}

pub const DEFAULT_ENTRANCE_MS: u32 = 800;
pub const DEFAULT_EXIT_MS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub entrance: Entrance,
    pub exit: Exit,
    pub timing: Timing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entrance {
    pub kind: EntranceKind,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

impl Default for Entrance {
    fn default() -> Self {
        Self {
            kind: EntranceKind::FadeIn,
            duration_ms: DEFAULT_ENTRANCE_MS,
            delay_ms: 0,
            easing: Easing::EaseOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exit {
    pub kind: ExitKind,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

impl Default for Exit {
    fn default() -> Self {
        Self {
            kind: ExitKind::FadeOut,
            duration_ms: DEFAULT_EXIT_MS,
            delay_ms: 0,
            easing: Easing::EaseIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntranceKind {
    SlideFromLeft,
    SlideFromRight,
    SlideUp,
    SlideDown,
    FadeIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitKind {
    SlideToLeft,
    SlideToRight,
    SlideUp,
    SlideDown,
    FadeOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnterTrigger {
    #[default]
    SceneStart,
    FirstDialogue,
    SpecificDialogue,
    CharacterDialogue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitTrigger {
    #[default]
    SceneEnd,
    LastDialogue,
    SpecificDialogue,
    CharacterDialogue,
}

/// When an actor enters and leaves, relative to the scene's dialogue.
///
/// Dialogue indices are zero-based; character occurrence counts are one-based
/// (`1` = the named character's first line).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub enter_on: EnterTrigger,
    pub exit_on: ExitTrigger,
    pub trigger_dialogue_index: Option<usize>,
    pub trigger_character_name: Option<String>,
    pub trigger_character_dialogue_index: Option<usize>,
    pub exit_dialogue_index: Option<usize>,
    pub exit_character_name: Option<String>,
    pub exit_character_dialogue_index: Option<usize>,
}
