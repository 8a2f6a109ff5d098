use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionKind {
    EntranceStarted,
    Entered,
    EntranceFinished,
    ExitStarted,
    Exited,
}

/// One actor state change reported by the animation runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEvent {
    pub actor_id: String,
    pub character_name: String,
    pub kind: TransitionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutputEvent {
    EnterScene { scene_id: String, title: String, description: String },
    ShowDialogue { index: usize, speaker: Option<String>, text: String },
    ShowChoices { options: Vec<String> },
    Actor(TransitionEvent),
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    ChoiceMade { index: usize },
    Continue,
    Exit,
}
