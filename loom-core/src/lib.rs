pub mod animation;
pub mod config;
pub mod event;
pub mod export;
pub mod layout;
pub mod manager;
pub mod player;

pub use animation::{AnimationRuntime, create_runtime};
pub use event::{InputEvent, OutputEvent, TransitionEvent, TransitionKind};
pub use layout::{assign_layers, layout, layout_with};
pub use manager::{CharacterRegistry, Roster, SceneSink, SceneStore, StoryProject};
pub use player::{PlayError, Playthrough};
