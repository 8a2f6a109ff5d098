use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use thiserror::Error;

use loomscript_core::ast::{ChoiceTarget, Scene};

use crate::animation::{AnimationRuntime, create_runtime};
use crate::config::PlayerConfig;
use crate::event::{InputEvent, OutputEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("story has no scenes")]
    NoScenes,
    #[error("start scene '{0}' not found")]
    UnknownStartScene(String),
    #[error("playthrough already finished")]
    Finished,
    /// The current line is the last one and the scene offers choices.
    #[error("waiting for a choice")]
    AwaitingChoice,
    #[error("choices are only offered after the last line")]
    NotAtChoice,
    #[error("choice {index} out of range ({len} available)")]
    ChoiceOutOfRange { index: usize, len: usize },
    #[error("choice '{text}' leads to unknown scene '{target}'")]
    UnresolvedChoice { text: String, target: String },
}

/// One reader's walk through a resolved story.
///
/// Holds the current scene and line and exactly one [`AnimationRuntime`],
/// replaced on every scene switch.
pub struct Playthrough {
    scenes: Vec<Scene>,
    by_id: FxHashMap<String, usize>,
    current: usize,
    line: Option<usize>,
    runtime: AnimationRuntime,
    queue: VecDeque<OutputEvent>,
    history: Vec<String>,
    started: bool,
    finished: bool,
}

impl Playthrough {
    pub fn new(scenes: Vec<Scene>, cfg: &PlayerConfig) -> Result<Self, PlayError> {
        let current = match &cfg.start_scene {
            Some(title) => scenes
                .iter()
                .position(|s| &s.title == title)
                .ok_or_else(|| PlayError::UnknownStartScene(title.clone()))?,
            None if scenes.is_empty() => return Err(PlayError::NoScenes),
            None => 0,
        };
        let by_id = scenes.iter().enumerate().map(|(i, s)| (s.id.clone(), i)).collect();
        let runtime = create_runtime(&scenes[current]);

        Ok(Self {
            scenes,
            by_id,
            current,
            line: None,
            runtime,
            queue: VecDeque::new(),
            history: Vec::new(),
            started: false,
            finished: false,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scenes[self.current]
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn runtime(&self) -> &AnimationRuntime {
        &self.runtime
    }

    /// Ids of the scenes entered so far, in order.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Show the start scene. Later calls return nothing.
    pub fn start(&mut self) -> Vec<OutputEvent> {
        if !self.started {
            self.started = true;
            self.enter(self.current);
        }
        self.drain()
    }

    pub fn feed(&mut self, ev: InputEvent) -> Result<Vec<OutputEvent>, PlayError> {
        match ev {
            InputEvent::Continue => self.next(),
            InputEvent::ChoiceMade { index } => self.choose(index),
            InputEvent::Exit => Ok(self.close()),
        }
    }

    /// Move to the next line, or end the story after a last line without choices.
    pub fn next(&mut self) -> Result<Vec<OutputEvent>, PlayError> {
        if self.finished {
            return Err(PlayError::Finished);
        }
        if !self.started {
            return Ok(self.start());
        }
        let scene = &self.scenes[self.current];
        let next = self.line.map_or(0, |l| l + 1);
        if next < scene.dialogue.len() {
            self.show_line(next);
        } else if !scene.choices.is_empty() {
            return Err(PlayError::AwaitingChoice);
        } else {
            self.finish();
        }
        Ok(self.drain())
    }

    /// Take choice `index` of the current scene. Nothing changes on error.
    pub fn choose(&mut self, index: usize) -> Result<Vec<OutputEvent>, PlayError> {
        if self.finished {
            return Err(PlayError::Finished);
        }
        let scene = &self.scenes[self.current];
        let at_last = match self.line {
            Some(l) => l + 1 >= scene.dialogue.len(),
            None => self.started && scene.dialogue.is_empty(),
        };
        if !at_last || scene.choices.is_empty() {
            return Err(PlayError::NotAtChoice);
        }
        let choice = scene.choices.get(index).ok_or(PlayError::ChoiceOutOfRange {
            index,
            len: scene.choices.len(),
        })?;
        let target = match &choice.target {
            ChoiceTarget::Scene(id) => self.by_id.get(id).copied(),
            _ => None,
        };
        let Some(target) = target else {
            let title = match &choice.target {
                ChoiceTarget::Pending(t) | ChoiceTarget::Unresolved(t) | ChoiceTarget::Scene(t) => t.clone(),
            };
            return Err(PlayError::UnresolvedChoice { text: choice.text.clone(), target: title });
        };

        log::debug!("choice '{}' -> {}", choice.text, self.scenes[target].id);
        self.enter(target);
        Ok(self.drain())
    }

    /// Advance the animation clock.
    pub fn update(&mut self, dt_ms: u64) -> Vec<OutputEvent> {
        self.runtime.update(dt_ms).into_iter().map(OutputEvent::Actor).collect()
    }

    /// Stop playing. Pending animation writes are cancelled.
    pub fn close(&mut self) -> Vec<OutputEvent> {
        if !self.finished {
            self.finish();
        }
        self.drain()
    }

    fn enter(&mut self, index: usize) {
        self.runtime.dispose();
        self.current = index;
        self.line = None;

        let scene = &self.scenes[index];
        log::info!("entering scene '{}' ({})", scene.title, scene.id);
        self.history.push(scene.id.clone());
        self.runtime = create_runtime(scene);
        self.queue.push_back(OutputEvent::EnterScene {
            scene_id: scene.id.clone(),
            title: scene.title.clone(),
            description: scene.description.clone(),
        });

        if scene.dialogue.is_empty() {
            let started = self.runtime.advance(0);
            self.queue.extend(started.into_iter().map(OutputEvent::Actor));
            self.offer_choices_or_end();
        } else {
            self.show_line(0);
        }
    }

    fn show_line(&mut self, index: usize) {
        let scene = &self.scenes[self.current];
        let line = &scene.dialogue[index];
        self.line = Some(index);
        self.queue.push_back(OutputEvent::ShowDialogue {
            index,
            speaker: line.speaker.clone(),
            text: line.text.clone(),
        });
        let started = self.runtime.advance(index);
        self.queue.extend(started.into_iter().map(OutputEvent::Actor));

        if index + 1 == scene.dialogue.len() && !scene.choices.is_empty() {
            self.push_choices();
        }
    }

    fn offer_choices_or_end(&mut self) {
        if self.scenes[self.current].choices.is_empty() {
            self.finish();
        } else {
            self.push_choices();
        }
    }

    fn push_choices(&mut self) {
        let options = self.scenes[self.current].choices.iter().map(|c| c.text.clone()).collect();
        self.queue.push_back(OutputEvent::ShowChoices { options });
    }

    fn finish(&mut self) {
        self.finished = true;
        self.runtime.dispose();
        self.queue.push_back(OutputEvent::End);
    }

    fn drain(&mut self) -> Vec<OutputEvent> {
        self.queue.drain(..).collect()
    }
}
