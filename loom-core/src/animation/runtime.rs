//! Per-visit actor state machine.
//!
//! The runtime never reads a wall clock. [`AnimationRuntime::advance`] is
//! called once per dialogue line shown and decides which entrances and exits
//! start; [`AnimationRuntime::update`] moves the virtual clock and applies the
//! delayed writes those decisions scheduled. Every scheduled write is tagged
//! with the generation it was created in, so anything queued before a
//! [`reset`](AnimationRuntime::reset) or [`dispose`](AnimationRuntime::dispose)
//! is dropped when it comes due.

use rustc_hash::FxHashMap;
use serde::Serialize;

use loomscript_core::ast::{AnimationSpec, EnterTrigger, ExitTrigger, Scene, Timing};

use super::schedule::{Action, Schedule};
use crate::event::{TransitionEvent, TransitionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorState {
    pub has_entered: bool,
    pub has_exited: bool,
    pub is_animating: bool,
}

#[derive(Debug)]
struct Slot {
    actor_id: String,
    character_name: String,
    animation: AnimationSpec,
    state: ActorState,
    entrance_started: bool,
    exit_started: bool,
}

impl Slot {
    fn event(&self, kind: TransitionKind) -> TransitionEvent {
        TransitionEvent {
            actor_id: self.actor_id.clone(),
            character_name: self.character_name.clone(),
            kind,
        }
    }

    fn clear(&mut self) {
        self.state = ActorState::default();
        self.entrance_started = false;
        self.exit_started = false;
    }
}

/// The line being shown, as far as triggers are concerned.
struct Cursor<'a> {
    index: usize,
    last_index: usize,
    speaker: Option<&'a str>,
    /// Lines `speaker` had before this one.
    spoken_before: usize,
}

fn enter_fires(t: &Timing, at: &Cursor) -> bool {
    match t.enter_on {
        EnterTrigger::SceneStart | EnterTrigger::FirstDialogue => at.index == 0,
        EnterTrigger::SpecificDialogue => t.trigger_dialogue_index == Some(at.index),
        EnterTrigger::CharacterDialogue => {
            at.speaker.is_some()
                && at.speaker == t.trigger_character_name.as_deref()
                && t.trigger_character_dialogue_index == Some(at.spoken_before + 1)
        }
    }
}

fn exit_fires(t: &Timing, at: &Cursor) -> bool {
    match t.exit_on {
        ExitTrigger::SceneEnd | ExitTrigger::LastDialogue => at.index >= at.last_index,
        ExitTrigger::SpecificDialogue => t.exit_dialogue_index == Some(at.index),
        ExitTrigger::CharacterDialogue => {
            at.speaker.is_some()
                && at.speaker == t.exit_character_name.as_deref()
                && t.exit_character_dialogue_index == Some(at.spoken_before + 1)
        }
    }
}

pub struct AnimationRuntime {
    scene_id: String,
    speakers: Vec<Option<String>>,
    slots: Vec<Slot>,
    by_actor: FxHashMap<String, usize>,
    utterances: FxHashMap<String, usize>,
    last_advanced: Option<usize>,
    schedule: Schedule,
    now_ms: u64,
    generation: u64,
    disposed: bool,
}

/// Fresh runtime for one visit to `scene`.
pub fn create_runtime(scene: &Scene) -> AnimationRuntime {
    AnimationRuntime::new(scene)
}

impl AnimationRuntime {
    pub fn new(scene: &Scene) -> Self {
        let slots: Vec<Slot> = scene
            .characters
            .iter()
            .map(|actor| Slot {
                actor_id: actor.id.clone(),
                character_name: actor.character_name.clone(),
                animation: actor.animation.clone(),
                state: ActorState::default(),
                entrance_started: false,
                exit_started: false,
            })
            .collect();
        let by_actor = slots.iter().enumerate().map(|(i, s)| (s.actor_id.clone(), i)).collect();

        log::debug!("animation runtime for {} with {} actors", scene.id, slots.len());
        Self {
            scene_id: scene.id.clone(),
            speakers: scene.dialogue.iter().map(|d| d.speaker.clone()).collect(),
            slots,
            by_actor,
            utterances: FxHashMap::default(),
            last_advanced: None,
            schedule: Schedule::default(),
            now_ms: 0,
            generation: 0,
            disposed: false,
        }
    }

    pub fn scene_id(&self) -> &str {
        &self.scene_id
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Scheduled writes that will still apply when they come due.
    pub fn pending(&self) -> usize {
        self.schedule.pending(self.generation)
    }

    /// Dialogue line `index` is now shown. Starts the entrances and exits it
    /// triggers and returns their `*Started` events.
    pub fn advance(&mut self, index: usize) -> Vec<TransitionEvent> {
        if self.disposed {
            log::warn!("advance({}) on disposed runtime for {}", index, self.scene_id);
            return Vec::new();
        }

        let speaker = self.speakers.get(index).and_then(|s| s.as_deref());
        let at = Cursor {
            index,
            last_index: self.speakers.len().saturating_sub(1),
            speaker,
            spoken_before: speaker.and_then(|s| self.utterances.get(s)).copied().unwrap_or(0),
        };

        let mut events = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if !slot.entrance_started && enter_fires(&slot.animation.timing, &at) {
                let e = slot.animation.entrance;
                slot.entrance_started = true;
                slot.state.is_animating = true;
                let shown_at = self.now_ms + u64::from(e.delay_ms);
                self.schedule.push(shown_at, self.generation, i, Action::MarkEntered);
                self.schedule.push(shown_at + u64::from(e.duration_ms), self.generation, i, Action::FinishEntrance);
                log::trace!("{}: entrance of {} at line {}", self.scene_id, slot.actor_id, index);
                events.push(slot.event(TransitionKind::EntranceStarted));
            }
            if slot.state.has_entered && !slot.exit_started && exit_fires(&slot.animation.timing, &at) {
                let x = slot.animation.exit;
                slot.exit_started = true;
                slot.state.is_animating = true;
                let gone_at = self.now_ms + u64::from(x.delay_ms) + u64::from(x.duration_ms);
                self.schedule.push(gone_at, self.generation, i, Action::MarkExited);
                log::trace!("{}: exit of {} at line {}", self.scene_id, slot.actor_id, index);
                events.push(slot.event(TransitionKind::ExitStarted));
            }
        }

        // showing the same line twice is not a second utterance
        if self.last_advanced != Some(index) {
            if let Some(name) = at.speaker {
                *self.utterances.entry(name.to_string()).or_insert(0) += 1;
            }
            self.last_advanced = Some(index);
        }
        events
    }

    /// Move the clock forward by `dt_ms` and apply every write that came due.
    pub fn update(&mut self, dt_ms: u64) -> Vec<TransitionEvent> {
        if self.disposed {
            return Vec::new();
        }
        self.now_ms += dt_ms;

        let mut events = Vec::new();
        while let Some(entry) = self.schedule.pop_due(self.now_ms) {
            if entry.generation != self.generation {
                log::trace!("{}: dropping stale {:?}", self.scene_id, entry.action);
                continue;
            }
            let Some(slot) = self.slots.get_mut(entry.slot) else {
                continue;
            };
            let kind = match entry.action {
                Action::MarkEntered => {
                    slot.state.has_entered = true;
                    TransitionKind::Entered
                }
                Action::FinishEntrance => {
                    if !slot.exit_started {
                        slot.state.is_animating = false;
                    }
                    TransitionKind::EntranceFinished
                }
                Action::MarkExited => {
                    slot.state.has_exited = true;
                    slot.state.is_animating = false;
                    TransitionKind::Exited
                }
            };
            log::debug!("{}: {} {:?}", self.scene_id, slot.actor_id, kind);
            events.push(slot.event(kind));
        }
        events
    }

    pub fn state(&self, actor_id: &str) -> Option<ActorState> {
        let i = *self.by_actor.get(actor_id)?;
        self.slots.get(i).map(|s| s.state)
    }

    /// Whether the actor should be drawn right now. A scene-start actor is
    /// drawn from the moment the scene is shown, before its entrance ends.
    pub fn is_visible(&self, actor_id: &str) -> bool {
        let Some(slot) = self.by_actor.get(actor_id).and_then(|&i| self.slots.get(i)) else {
            return false;
        };
        !slot.state.has_exited
            && (slot.state.has_entered || slot.animation.timing.enter_on == EnterTrigger::SceneStart)
    }

    pub fn visible_actors(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| self.is_visible(&s.actor_id))
            .map(|s| s.actor_id.as_str())
            .collect()
    }

    /// Start the visit over. Writes already scheduled will not land.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }
        self.generation += 1;
        self.slots.iter_mut().for_each(Slot::clear);
        self.utterances.clear();
        self.last_advanced = None;
        log::debug!("animation runtime for {} reset (generation {})", self.scene_id, self.generation);
    }

    /// Tear the visit down. Every later call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.generation += 1;
        self.disposed = true;
        self.schedule.clear();
        self.slots.clear();
        self.by_actor.clear();
        self.utterances.clear();
        log::debug!("animation runtime for {} disposed", self.scene_id);
    }
}
