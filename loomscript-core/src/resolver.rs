//! Second pass over the parser's draft scenes.
//!
//! Pass A walks every actor in encounter order and synthesizes a placeholder
//! for each name the caller does not know. Pass B maps scene titles to ids
//! and rewrites choice targets. Both passes build new values; the draft is
//! left untouched, so resolving an already resolved graph changes nothing.

use std::collections::HashSet;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::{ChoiceTarget, Scene};
use crate::character::{Character, synthesize_placeholder};
use crate::diagnostic::Diagnostic;

/// Anything that can answer "is there already a character with this name?".
pub trait KnownCharacters {
    fn knows(&self, name: &str) -> bool;
}

impl KnownCharacters for HashSet<String> {
    fn knows(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl KnownCharacters for [&str] {
    fn knows(&self, name: &str) -> bool {
        self.iter().any(|n| *n == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub scenes: Vec<Scene>,
    pub new_characters: Vec<Character>,
    pub errors: Vec<Diagnostic>,
}

pub fn resolve<K: KnownCharacters + ?Sized>(scenes: &[Scene], known: &K) -> Resolution {
    let new_characters = synthesize_missing(scenes, known);
    let mut errors = Vec::new();
    let scenes = resolve_choices(scenes, &mut errors);
    Resolution {
        scenes,
        new_characters,
        errors,
    }
}

/// Pass A: one placeholder per unknown name, in the order names are met.
pub fn synthesize_missing<K: KnownCharacters + ?Sized>(scenes: &[Scene], known: &K) -> Vec<Character> {
    let mut created: FxHashSet<&str> = FxHashSet::default();
    let mut out = Vec::new();
    for actor in scenes.iter().flat_map(|s| &s.characters) {
        let name = actor.character_name.as_str();
        if known.knows(name) || !created.insert(name) {
            continue;
        }
        log::info!("Synthesizing placeholder character '{}'", name);
        out.push(synthesize_placeholder(name));
    }
    out
}

/// Pass B: rewrite every choice target from a title to a scene id.
fn resolve_choices(scenes: &[Scene], errors: &mut Vec<Diagnostic>) -> Vec<Scene> {
    let mut by_title: FxHashMap<&str, (&str, usize)> = FxHashMap::default();
    for scene in scenes {
        if let Some((_, first_line)) = by_title.get(scene.title.as_str()) {
            errors.push(Diagnostic::referential(
                Some(scene.src_line),
                format!(
                    "Duplicate scene title '{}' (first defined on line {}); choices resolve to the first one",
                    scene.title, first_line
                ),
            )
            .in_scene(&scene.id));
            continue;
        }
        by_title.insert(scene.title.as_str(), (scene.id.as_str(), scene.src_line));
    }
    let ids: FxHashSet<&str> = scenes.iter().map(|s| s.id.as_str()).collect();

    scenes
        .iter()
        .map(|scene| {
            let mut scene = scene.clone();
            for choice in &mut scene.choices {
                let target = match &choice.target {
                    ChoiceTarget::Scene(id) if ids.contains(id.as_str()) => continue,
                    ChoiceTarget::Scene(id) => {
                        errors.push(Diagnostic::referential(
                            Some(choice.src_line),
                            format!("Choice '{}' targets missing scene id '{}'", choice.text, id),
                        )
                        .in_scene(&scene.id));
                        ChoiceTarget::Unresolved(id.clone())
                    }
                    ChoiceTarget::Pending(title) | ChoiceTarget::Unresolved(title) => {
                        match by_title.get(title.as_str()) {
                            Some((id, _)) => ChoiceTarget::Scene(id.to_string()),
                            None => {
                                errors.push(Diagnostic::referential(
                                    Some(choice.src_line),
                                    format!("Choice '{}' targets unknown scene '{}'", choice.text, title),
                                )
                                .in_scene(&scene.id));
                                ChoiceTarget::Unresolved(title.clone())
                            }
                        }
                    }
                };
                choice.target = target;
            }
            scene
        })
        .collect()
}
