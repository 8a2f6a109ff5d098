//! Layered placement of the scene graph.
//!
//! Scenes are nodes and resolved choices are edges. Layers come from a
//! breadth-first walk started at every root at once: a scene lands in the
//! first layer it is reached at, so a back-edge or a shortcut can point
//! "upwards" in the drawing. Scenes no root reaches share one extra layer
//! after the last reached one. Every tie is broken by document order or
//! discovery order, never by hash order.
//!
//! The `min_x` clamp shifts a whole layer, not single nodes. With the default
//! config a two-node layer would start at x = 25, so it is moved to 50 and
//! 400. Clamping each node on its own would give 50 and 375 instead.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use loomscript_core::ast::{Position, Scene};

use crate::config::LayoutConfig;

/// Scene ids grouped by layer, top to bottom.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layering {
    layers: Vec<Vec<String>>,
    layer_of: FxHashMap<String, usize>,
}

impl Layering {
    pub fn layers(&self) -> &[Vec<String>] {
        &self.layers
    }

    pub fn layer_of(&self, scene_id: &str) -> Option<usize> {
        self.layer_of.get(scene_id).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn place(&mut self, id: &str, layer: usize) {
        if self.layers.len() <= layer {
            self.layers.resize_with(layer + 1, Vec::new);
        }
        self.layers[layer].push(id.to_string());
        self.layer_of.insert(id.to_string(), layer);
    }
}

/// Outgoing edges per scene, deduplicated, in choice order. Choices that are
/// unresolved or point outside `scenes` are not edges.
pub fn edges(scenes: &[Scene]) -> FxHashMap<&str, Vec<&str>> {
    let ids: FxHashSet<&str> = scenes.iter().map(|s| s.id.as_str()).collect();
    let mut out: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for scene in scenes {
        let targets = out.entry(scene.id.as_str()).or_default();
        for choice in &scene.choices {
            let target = choice.target_scene_id();
            if ids.contains(target) && !targets.contains(&target) {
                targets.push(target);
            }
        }
    }
    out
}

pub fn assign_layers(scenes: &[Scene]) -> Layering {
    let mut layering = Layering::default();
    let Some(first) = scenes.first() else {
        return layering;
    };

    let outgoing = edges(scenes);
    let has_incoming: FxHashSet<&str> = outgoing.values().flatten().copied().collect();

    let mut roots: Vec<&str> = scenes
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| !has_incoming.contains(id))
        .collect();
    if roots.is_empty() {
        roots.push(first.id.as_str());
    }

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
    for root in roots {
        if visited.insert(root) {
            queue.push_back((root, 0));
        }
    }

    while let Some((id, layer)) = queue.pop_front() {
        layering.place(id, layer);
        for &next in outgoing.get(id).into_iter().flatten() {
            if visited.insert(next) {
                queue.push_back((next, layer + 1));
            }
        }
    }

    let spill = layering.len();
    for scene in scenes {
        if !visited.contains(scene.id.as_str()) {
            layering.place(&scene.id, spill);
        }
    }

    log::debug!("laid {} scenes out in {} layers", scenes.len(), layering.len());
    layering
}

/// [`layout_with`] using the default spacing.
pub fn layout(scenes: &[Scene]) -> Vec<Scene> {
    layout_with(scenes, &LayoutConfig::default())
}

/// Copy of `scenes` with every `position` filled in.
pub fn layout_with(scenes: &[Scene], cfg: &LayoutConfig) -> Vec<Scene> {
    let layering = assign_layers(scenes);
    let mut slot: FxHashMap<&str, Position> = FxHashMap::default();

    for (depth, ids) in layering.layers().iter().enumerate() {
        let width = (ids.len().saturating_sub(1)) as f32 * cfg.horizontal_spacing;
        // clamp the whole row so nodes pushed against the edge keep their spacing
        let start = (cfg.start_x - width / 2.0).max(cfg.min_x);
        let y = cfg.start_y + depth as f32 * cfg.layer_height;
        for (i, id) in ids.iter().enumerate() {
            let x = start + i as f32 * cfg.horizontal_spacing;
            slot.insert(id.as_str(), Position { x, y });
        }
    }

    scenes
        .iter()
        .map(|scene| {
            let mut scene = scene.clone();
            scene.position = slot.get(scene.id.as_str()).copied();
            scene
        })
        .collect()
}
