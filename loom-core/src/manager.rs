use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use rustc_hash::FxHashMap;
use walkdir::WalkDir;

use loomscript_core::ast::Scene;
use loomscript_core::lexer::Lexer;
use loomscript_core::parser::Parser;
use loomscript_core::resolver::{KnownCharacters, resolve};
use loomscript_core::{Character, Diagnostic, compile};

use crate::config::LayoutConfig;
use crate::layout::layout_with;

pub const SCRIPT_EXTENSION: &str = "loom";

/// Where characters live. Entries are only ever added.
pub trait CharacterRegistry {
    fn lookup(&self, name: &str) -> Option<&Character>;
    fn register(&mut self, character: Character);
}

/// Whatever displays or stores the current scene graph.
pub trait SceneSink {
    fn replace_all(&mut self, scenes: Vec<Scene>);
}

/// In-memory character registry, keyed by name.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    characters: Vec<Character>,
    by_name: FxHashMap<String, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl CharacterRegistry for Roster {
    fn lookup(&self, name: &str) -> Option<&Character> {
        self.by_name.get(name).map(|&i| &self.characters[i])
    }

    fn register(&mut self, character: Character) {
        if self.by_name.contains_key(&character.name) {
            log::warn!("character '{}' already registered, keeping the existing entry", character.name);
            return;
        }
        self.by_name.insert(character.name.clone(), self.characters.len());
        self.characters.push(character);
    }
}

#[derive(Debug, Default, Clone)]
pub struct SceneStore {
    scenes: Vec<Scene>,
    revision: u64,
}

impl SceneStore {
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Number of times the graph was replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl SceneSink for SceneStore {
    fn replace_all(&mut self, scenes: Vec<Scene>) {
        self.scenes = scenes;
        self.revision += 1;
    }
}

struct Known<'a, R: ?Sized>(&'a R);

impl<R: CharacterRegistry + ?Sized> KnownCharacters for Known<'_, R> {
    fn knows(&self, name: &str) -> bool {
        self.0.lookup(name).is_some()
    }
}

/// A story being edited: scripts in, laid-out graph and characters out.
pub struct StoryProject<R = Roster, S = SceneStore> {
    registry: R,
    sink: S,
    layout: LayoutConfig,
}

impl StoryProject {
    pub fn new() -> Self {
        Self::with_parts(Roster::new(), SceneStore::default(), LayoutConfig::default())
    }
}

impl Default for StoryProject {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CharacterRegistry, S: SceneSink> StoryProject<R, S> {
    pub fn with_parts(registry: R, sink: S, layout: LayoutConfig) -> Self {
        Self { registry, sink, layout }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn set_layout(&mut self, layout: LayoutConfig) {
        self.layout = layout;
    }

    /// Compile one script and publish the result. Returns its diagnostics.
    pub fn import_script(&mut self, source: &str) -> Vec<Diagnostic> {
        let compiled = compile(source, &Known(&self.registry));
        info!(
            "Imported script: {} scenes, {} new characters, {} diagnostics",
            compiled.scenes.len(),
            compiled.new_characters.len(),
            compiled.errors.len()
        );
        self.publish(compiled.scenes, compiled.new_characters);
        for diag in &compiled.errors {
            log::debug!("{}", diag);
        }
        compiled.errors
    }

    /// Compile every `*.loom` file under `root` as one story.
    ///
    /// Files are read in file-name order and each file's scene ids are
    /// scoped by its stem, so ids never collide across files. Titles do:
    /// choices resolve across all files to the first scene with a title, and
    /// every later scene reusing it is reported as a duplicate.
    pub fn load_project(&mut self, root: impl AsRef<Path>) -> Result<Vec<Diagnostic>> {
        let root = root.as_ref();
        info!("Scanning story project at: {:?}", root);

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", root))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|e| e == SCRIPT_EXTENSION) {
                files.push(path.to_path_buf());
            }
        }

        let mut scenes = Vec::new();
        let mut errors = Vec::new();
        let mut file_of: FxHashMap<String, String> = FxHashMap::default();

        for path in &files {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script: {:?}", path))?;
            let scope = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .with_context(|| format!("Script path has no file name: {:?}", path))?;
            let shown = path.strip_prefix(root).unwrap_or(path).display().to_string();

            let lines = Lexer::new(&content).run();
            let parsed = Parser::new(&lines).with_scope(&scope).parse();
            for scene in &parsed.scenes {
                file_of.insert(scene.id.clone(), shown.clone());
            }
            errors.extend(parsed.errors.into_iter().map(|d| d.in_file(&shown)));
            scenes.extend(parsed.scenes);
        }

        let resolution = resolve(&scenes, &Known(&self.registry));
        errors.extend(resolution.errors.into_iter().map(|d| {
            match d.scene.as_ref().and_then(|id| file_of.get(id)).cloned() {
                Some(file) => d.in_file(file),
                None => d,
            }
        }));

        info!(
            "Project loaded. Files: {}, Scenes: {}, New characters: {}, Diagnostics: {}",
            files.len(),
            resolution.scenes.len(),
            resolution.new_characters.len(),
            errors.len()
        );
        self.publish(resolution.scenes, resolution.new_characters);
        Ok(errors)
    }

    fn publish(&mut self, scenes: Vec<Scene>, new_characters: Vec<Character>) {
        for character in new_characters {
            self.registry.register(character);
        }
        self.sink.replace_all(layout_with(&scenes, &self.layout));
    }
}

impl StoryProject {
    /// The published graph and every known character, as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "scenes": self.sink.scenes(),
            "characters": self.registry.characters(),
        })
    }
}
