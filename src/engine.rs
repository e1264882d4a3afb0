//! Wiring facade: constructs the registries, composition state, and
//! pipelines over a storage root and an injected backend, and exposes the
//! operations a UI maps user actions onto.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{
    ComposedPrompts, Composition, CompositionSnapshot, DirectorStyle, DirectorStyleRegistry,
    EngineConfig, EngineError, LengthTargets, PromptLogEntry, Registry, RegistryError,
    ScriptAnalysis, Style, StyleRegistry, Subject, SubjectRegistry, Template, TemplateRegistry,
    analyze_script,
};
use crate::ports::{DurableStore, PromptLogSink, TextGenBackend};
use crate::services::{JsonFileStore, JsonlPromptLog, PromptComposer};

/// One user session's engine: registries, the live composition, and the
/// assembly pipeline. Not safe for concurrent mutation; callers serialize.
pub struct Engine {
    pub subjects: SubjectRegistry,
    pub styles: StyleRegistry,
    pub templates: TemplateRegistry,
    pub director_styles: DirectorStyleRegistry,
    pub composition: Composition,
    composer: PromptComposer,
    log: Arc<dyn PromptLogSink>,
}

impl Engine {
    /// Open an engine over the configured storage root, hydrating the
    /// registries from disk.
    pub fn open(
        config: &EngineConfig,
        backend: Arc<dyn TextGenBackend>,
    ) -> Result<Self, EngineError> {
        let store: Arc<dyn DurableStore> = Arc::new(JsonFileStore::new(&config.storage.root));
        let log: Arc<dyn PromptLogSink> =
            Arc::new(JsonlPromptLog::new(config.storage.root.join("prompt_log.jsonl")));
        Self::with_collaborators(config, backend, store, log)
    }

    /// Open over explicit collaborators (tests, alternative stores).
    pub fn with_collaborators(
        config: &EngineConfig,
        backend: Arc<dyn TextGenBackend>,
        store: Arc<dyn DurableStore>,
        log: Arc<dyn PromptLogSink>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            subjects: Registry::load("subjects", store.clone())?,
            styles: Registry::load("styles", store.clone())?,
            templates: Registry::load("templates", store.clone())?,
            director_styles: Registry::load("director_styles", store)?,
            composition: Composition::with_capacity(config.history.capacity),
            composer: PromptComposer::new(backend, log.clone()),
            log,
        })
    }

    /// Assemble prompts for the current snapshot and the active subjects.
    pub fn compose_current(
        &self,
        targets: LengthTargets,
    ) -> Result<ComposedPrompts, EngineError> {
        let prompts = self.composer.compose(
            self.composition.current(),
            &self.subjects.active_subjects(),
            targets,
        )?;
        Ok(prompts)
    }

    /// Derive and persist the suffix for a saved style, returning it.
    pub fn derive_style_suffix(&mut self, style_name: &str) -> Result<String, EngineError> {
        let mut style: Style = self
            .styles
            .get(style_name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(style_name.to_string()))?;

        let suffix = self.composer.derive_style_suffix(&style.prefix)?;
        style.suffix = suffix.clone();
        self.styles.update(style)?;
        Ok(suffix)
    }

    /// Generate subjects from the current script and register the new ones.
    ///
    /// Subjects whose names already exist are returned but not re-added, so
    /// a re-run never clobbers manual edits.
    pub fn generate_subjects_from_script(&mut self) -> Result<Vec<Subject>, EngineError> {
        let parsed = self.composer.generate_subjects(&self.composition.current().script)?;
        for subject in &parsed {
            if !self.subjects.contains(&subject.name) {
                self.subjects.add(subject.clone())?;
            }
        }
        Ok(parsed)
    }

    /// Deterministic shot list for the current script (no backend call).
    pub fn analyze_current_script(
        &self,
        style: &DirectorStyle,
    ) -> Result<ScriptAnalysis, EngineError> {
        Ok(analyze_script(&self.composition.current().script, style)?)
    }

    /// As `analyze_current_script`, with a saved director style by name.
    pub fn analyze_current_script_as(
        &self,
        style_name: &str,
    ) -> Result<ScriptAnalysis, EngineError> {
        let style = self
            .director_styles
            .get(style_name)
            .ok_or_else(|| RegistryError::NotFound(style_name.to_string()))?;
        self.analyze_current_script(style)
    }

    /// Capture the named fields of the current snapshot as a template.
    pub fn save_template(
        &mut self,
        name: &str,
        field_names: &[&str],
    ) -> Result<(), EngineError> {
        let template = Template::from_snapshot(name, self.composition.current(), field_names);
        self.templates.upsert(template)?;
        Ok(())
    }

    /// Pre-fill the composition from a saved template (one undoable edit).
    pub fn apply_template(&mut self, name: &str) -> Result<(), EngineError> {
        let template = self
            .templates
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        self.composition.apply_template(&template);
        Ok(())
    }

    /// Install a loaded project snapshot, dropping all history.
    pub fn load_project(&mut self, snapshot: CompositionSnapshot) {
        self.composition.reset(snapshot);
    }

    /// Full prompt history, in append order.
    pub fn prompt_history(&self) -> Result<Vec<PromptLogEntry>, EngineError> {
        Ok(self.log.read_all()?)
    }

    /// Prompt history within a window, most-recent-first.
    pub fn recent_prompts(&self, window: Duration) -> Result<Vec<PromptLogEntry>, EngineError> {
        Ok(self.log.read_recent(window)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::fields;
    use crate::testing::{FakeBackend, MemoryPromptLog, MemoryStore};

    const THREE_PARAGRAPHS: &str = "short one\n\nmedium two\n\nlong three";

    fn engine(backend: FakeBackend) -> Engine {
        Engine::with_collaborators(
            &EngineConfig::default(),
            Arc::new(backend),
            Arc::new(MemoryStore::default()),
            Arc::new(MemoryPromptLog::default()),
        )
        .unwrap()
    }

    #[test]
    fn compose_current_uses_only_active_subjects() {
        let mut engine = engine(FakeBackend::with_response(THREE_PARAGRAPHS));
        engine.subjects.add(Subject::new("Maya", Default::default(), "detective")).unwrap();
        engine.subjects.add(Subject::new("Frank", Default::default(), "drifter")).unwrap();
        engine.subjects.set_active("Maya", true).unwrap();

        engine.compose_current(LengthTargets::default()).unwrap();

        let history = engine.prompt_history().unwrap();
        assert!(history[0].request.subject_block.contains("Maya"));
        assert!(!history[0].request.subject_block.contains("Frank"));
    }

    #[test]
    fn derive_style_suffix_persists_onto_the_style() {
        let mut engine = engine(FakeBackend::with_response("neon; rain; smoke"));
        engine.styles.add(Style::new("Noir", "black and white")).unwrap();

        let suffix = engine.derive_style_suffix("Noir").unwrap();

        assert_eq!(suffix, "neon; rain; smoke");
        assert_eq!(engine.styles.get("Noir").unwrap().suffix, "neon; rain; smoke");
    }

    #[test]
    fn derive_style_suffix_for_unknown_style_fails() {
        let mut engine = engine(FakeBackend::with_response("x; y; z"));
        let err = engine.derive_style_suffix("Missing").unwrap_err();
        assert!(matches!(err, EngineError::Registry(RegistryError::NotFound(_))));
    }

    #[test]
    fn generated_subjects_skip_existing_names() {
        let mut engine = engine(FakeBackend::with_response(
            "Name: Maya\nCategory: Main Character\nDescription: From the backend.",
        ));
        engine
            .subjects
            .add(Subject::new("Maya", Default::default(), "hand-written description"))
            .unwrap();
        engine.composition.set_script("Maya: hello.");

        let parsed = engine.generate_subjects_from_script().unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(engine.subjects.len(), 1);
        assert_eq!(engine.subjects.get("Maya").unwrap().description, "hand-written description");
    }

    #[test]
    fn template_round_trip_through_the_engine() {
        let mut engine = engine(FakeBackend::with_response(THREE_PARAGRAPHS));
        engine.composition.set_camera("Close-up", "Dolly in");
        engine.save_template("tight", &[fields::CAMERA_SHOT, fields::CAMERA_MOVE]).unwrap();

        engine.composition.set_camera("Wide", "Static");
        engine.apply_template("tight").unwrap();

        assert_eq!(engine.composition.current().camera_shot, "Close-up");
        // One undo steps back over the whole template application.
        engine.composition.undo();
        assert_eq!(engine.composition.current().camera_shot, "Wide");
    }

    #[test]
    fn saved_director_styles_drive_script_analysis() {
        let mut engine = engine(FakeBackend::with_response(THREE_PARAGRAPHS));
        let mut noir = DirectorStyle::new("noir");
        noir.motifs = Some("venetian shadows".to_string());
        engine.director_styles.add(noir).unwrap();
        engine.composition.set_script("Maya: It's quiet.");

        let analysis = engine.analyze_current_script_as("noir").unwrap();
        assert!(analysis.scenes[0].shots[2].description.contains("venetian shadows"));

        let err = engine.analyze_current_script_as("unknown").unwrap_err();
        assert!(matches!(err, EngineError::Registry(RegistryError::NotFound(_))));
    }

    #[test]
    fn load_project_clears_history() {
        let mut engine = engine(FakeBackend::with_response(THREE_PARAGRAPHS));
        engine.composition.set_shot_description("draft");

        let mut snapshot = CompositionSnapshot::default();
        snapshot.shot_description = "loaded".to_string();
        engine.load_project(snapshot);

        assert!(!engine.composition.can_undo());
        assert_eq!(engine.composition.current().shot_description, "loaded");
    }

    #[test]
    fn assembly_failure_leaves_composition_usable() {
        let mut engine = engine(FakeBackend::failing());
        engine.composition.set_shot_description("before failure");

        assert!(engine.compose_current(LengthTargets::default()).is_err());

        // State and history are intact after the error.
        assert_eq!(engine.composition.current().shot_description, "before failure");
        engine.composition.undo();
        assert_eq!(engine.composition.current().shot_description, "");
        assert!(engine.prompt_history().unwrap().is_empty());
    }
}
