//! Prompt assembly pipeline: builds the backend request from a composition
//! snapshot, makes the single backend call, derives the three variants, and
//! records the invocation in the prompt log.

use std::sync::Arc;

use crate::domain::{
    ComposedPrompts, CompositionSnapshot, LengthTargets, PromptGenerationError, PromptLogEntry,
    PromptRequest, ScriptAnalysisError, Subject, parse_subject_blocks, render_request,
};
use crate::ports::{GenerationRequest, PromptLogSink, TextGenBackend};

/// Temperature used for the auxiliary calls (style suffix, subject
/// generation), which carry no composition snapshot of their own.
const AUXILIARY_TEMPERATURE: f32 = 0.7;

const SUBJECT_GENERATION_INSTRUCTION: &str = "\
Read the script below and list every distinct character, location, and \
significant object. For each one output a block of lines in exactly this form:

Name: <name>
Category: <Main Character, Supporting Character, Location, or Object>
Description: <one or two sentences>

Script:
";

/// Stateless pipeline over an injected backend and log sink.
///
/// Exactly one backend call per logical operation; retries, if any, belong
/// to the backend adapter. A failed call leaves the prompt log untouched.
pub struct PromptComposer {
    backend: Arc<dyn TextGenBackend>,
    log: Arc<dyn PromptLogSink>,
}

impl PromptComposer {
    pub fn new(backend: Arc<dyn TextGenBackend>, log: Arc<dyn PromptLogSink>) -> Self {
        Self { backend, log }
    }

    /// Assemble the three-tier prompt artifact for a snapshot.
    ///
    /// The log entry is appended only after the backend call fully
    /// resolves, with the exact request and the labelled outputs.
    pub fn compose(
        &self,
        snapshot: &CompositionSnapshot,
        active_subjects: &[Subject],
        targets: LengthTargets,
    ) -> Result<ComposedPrompts, PromptGenerationError> {
        let request = PromptRequest::from_snapshot(snapshot, active_subjects, targets);
        let prompt = render_request(&request)?;

        let text = self.backend.generate(&GenerationRequest {
            prompt,
            temperature: request.temperature,
        })?;

        let prompts = ComposedPrompts::from_response(&text);

        let entry = PromptLogEntry::new(request, prompts.as_log_map());
        self.log.write(&entry).map_err(PromptGenerationError::Log)?;

        Ok(prompts)
    }

    /// One backend call asking for exactly three visual descriptors for a
    /// style prefix. The response is stored verbatim; the descriptor count
    /// is deliberately not validated.
    pub fn derive_style_suffix(&self, prefix: &str) -> Result<String, PromptGenerationError> {
        let prompt = format!(
            "List exactly three visual descriptors, separated by commas or semicolons, \
             that define the \"{prefix}\" style for an AI image generator. \
             Respond with the descriptors only."
        );
        let text = self.backend.generate(&GenerationRequest {
            prompt,
            temperature: AUXILIARY_TEMPERATURE,
        })?;
        Ok(text.trim().to_string())
    }

    /// One backend call producing Name/Category/Description blocks for a
    /// script, parsed tolerantly into subjects.
    pub fn generate_subjects(
        &self,
        script_text: &str,
    ) -> Result<Vec<Subject>, ScriptAnalysisError> {
        let prompt = format!("{SUBJECT_GENERATION_INSTRUCTION}{script_text}");
        let text = self.backend.generate(&GenerationRequest {
            prompt,
            temperature: AUXILIARY_TEMPERATURE,
        })?;
        Ok(parse_subject_blocks(&text))
    }
}
