use std::sync::Arc;

use core_types::{
    DEFAULT_SWAP_FALLBACK, DEFAULT_TARGET, FormError, FormEvent, FormState, Language,
    LanguageCatalog, SessionId, TranslationBackend, reduce, swap_with_fallback,
};
use tracing::{debug, info, warn};

/// A validated translate request, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub session_id: SessionId,
    pub text: String,
    pub source_code: String,
    pub target: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Updated,
    Translated(String),
}

/// Drives form sessions against one shared catalog and backend.
pub struct Orchestrator {
    backend: Arc<dyn TranslationBackend>,
    catalog: Arc<LanguageCatalog>,
    default_target: String,
    swap_fallback: String,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn TranslationBackend>, catalog: Arc<LanguageCatalog>) -> Self {
        Self {
            backend,
            catalog,
            default_target: DEFAULT_TARGET.to_string(),
            swap_fallback: DEFAULT_SWAP_FALLBACK.to_string(),
        }
    }

    /// Builds the catalog from `backend` and wraps both.
    pub async fn bootstrap(backend: Arc<dyn TranslationBackend>) -> Result<Self, FormError> {
        let catalog = LanguageCatalog::build(backend.as_ref()).await?;
        Ok(Self::new(backend, Arc::new(catalog)))
    }

    pub fn with_default_target(mut self, name: impl Into<String>) -> Self {
        self.default_target = name.into();
        self
    }

    pub fn with_swap_fallback(mut self, name: impl Into<String>) -> Self {
        self.swap_fallback = name.into();
        self
    }

    pub fn catalog(&self) -> &Arc<LanguageCatalog> {
        &self.catalog
    }

    pub fn new_session(&self) -> FormState {
        let state = FormState::init_with(&self.catalog, &self.default_target);
        info!(
            session = %state.session_id,
            target_lang = state.target.name(),
            "form session started"
        );
        state
    }

    pub fn swap(&self, state: &mut FormState) {
        *state = swap_with_fallback(state, &self.catalog, &self.swap_fallback);
        debug!(
            session = %state.session_id,
            source = state.source.label(),
            target_lang = state.target.name(),
            "languages swapped"
        );
    }

    /// Validating step: rejects blank input before anything leaves the process.
    pub fn prepare(&self, state: &FormState) -> Result<TranslationJob, FormError> {
        if !state.has_input() {
            debug!(session = %state.session_id, "translate skipped: empty input");
            return Err(FormError::EmptyInput);
        }
        Ok(TranslationJob {
            session_id: state.session_id,
            text: state.input_text.clone(),
            source_code: state.resolve_source_code().to_string(),
            target: state.target.clone(),
        })
    }

    /// Calling step. No retries; the first failure is returned.
    pub async fn execute(&self, job: &TranslationJob) -> Result<String, FormError> {
        debug!(
            session = %job.session_id,
            source = %job.source_code,
            target_lang = job.target.code(),
            chars = job.text.chars().count(),
            "calling translation backend"
        );
        self.backend
            .translate(&job.text, &job.source_code, job.target.code())
            .await
            .map_err(|err| {
                let detail = format!("{err:#}");
                warn!(session = %job.session_id, error = %detail, "translation failed");
                FormError::TranslationFailed(detail)
            })
    }

    pub fn apply(&self, state: &mut FormState, translated: &str) {
        state.output_text = translated.to_string();
        debug!(session = %state.session_id, "translation applied");
    }

    /// Runs validate, call and commit. On any error `state` is left as it was.
    pub async fn translate(&self, state: &mut FormState) -> Result<String, FormError> {
        let job = self.prepare(state)?;
        let translated = self.execute(&job).await?;
        self.apply(state, &translated);
        Ok(translated)
    }

    pub async fn dispatch(
        &self,
        state: &mut FormState,
        event: FormEvent,
    ) -> Result<EventOutcome, FormError> {
        match event {
            FormEvent::Translate => {
                let translated = self.translate(state).await?;
                Ok(EventOutcome::Translated(translated))
            }
            FormEvent::Swap => {
                self.swap(state);
                Ok(EventOutcome::Updated)
            }
            other => {
                *state = reduce(state, &other, &self.catalog, &self.swap_fallback)?;
                Ok(EventOutcome::Updated)
            }
        }
    }
}
