use uuid::Uuid;

use crate::{FormError, Language, LanguageCatalog};

pub type SessionId = Uuid;

pub const AUTO_DETECT_CODE: &str = "auto";
pub const AUTO_DETECT_LABEL: &str = "Auto-detect";
pub const DEFAULT_TARGET: &str = "Urdu";
pub const DEFAULT_SWAP_FALLBACK: &str = "English";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    AutoDetect,
    Language(Language),
}

impl SourceSelection {
    pub fn label(&self) -> &str {
        match self {
            Self::AutoDetect => AUTO_DETECT_LABEL,
            Self::Language(language) => language.name(),
        }
    }

    /// Code sent to the backend: `"auto"` or the selected language's code.
    pub fn code(&self) -> &str {
        match self {
            Self::AutoDetect => AUTO_DETECT_CODE,
            Self::Language(language) => language.code(),
        }
    }
}

fn is_auto_detect_query(query: &str) -> bool {
    let query = query.trim();
    query.eq_ignore_ascii_case(AUTO_DETECT_LABEL) || query.eq_ignore_ascii_case(AUTO_DETECT_CODE)
}

/// Per-session form. The target is a [`Language`], so it can never be the
/// auto-detect sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub session_id: SessionId,
    pub source: SourceSelection,
    pub target: Language,
    pub input_text: String,
    pub output_text: String,
}

impl FormState {
    pub fn init(catalog: &LanguageCatalog) -> Self {
        Self::init_with(catalog, DEFAULT_TARGET)
    }

    /// Starts on auto-detect, targeting `preferred_target` when the catalog
    /// has it and the first language otherwise.
    pub fn init_with(catalog: &LanguageCatalog, preferred_target: &str) -> Self {
        Self {
            session_id: SessionId::new_v4(),
            source: SourceSelection::AutoDetect,
            target: catalog.language_or_first(preferred_target),
            input_text: String::new(),
            output_text: String::new(),
        }
    }

    pub fn resolve_source_code(&self) -> &str {
        self.source.code()
    }

    pub fn has_input(&self) -> bool {
        !self.input_text.trim().is_empty()
    }
}

/// User interactions that move the form from one state to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SelectSource(String),
    SelectTarget(String),
    EditInput(String),
    Swap,
    Translate,
}

pub fn swap(state: &FormState, catalog: &LanguageCatalog) -> FormState {
    swap_with_fallback(state, catalog, DEFAULT_SWAP_FALLBACK)
}

/// Exchanges languages and texts. Swapping away from auto-detect targets
/// `fallback` (or the first catalog language if `fallback` is unknown), so a
/// double swap only restores the original form when the source was concrete.
pub fn swap_with_fallback(
    state: &FormState,
    catalog: &LanguageCatalog,
    fallback: &str,
) -> FormState {
    let target = match &state.source {
        SourceSelection::Language(language) => language.clone(),
        SourceSelection::AutoDetect => catalog.language_or_first(fallback),
    };

    FormState {
        session_id: state.session_id,
        source: SourceSelection::Language(state.target.clone()),
        target,
        input_text: state.output_text.clone(),
        output_text: state.input_text.clone(),
    }
}

/// Applies a synchronous event. `Swap` away from auto-detect targets
/// `swap_fallback`. `Translate` needs the backend and is left to the
/// orchestrator, so it returns the state unchanged here.
pub fn reduce(
    state: &FormState,
    event: &FormEvent,
    catalog: &LanguageCatalog,
    swap_fallback: &str,
) -> Result<FormState, FormError> {
    let mut next = state.clone();
    match event {
        FormEvent::SelectSource(query) => {
            next.source = if is_auto_detect_query(query) {
                SourceSelection::AutoDetect
            } else {
                let language = catalog
                    .find(query)
                    .ok_or_else(|| FormError::UnknownLanguage(query.trim().to_string()))?;
                SourceSelection::Language(language)
            };
        }
        FormEvent::SelectTarget(query) => {
            if is_auto_detect_query(query) {
                return Err(FormError::AutoDetectTarget);
            }
            next.target = catalog
                .find(query)
                .ok_or_else(|| FormError::UnknownLanguage(query.trim().to_string()))?;
        }
        FormEvent::EditInput(text) => next.input_text = text.clone(),
        FormEvent::Swap => next = swap_with_fallback(state, catalog, swap_fallback),
        FormEvent::Translate => {}
    }
    Ok(next)
}
