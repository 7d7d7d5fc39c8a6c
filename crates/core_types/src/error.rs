use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("language catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("please enter some text")]
    EmptyInput,
    #[error("translation failed: {0}")]
    TranslationFailed(String),
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),
    #[error("auto-detect is only available for the source language")]
    AutoDetectTarget,
}

impl FormError {
    /// Warnings are user-correctable and leave the form untouched.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::UnknownLanguage(_) | Self::AutoDetectTarget
        )
    }
}
