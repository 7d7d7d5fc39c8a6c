mod backend;
mod catalog;
mod error;
mod form;

use serde::{Deserialize, Serialize};

pub use backend::TranslationBackend;
pub use catalog::{Language, LanguageCatalog, title_case};
pub use error::FormError;
pub use form::{
    AUTO_DETECT_CODE, AUTO_DETECT_LABEL, DEFAULT_SWAP_FALLBACK, DEFAULT_TARGET, FormEvent,
    FormState, SessionId, SourceSelection, reduce, swap, swap_with_fallback,
};

/// Language of the form's own labels and messages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UiLanguage {
    #[default]
    EnUs,
    ZhCn,
}
