use anyhow::Result;
use async_trait::async_trait;

/// Remote service that performs the actual translation.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Raw `(name, code)` pairs as the service reports them. Names are not
    /// normalized; the catalog takes care of display casing.
    async fn supported_languages(&self) -> Result<Vec<(String, String)>>;

    /// `source` is either a language code or `"auto"`.
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}
