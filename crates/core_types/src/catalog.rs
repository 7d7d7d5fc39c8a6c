use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::{FormError, TranslationBackend};

/// A catalog entry. Only a [`LanguageCatalog`] hands these out, so any
/// `Language` stored in form state is known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    name: String,
    code: String,
}

impl Language {
    fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Supported languages, built once per process and shared read-only.
///
/// `name_to_code` and `code_to_name` are kept bijective: entries whose display
/// name or code collides with an earlier one (in sorted order) are dropped.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    name_to_code: BTreeMap<String, String>,
    code_to_name: BTreeMap<String, String>,
    sorted_names: Vec<String>,
}

impl LanguageCatalog {
    pub async fn build(backend: &dyn TranslationBackend) -> Result<Self, FormError> {
        let pairs = backend
            .supported_languages()
            .await
            .map_err(|err| FormError::CatalogUnavailable(format!("{err:#}")))?;
        let catalog = Self::from_pairs(pairs)?;
        info!(languages = catalog.sorted_names.len(), "language catalog ready");
        Ok(catalog)
    }

    pub fn from_pairs<I, N, C>(pairs: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut normalized: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(name, code)| {
                (
                    title_case(name.as_ref().trim()),
                    code.as_ref().trim().to_owned(),
                )
            })
            .filter(|(name, code)| !name.is_empty() && !code.is_empty())
            .collect();
        // stable, so the first raw entry wins among equal display names
        normalized.sort_by(|a, b| a.0.cmp(&b.0));

        let mut name_to_code = BTreeMap::new();
        let mut code_to_name = BTreeMap::new();
        for (name, code) in normalized {
            if name_to_code.contains_key(&name) {
                warn!(%name, %code, "dropping duplicate language name");
                continue;
            }
            if let Some(existing) = code_to_name.get(&code) {
                warn!(%name, %code, %existing, "dropping language with duplicate code");
                continue;
            }
            code_to_name.insert(code.clone(), name.clone());
            name_to_code.insert(name, code);
        }

        if name_to_code.is_empty() {
            return Err(FormError::CatalogUnavailable(
                "backend reported no supported languages".to_string(),
            ));
        }

        let sorted_names = name_to_code.keys().cloned().collect();
        Ok(Self {
            name_to_code,
            code_to_name,
            sorted_names,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.sorted_names
    }

    /// `(name, code)` pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.name_to_code
            .iter()
            .map(|(name, code)| (name.as_str(), code.as_str()))
    }

    #[cfg(test)]
    fn code_for(&self, name: &str) -> Option<&str> {
        self.name_to_code.get(name).map(String::as_str)
    }

    #[cfg(test)]
    fn name_for(&self, code: &str) -> Option<&str> {
        self.code_to_name.get(code).map(String::as_str)
    }

    /// Looks a display name up, exact match first, then ignoring ASCII case.
    pub fn language(&self, name: &str) -> Option<Language> {
        let name = name.trim();
        if let Some(code) = self.name_to_code.get(name) {
            return Some(Language::new(name, code.as_str()));
        }
        self.name_to_code
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(name, code)| Language::new(name.as_str(), code.as_str()))
    }

    pub fn language_by_code(&self, code: &str) -> Option<Language> {
        let code = code.trim();
        if let Some(name) = self.code_to_name.get(code) {
            return Some(Language::new(name.as_str(), code));
        }
        self.code_to_name
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(code))
            .map(|(code, name)| Language::new(name.as_str(), code.as_str()))
    }

    /// Accepts either a display name or a language code.
    pub fn find(&self, query: &str) -> Option<Language> {
        self.language(query)
            .or_else(|| self.language_by_code(query))
    }

    /// Lexicographically first language.
    pub fn first(&self) -> Language {
        // non-empty by construction
        let name = &self.sorted_names[0];
        Language::new(name.as_str(), self.name_to_code[name].as_str())
    }

    /// `preferred` when present, otherwise [`Self::first`].
    pub fn language_or_first(&self, preferred: &str) -> Language {
        self.language(preferred).unwrap_or_else(|| self.first())
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"chinese (simplified)"` becomes `"Chinese (Simplified)"`.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for ch in raw.chars() {
        if in_word {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        in_word = ch.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    use super::*;

    fn sample() -> LanguageCatalog {
        LanguageCatalog::from_pairs([
            ("urdu", "ur"),
            ("english", "en"),
            ("chinese (simplified)", "zh-CN"),
            ("french", "fr"),
            ("haitian creole", "ht"),
        ])
        .expect("catalog")
    }

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("chinese (simplified)"), "Chinese (Simplified)");
        assert_eq!(title_case("haitian creole"), "Haitian Creole");
        assert_eq!(title_case("ENGLISH"), "English");
        assert_eq!(title_case("meiteilon (manipuri)"), "Meiteilon (Manipuri)");
    }

    #[test]
    fn names_are_sorted_and_title_cased() {
        let catalog = sample();
        assert_eq!(
            catalog.names(),
            [
                "Chinese (Simplified)",
                "English",
                "French",
                "Haitian Creole",
                "Urdu"
            ]
        );
    }

    #[test]
    fn name_code_mapping_round_trips() {
        let catalog = sample();
        for name in catalog.names() {
            let code = catalog.code_for(name).expect("code");
            assert_eq!(catalog.name_for(code), Some(name.as_str()));
        }
        for (name, code) in catalog.entries() {
            assert_eq!(catalog.code_for(name), Some(code));
        }
    }

    #[test]
    fn drops_colliding_names_and_codes() {
        let catalog = LanguageCatalog::from_pairs([
            ("filipino", "tl"),
            ("tagalog", "tl"),
            ("English", "en"),
            ("english", "en-GB"),
        ])
        .expect("catalog");
        assert_eq!(catalog.names(), ["English", "Filipino"]);
        assert_eq!(catalog.code_for("English"), Some("en"));
        assert_eq!(catalog.name_for("tl"), Some("Filipino"));
        assert_eq!(catalog.name_for("en-GB"), None);
    }

    #[test]
    fn empty_listing_is_unavailable() {
        let err = LanguageCatalog::from_pairs(Vec::<(String, String)>::new()).unwrap_err();
        assert!(matches!(err, FormError::CatalogUnavailable(_)));

        let err = LanguageCatalog::from_pairs([("  ", "xx"), ("klingon", "")]).unwrap_err();
        assert!(matches!(err, FormError::CatalogUnavailable(_)));
    }

    #[test]
    fn lookups_tolerate_case() {
        let catalog = sample();
        let urdu = catalog.language("urdu").expect("urdu");
        assert_eq!(urdu.name(), "Urdu");
        assert_eq!(urdu.code(), "ur");

        let chinese = catalog.find("zh-cn").expect("by code");
        assert_eq!(chinese.name(), "Chinese (Simplified)");
        assert_eq!(chinese.code(), "zh-CN");

        assert!(catalog.find("klingon").is_none());
    }

    #[test]
    fn falls_back_to_first_language() {
        let catalog = sample();
        assert_eq!(catalog.language_or_first("Urdu").name(), "Urdu");
        assert_eq!(
            catalog.language_or_first("Klingon").name(),
            "Chinese (Simplified)"
        );
    }

    struct Unreachable;

    #[async_trait]
    impl TranslationBackend for Unreachable {
        async fn supported_languages(&self) -> Result<Vec<(String, String)>> {
            Err(anyhow!("connection refused"))
        }

        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn unreachable_backend_fails_build() {
        let err = LanguageCatalog::build(&Unreachable).await.unwrap_err();
        assert_eq!(
            err,
            FormError::CatalogUnavailable("connection refused".to_string())
        );
    }
}
