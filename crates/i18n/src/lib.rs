use std::collections::BTreeMap;

use core_types::UiLanguage;

#[derive(Debug, Clone)]
pub struct I18n {
    lang: UiLanguage,
    zh_cn: BTreeMap<&'static str, &'static str>,
    en_us: BTreeMap<&'static str, &'static str>,
}

impl I18n {
    pub fn new(lang: UiLanguage) -> Self {
        Self {
            lang,
            zh_cn: zh_cn_map(),
            en_us: en_us_map(),
        }
    }

    pub fn set_language(&mut self, lang: UiLanguage) {
        self.lang = lang;
    }

    pub fn language(&self) -> UiLanguage {
        self.lang
    }

    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        match self.lang {
            UiLanguage::ZhCn => self
                .zh_cn
                .get(key)
                .copied()
                .or_else(|| self.en_us.get(key).copied())
                .unwrap_or(key),
            UiLanguage::EnUs => self
                .en_us
                .get(key)
                .copied()
                .or_else(|| self.zh_cn.get(key).copied())
                .unwrap_or(key),
        }
    }

    /// Looks `key` up and replaces every `{}` with `arg`.
    pub fn t_with(&self, key: &str, arg: &str) -> String {
        self.t(key).replace("{}", arg)
    }
}

fn zh_cn_map() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("app.title", "翻译器"),
        ("app.caption", "由 Google 翻译后端提供的即时翻译。"),
        ("form.source", "源语言"),
        ("form.target", "目标语言"),
        ("form.input", "输入文本"),
        ("form.output", "译文"),
        ("status.pending", "正在翻译为 {}…"),
        ("status.swapped", "已交换语言和文本"),
        ("warn.empty_input", "请输入一些文本。"),
        ("warn.unknown_language", "未知语言：{}"),
        ("warn.auto_target", "目标语言不能设为自动检测"),
        ("error.prefix", "⚠️ 错误：{}"),
        ("error.catalog", "无法加载语言列表：{}"),
        (
            "help.commands",
            "命令：:from <语言|auto>  :to <语言>  :swap  :go  :langs [过滤]  :show  :clear  :help  :quit\n直接输入文本追加到输入框，空行开始翻译。",
        ),
    ])
}

fn en_us_map() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("app.title", "Translator"),
        (
            "app.caption",
            "Instant translations using the Google Translate backend.",
        ),
        ("form.source", "Source Language"),
        ("form.target", "Target Language"),
        ("form.input", "Enter text"),
        ("form.output", "Translation"),
        ("status.pending", "Translating into {}..."),
        ("status.swapped", "Languages and texts swapped"),
        ("warn.empty_input", "Please enter some text."),
        ("warn.unknown_language", "Unknown language: {}"),
        (
            "warn.auto_target",
            "Auto-detect is only available for the source language",
        ),
        ("error.prefix", "⚠️ Error: {}"),
        ("error.catalog", "Could not load the language list: {}"),
        (
            "help.commands",
            "Commands: :from <language|auto>  :to <language>  :swap  :go  :langs [filter]  :show  :clear  :help  :quit\nType text to append it to the input; an empty line translates.",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_chinese_translation() {
        let i18n = I18n::new(UiLanguage::ZhCn);
        assert_eq!(i18n.t("form.source"), "源语言");
        assert_eq!(i18n.t("warn.empty_input"), "请输入一些文本。");
    }

    #[test]
    fn falls_back_to_key_when_missing() {
        let i18n = I18n::new(UiLanguage::EnUs);
        assert_eq!(i18n.t("not.exists"), "not.exists");
    }

    #[test]
    fn substitutes_argument() {
        let mut i18n = I18n::new(UiLanguage::EnUs);
        assert_eq!(i18n.t_with("status.pending", "Urdu"), "Translating into Urdu...");
        i18n.set_language(UiLanguage::ZhCn);
        assert_eq!(i18n.language(), UiLanguage::ZhCn);
        assert_eq!(i18n.t_with("status.pending", "Urdu"), "正在翻译为 Urdu…");
    }

    #[test]
    fn both_tables_cover_the_same_keys() {
        let zh: Vec<_> = zh_cn_map().into_keys().collect();
        let en: Vec<_> = en_us_map().into_keys().collect();
        assert_eq!(zh, en);
    }
}
