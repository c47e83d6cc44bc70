//! Internationalization (i18n) module
//!
//! Selects the UI language for the wizard. Supports English and Chinese
//! Simplified. Log messages remain in English.

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    ChineseSimplified,
}

impl Language {
    /// Locale code registered with rust-i18n
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::ChineseSimplified => "zh-CN",
        }
    }

    /// Map a locale tag such as `zh_CN.UTF-8` or `en-US` to a language
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        if tag.starts_with("zh") || tag.contains("hans") || tag.contains("chinese") {
            Language::ChineseSimplified
        } else {
            Language::English
        }
    }
}

/// Detect the system language
pub fn detect_language() -> Language {
    sys_locale::get_locale()
        .map(|tag| Language::from_tag(&tag))
        .unwrap_or(Language::English)
}

/// Initialize the UI locale, preferring an explicit override
pub fn init_locale(preferred: Option<&str>) -> Language {
    let language = preferred
        .map(Language::from_tag)
        .unwrap_or_else(detect_language);
    rust_i18n::set_locale(language.code());
    language
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Language::from_tag("zh_CN.UTF-8"), Language::ChineseSimplified);
        assert_eq!(Language::from_tag("zh-Hans"), Language::ChineseSimplified);
        assert_eq!(Language::from_tag("en-US"), Language::English);
        assert_eq!(Language::from_tag("fr"), Language::English);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::ChineseSimplified.code(), "zh-CN");
    }
}
