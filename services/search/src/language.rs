//! Language whitelist for the search configuration
//!
//! Every user-supplied language value passes through this closed set
//! before it can influence a query. The mapped text-search configuration
//! is bound as a SQL parameter, never interpolated, and must match the
//! mapping applied by the storage trigger that derives `content_tsv`.

/// Closed set of indexed languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Danish,
}

impl Language {
    /// Map a raw query parameter to a supported language. Anything
    /// unrecognized falls back to English rather than reaching the query
    /// layer.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("da") => Language::Danish,
            _ => Language::English,
        }
    }

    /// Two-letter code stored in `pages.language`.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Danish => "da",
        }
    }

    /// PostgreSQL text-search configuration name.
    pub fn ts_config(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Danish => "danish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_supported_languages() {
        assert_eq!(Language::from_param(Some("en")), Language::English);
        assert_eq!(Language::from_param(Some("da")), Language::Danish);
    }

    #[test]
    fn missing_language_defaults_to_english() {
        assert_eq!(Language::from_param(None), Language::English);
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(Language::from_param(Some("xx")), Language::English);
        assert_eq!(Language::from_param(Some("en; DROP TABLE pages")), Language::English);
    }

    #[test]
    fn configs_match_the_storage_trigger() {
        assert_eq!(Language::English.ts_config(), "english");
        assert_eq!(Language::Danish.ts_config(), "danish");
    }
}
