//! Language selection and localized string bundles.
//!
//! Bundles are read from `.lang` files: one `key=value` pair per line,
//! where the key is a dotted identifier such as `tree.getting_started.cards`.
//! Lines that do not match are ignored.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+(?:\.\w+)*)=(.*)").expect("valid lang entry pattern")
});

const EN_US_LANG: &str = include_str!("../lang/en_US.lang");
const FR_FR_LANG: &str = include_str!("../lang/fr_FR.lang");
const EO_LANG: &str = include_str!("../lang/eo.lang");

/// Languages the help content is written in.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    #[value(name = "en_US", alias = "en")]
    English,
    #[value(name = "fr_FR", alias = "fr")]
    French,
    #[value(name = "eo")]
    Esperanto,
}

impl Language {
    pub const ALL: [Self; 3] = [Self::English, Self::French, Self::Esperanto];

    /// Language code, also used as the directory name of its pages.
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en_US",
            Self::French => "fr_FR",
            Self::Esperanto => "eo",
        }
    }

    /// Name of the language, written in that language.
    pub const fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::French => "Français",
            Self::Esperanto => "Esperanto",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// The language after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    const fn embedded_source(self) -> &'static str {
        match self {
            Self::English => EN_US_LANG,
            Self::French => FR_FR_LANG,
            Self::Esperanto => EO_LANG,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to read language file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Localized strings keyed by dotted identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    entries: HashMap<String, String>,
}

impl Bundle {
    /// Parse the contents of a `.lang` file.
    pub fn parse(source: &str) -> Self {
        let entries = source
            .lines()
            .filter_map(|line| {
                let caps = ENTRY_PATTERN.captures(line)?;
                let value = caps[2].trim_end_matches('\r').to_string();
                Some((caps[1].to_string(), value))
            })
            .collect();
        Self { entries }
    }

    /// Bundle compiled into the binary for `lang`, with English filling
    /// in any key the translation lacks.
    pub fn for_language(lang: Language) -> Self {
        let bundle = Self::parse(lang.embedded_source());
        if lang == Language::default() {
            bundle
        } else {
            bundle.with_fallback(&Self::parse(Language::default().embedded_source()))
        }
    }

    /// Load a bundle from a `.lang` file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Read`] if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, BundleError> {
        let content = std::fs::read_to_string(path).map_err(|source| BundleError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Bundle for `lang`, read from `<dir>/<code>.lang` when an override
    /// directory is given and holds that file. The embedded bundle fills
    /// every key the file lacks.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Read`] if the override file exists but
    /// cannot be read.
    pub fn load(lang: Language, dir: Option<&Path>) -> Result<Self, BundleError> {
        let embedded = Self::for_language(lang);
        let Some(path) = dir.map(|dir| dir.join(format!("{}.lang", lang.code()))) else {
            return Ok(embedded);
        };
        if !path.exists() {
            debug!(path = %path.display(), "no override bundle, using embedded labels");
            return Ok(embedded);
        }
        Ok(Self::from_file(&path)?.with_fallback(&embedded))
    }

    /// Fill keys missing from this bundle with values from `fallback`.
    #[must_use]
    pub fn with_fallback(mut self, fallback: &Self) -> Self {
        for (key, value) in &fallback.entries {
            self.entries
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value for `key`, or the key itself when it is missing.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reads_dotted_keys() {
        let bundle = Bundle::parse("tree.getting_started.cards=Identity cards\nbutton.home=Home\n");
        assert_eq!(bundle.get("tree.getting_started.cards"), Some("Identity cards"));
        assert_eq!(bundle.get("button.home"), Some("Home"));
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_parse_ignores_lines_without_entries() {
        let bundle = Bundle::parse("# comment\n\n=orphan\nkey=value\n");
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.get("key"), Some("value"));
    }

    #[test]
    fn test_parse_keeps_equals_in_value_and_last_duplicate_wins() {
        let bundle = Bundle::parse("a.b=x=y\na.b=second\n");
        assert_eq!(bundle.get("a.b"), Some("second"));
        let bundle = Bundle::parse("a.b=x=y\n");
        assert_eq!(bundle.get("a.b"), Some("x=y"));
    }

    #[test]
    fn test_parse_strips_carriage_returns() {
        let bundle = Bundle::parse("tree.legal=Legal\r\n");
        assert_eq!(bundle.get("tree.legal"), Some("Legal"));
    }

    #[test]
    fn test_text_falls_back_to_key() {
        let bundle = Bundle::default();
        assert_eq!(bundle.text("tree.unknown"), "tree.unknown");
    }

    #[test]
    fn test_embedded_bundles_cover_tree_labels() {
        for lang in Language::ALL {
            let bundle = Bundle::for_language(lang);
            for key in ["tree.overview", "tree.getting_started.cards.add", "button.home"] {
                assert!(bundle.get(key).is_some(), "{} missing {key}", lang.code());
            }
        }
    }

    #[test]
    fn test_translation_overrides_fallback() {
        let fr = Bundle::for_language(Language::French);
        let en = Bundle::for_language(Language::English);
        assert_ne!(fr.get("tree.getting_started.links"), en.get("tree.getting_started.links"));
    }

    #[test]
    fn test_with_fallback_only_fills_missing_keys() {
        let primary = Bundle::parse("a=un\n");
        let fallback = Bundle::parse("a=one\nb=two\n");
        let merged = primary.with_fallback(&fallback);
        assert_eq!(merged.get("a"), Some("un"));
        assert_eq!(merged.get("b"), Some("two"));
    }

    #[test]
    fn test_from_file_reads_disk_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xx.lang");
        std::fs::write(&path, "button.home=Hejmo\n").unwrap();
        let bundle = Bundle::from_file(&path).unwrap();
        assert_eq!(bundle.get("button.home"), Some("Hejmo"));
    }

    #[test]
    fn test_from_file_reports_missing_file() {
        let err = Bundle::from_file(Path::new("/nonexistent/en_US.lang")).unwrap_err();
        assert!(err.to_string().contains("en_US.lang"));
    }

    #[test]
    fn test_load_prefers_override_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fr_FR.lang"), "button.home=Maison
").unwrap();
        let bundle = Bundle::load(Language::French, Some(dir.path())).unwrap();
        assert_eq!(bundle.get("button.home"), Some("Maison"));
        // Keys the file lacks come from the embedded French labels
        assert_eq!(
            bundle.get("browser.topics"),
            Bundle::for_language(Language::French).get("browser.topics")
        );
    }

    #[test]
    fn test_load_without_override_file_uses_embedded() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Bundle::load(Language::Esperanto, Some(dir.path())).unwrap(),
            Bundle::for_language(Language::Esperanto)
        );
        assert_eq!(
            Bundle::load(Language::English, None).unwrap(),
            Bundle::for_language(Language::English)
        );
    }

    #[test]
    fn test_load_reports_unreadable_override() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as text
        std::fs::create_dir(dir.path().join("en_US.lang")).unwrap();
        assert!(Bundle::load(Language::English, Some(dir.path())).is_err());
    }

    #[test]
    fn test_language_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("de_DE"), None);
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_next_language_wraps() {
        assert_eq!(Language::English.next(), Language::French);
        assert_eq!(Language::French.next(), Language::Esperanto);
        assert_eq!(Language::Esperanto.next(), Language::English);
    }
}
