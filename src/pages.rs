//! Help pages compiled into the binary.
//!
//! Pages live in `help/<language code>/<topic id>.md`. The first line is
//! the page title written as a level-one heading, the rest is the body.
//! Translations are partial: a page missing in one language is served in
//! English instead.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::i18n::Language;

/// Id of the page shown when the help system opens.
pub const HOME_PAGE: &str = "index";

macro_rules! embed_pages {
    ($code:literal => [$($id:literal),* $(,)?]) => {
        &[$(($id, include_str!(concat!("../help/", $code, "/", $id, ".md")))),*]
    };
}

const EN_US_PAGES: &[(&str, &str)] = embed_pages!("en_US" => [
    "index",
    "overview",
    "getting_started",
    "getting_started.workbench",
    "getting_started.cards",
    "getting_started.cards.details",
    "getting_started.cards.add",
    "getting_started.cards.edit",
    "getting_started.cards.delete",
    "getting_started.links",
    "getting_started.links.details",
    "getting_started.links.add",
    "getting_started.links.edit",
    "getting_started.links.delete",
    "options",
    "options.languages",
    "options.colors",
    "legal",
]);

const FR_FR_PAGES: &[(&str, &str)] = embed_pages!("fr_FR" => [
    "index",
    "overview",
    "getting_started",
    "getting_started.cards",
    "getting_started.cards.details",
    "getting_started.cards.add",
    "getting_started.cards.edit",
    "getting_started.cards.delete",
    "getting_started.links",
    "getting_started.links.details",
    "getting_started.links.edit",
    "getting_started.links.delete",
    "options",
    "options.languages",
]);

const EO_PAGES: &[(&str, &str)] = embed_pages!("eo" => [
    "getting_started.cards",
    "getting_started.cards.add",
    "getting_started.cards.edit",
    "getting_started.links",
    "getting_started.links.add",
]);

const fn embedded_sources(lang: Language) -> &'static [(&'static str, &'static str)] {
    match lang {
        Language::English => EN_US_PAGES,
        Language::French => FR_FR_PAGES,
        Language::Esperanto => EO_PAGES,
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("page `{id}` ({language}) does not start with a `# ` title line")]
    MissingTitle { language: String, id: String },
    #[error("no help page named `{0}`")]
    NotFound(String),
}

/// One help page in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Language the page is written in
    pub language: Language,
}

impl Page {
    /// Split a page source into its title line and body.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::MissingTitle`] when the first line is not a
    /// level-one heading.
    pub fn parse(language: Language, id: &str, source: &str) -> Result<Self, PageError> {
        let source = source.trim_start_matches('\u{feff}');
        let (first, rest) = source.split_once('\n').unwrap_or((source, ""));
        let title = first
            .trim_end()
            .strip_prefix("# ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PageError::MissingTitle {
                language: language.code().to_string(),
                id: id.to_string(),
            })?;
        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            body: rest.trim_start_matches(['\r', '\n']).to_string(),
            language,
        })
    }

    /// Full markdown source, title included.
    pub fn markdown(&self) -> String {
        format!("# {}\n\n{}", self.title, self.body)
    }
}

/// All pages, indexed by language and topic id.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pages: HashMap<(Language, String), Page>,
}

impl PageStore {
    /// Pages compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded page is malformed.
    pub fn embedded() -> Result<Self, PageError> {
        let mut store = Self::default();
        for lang in Language::ALL {
            for (id, source) in embedded_sources(lang) {
                store.insert(Page::parse(lang, id, source)?);
            }
        }
        Ok(store)
    }

    pub fn insert(&mut self, page: Page) {
        self.pages.insert((page.language, page.id.clone()), page);
    }

    /// Page `id` in `lang`, or in English when it has not been translated.
    /// The returned page's `language` tells which one was served.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotFound`] when no language has the page.
    pub fn get(&self, lang: Language, id: &str) -> Result<&Page, PageError> {
        if let Some(page) = self.pages.get(&(lang, id.to_string())) {
            return Ok(page);
        }
        let fallback = Language::default();
        let page = self
            .pages
            .get(&(fallback, id.to_string()))
            .ok_or_else(|| PageError::NotFound(id.to_string()))?;
        if lang != fallback {
            debug!(page = id, language = lang.code(), "page not translated, using English");
        }
        Ok(page)
    }

    pub fn is_translated(&self, lang: Language, id: &str) -> bool {
        self.pages.contains_key(&(lang, id.to_string()))
    }
}
