use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::document::{self, Document};
use crate::i18n::{Bundle, Language};
use crate::pages::{HOME_PAGE, PageStore};
use crate::splitter::SplitPane;
use crate::topics::{TopicTree, TreeRow, TreeState};
use crate::ui::viewport::Viewport;
use crate::ui::{DOCUMENT_LEFT_PADDING, PaneGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Pane that receives keyboard navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Tree,
    Document,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Language pages and labels are requested in
    pub language: Language,
    /// Labels for `language`, English filling the gaps
    pub bundle: Bundle,
    /// Directory of `.lang` files read instead of the built-in labels
    pub lang_dir: Option<PathBuf>,
    pub tree: TopicTree,
    pub tree_state: TreeState,
    /// Rows of the navigation tree currently visible
    pub tree_rows: Vec<TreeRow>,
    /// Selected row index into `tree_rows`
    pub tree_selected: Option<usize>,
    /// Scroll offset of the navigation tree
    pub tree_scroll_offset: usize,
    pub pages: PageStore,
    /// Topic id of the page on screen
    pub current_id: String,
    pub current_title: String,
    /// Language the page on screen is written in
    pub served_language: Language,
    /// The page on screen, wrapped to the document pane
    pub document: Document,
    /// Viewport managing scroll position
    pub viewport: Viewport,
    /// Resizable layout of the tree pane and the document pane
    pub splitter: SplitPane<PaneGeometry>,
    pub focus: Focus,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// URL currently hovered in the document pane
    pub hovered_link_url: Option<String>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    pub terminal_width: u16,
    pub terminal_height: u16,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
}

impl Model {
    /// Load the embedded topics and pages and open the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded topic tree or a page is malformed,
    /// or if the split layout cannot be set up.
    pub fn new(
        language: Language,
        terminal_size: (u16, u16),
        left_width: u16,
        min_left_width: u16,
    ) -> Result<Self> {
        let (width, height) = terminal_size;
        let tree = TopicTree::embedded().context("loading the topic tree")?;
        let pages = PageStore::embedded().context("loading help pages")?;
        let splitter = SplitPane::initialize(
            PaneGeometry::new(width, left_width),
            i32::from(min_left_width),
        )
        .context("setting up the split layout")?;

        let mut model = Self {
            language,
            bundle: Bundle::for_language(language),
            tree,
            pages,
            splitter,
            terminal_width: width,
            terminal_height: height,
            ..Self::default()
        };
        model.refresh_tree_rows();
        model.tree_selected = (!model.tree_rows.is_empty()).then_some(0);
        model.open_topic(HOME_PAGE);
        Ok(model)
    }

    /// Rows available to the document pane and the tree pane.
    pub(super) const fn main_height(&self) -> u16 {
        self.terminal_height.saturating_sub(1)
    }

    /// Tree rows that fit inside the tree pane border.
    pub(super) const fn tree_visible_rows(&self) -> usize {
        self.main_height().saturating_sub(2) as usize
    }

    /// Columns pages are wrapped to: the document pane minus its padding.
    pub fn document_width(&self) -> u16 {
        let right = self.splitter.layout().right_width().max(0);
        u16::try_from(right)
            .unwrap_or(u16::MAX)
            .saturating_sub(DOCUMENT_LEFT_PADDING)
            .max(1)
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.tree_selected.and_then(|idx| self.tree_rows.get(idx))
    }

    pub(super) fn refresh_tree_rows(&mut self) {
        let selected_id = self.selected_row().map(|row| row.id.clone());
        self.tree_rows = self.tree_state.visible_rows(&self.tree);
        if self.tree_rows.is_empty() {
            self.tree_selected = None;
        } else {
            let kept = selected_id
                .and_then(|id| self.tree_rows.iter().position(|row| row.id == id));
            let fallback = self
                .tree_selected
                .map(|idx| idx.min(self.tree_rows.len() - 1));
            self.tree_selected = kept.or(fallback);
        }
        self.tree_scroll_offset = self
            .tree_scroll_offset
            .min(self.max_tree_scroll_offset());
    }

    pub(super) fn max_tree_scroll_offset(&self) -> usize {
        self.tree_rows
            .len()
            .saturating_sub(self.tree_visible_rows())
    }

    pub(super) fn ensure_tree_selection_visible(&mut self) {
        let Some(selected) = self.tree_selected else {
            return;
        };
        let visible = self.tree_visible_rows();
        if selected < self.tree_scroll_offset {
            self.tree_scroll_offset = selected;
        } else if visible > 0 && selected >= self.tree_scroll_offset + visible {
            self.tree_scroll_offset = selected + 1 - visible;
        }
    }

    /// Show topic `id` in the current language, revealing it in the tree.
    ///
    /// Unknown ids leave the current page on screen and raise a toast.
    pub(super) fn open_topic(&mut self, id: &str) {
        let page = match self.pages.get(self.language, id) {
            Ok(page) => page.clone(),
            Err(err) => {
                warn!(topic = id, "{err}");
                self.show_toast(ToastLevel::Error, err.to_string());
                return;
            }
        };
        debug!(
            topic = id,
            language = page.language.code(),
            "opening help page"
        );

        let width = self.document_width();
        self.document = document::render_page(&page, width);
        self.viewport = Viewport::new(self.main_height(), self.document.line_count());
        self.current_id = page.id;
        self.current_title = page.title;
        self.served_language = page.language;
        self.hovered_link_url = None;

        self.tree_state.reveal(&self.tree, id);
        self.refresh_tree_rows();
        if let Some(idx) = self.tree_rows.iter().position(|row| row.id == id) {
            self.tree_selected = Some(idx);
            self.ensure_tree_selection_visible();
        }

        if self.served_language != self.language {
            let message = self.bundle.text("browser.fallback").to_string();
            self.show_toast(ToastLevel::Info, message);
        }
    }

    /// Read the labels for `language`, from the override directory when
    /// one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if an override file exists but cannot be read.
    pub fn load_bundle(&mut self, language: Language) -> Result<()> {
        self.bundle = Bundle::load(language, self.lang_dir.as_deref())
            .with_context(|| format!("loading {} labels", language.code()))?;
        Ok(())
    }

    /// Switch languages and reload the page on screen.
    ///
    /// Labels that cannot be read from the override directory fall back
    /// to the built-in ones.
    pub(super) fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Err(err) = self.load_bundle(language) {
            warn!("{err:#}");
            self.bundle = Bundle::for_language(language);
        }
        let offset = self.viewport.offset();
        let id = if self.current_id.is_empty() {
            HOME_PAGE.to_string()
        } else {
            self.current_id.clone()
        };
        self.open_topic(&id);
        self.viewport.go_to_line(offset);
    }

    /// Re-wrap the page after the document pane changed size.
    pub(super) fn reflow_layout(&mut self) {
        let width = self.document_width();
        if usize::from(width) != self.document.width()
            && let Ok(page) = self.pages.get(self.language, &self.current_id)
        {
            let top = self.viewport.offset();
            let total = self.document.line_count().max(1);
            self.document = document::render_page(page, width);
            // Keep roughly the same part of the page on screen
            let rescaled = top * self.document.line_count() / total;
            self.viewport
                .fit(self.main_height(), self.document.line_count());
            self.viewport.go_to_line(rescaled);
            return;
        }
        self.viewport
            .fit(self.main_height(), self.document.line_count());
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
