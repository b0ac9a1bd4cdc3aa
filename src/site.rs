//! Static HTML rendition of the help.
//!
//! Every page shares one shell: a navigation tree on the left, the
//! `#splitter` divider, and the page content on the right. The shell loads
//! `splitter.js`, which drives the divider in the browser the same way
//! [`crate::splitter::SplitPane`] drives it in the terminal.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use comrak::{Options, markdown_to_html};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::i18n::{Bundle, BundleError, Language};
use crate::pages::{HOME_PAGE, Page, PageError, PageStore};
use crate::topics::{TopicError, TopicNode, TopicTree, href};

/// Title used when a page does not provide one.
pub const DEFAULT_TITLE: &str = "Jenealogio doc";

/// Asset prefix of the hosted copy of the help.
pub const DEPLOYED_ROOT: &str = "/products/jenealogio/help-doc";

/// Minimum width, in pixels, of the navigation panel.
pub const SITE_MIN_LEFT_WIDTH: i32 = 200;

/// Pictures of the menu buttons, relative to the site root.
const BUTTON_IMAGES: [&str; 2] = ["images/collapse.png", "images/home.png"];

static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[[^\]]*\]\(([^)\s]+)").expect("valid markdown image pattern")
});

const ASSETS: [(&str, &str); 3] = [
    ("style.css", include_str!("../assets/style.css")),
    ("treeview.css", include_str!("../assets/treeview.css")),
    ("splitter.js", include_str!("../assets/splitter.js")),
];

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Topics(#[from] TopicError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

/// How the shell is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    /// URL prefix of the shared assets, empty when browsing locally
    pub root: String,
    /// Whether to emit the tree menu and the home button
    pub with_menu: bool,
    /// Minimum navigation panel width passed to `splitter.init`
    pub min_left_width: i32,
    /// Directory of `<code>.lang` files overriding the built-in labels
    pub lang_dir: Option<PathBuf>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            root: String::new(),
            with_menu: true,
            min_left_width: SITE_MIN_LEFT_WIDTH,
            lang_dir: None,
        }
    }
}

/// Summary of a site build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub out_dir: PathBuf,
    pub pages_written: usize,
    pub assets_written: usize,
    /// Pages written in English because a translation is missing
    pub fallbacks: Vec<(Language, String)>,
    /// Pictures the pages link to, relative to the output directory.
    /// They are not shipped with the help and must be copied in.
    pub missing_images: BTreeSet<String>,
}

/// Escape text for use in HTML content and attribute values.
pub fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert a page body to HTML. Raw tags such as `<kbd>` pass through.
pub fn body_to_html(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.autolink = true;
    options.render.unsafe_ = true;
    markdown_to_html(markdown, &options)
}

/// Render one help page inside the shared shell.
pub fn render_page(page: &Page, bundle: &Bundle, tree: &TopicTree, options: &SiteOptions) -> String {
    let content = body_to_html(&page.body);
    let expanded = tree.ancestors(&page.id).unwrap_or_default();
    render_shell(
        &page.title,
        page.language,
        &content,
        bundle,
        tree,
        &expanded,
        options,
    )
}

fn render_shell(
    title: &str,
    language: Language,
    content: &str,
    bundle: &Bundle,
    tree: &TopicTree,
    expanded: &[&str],
    options: &SiteOptions,
) -> String {
    let root = html_escape(&options.root);
    let title = if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        html_escape(title)
    };
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"{}\">\n<head>\n",
        language.code().replace('_', "-")
    ));
    html.push_str(&format!("  <title>{title}</title>\n"));
    html.push_str("  <meta charset=\"UTF-8\" />\n");
    html.push_str(&format!(
        "  <link rel=\"stylesheet\" type=\"text/css\" href=\"{root}/style.css\" />\n"
    ));
    html.push_str(&format!(
        "  <link rel=\"stylesheet\" type=\"text/css\" href=\"{root}/treeview.css\" />\n"
    ));
    html.push_str(&format!("  <script src=\"{root}/splitter.js\"></script>\n"));
    html.push_str(
        "  <script>\n    function collapseAll() {\n      for (const box of document.querySelectorAll(\"#treeview input\")) {\n        box.checked = false;\n      }\n    }\n  </script>\n",
    );
    html.push_str("</head>\n");
    html.push_str(&format!(
        "<body onload=\"splitter.init({})\">\n",
        options.min_left_width
    ));

    html.push_str("  <nav id=\"split-left\">\n    <div style=\"padding: 5px\">\n");
    if options.with_menu {
        let label = html_escape(bundle.text("button.collapse_all"));
        html.push_str(&format!(
            "      <div class=\"top-bar\">\n        <button title=\"{label}\" onclick=\"collapseAll()\"><img src=\"{root}/images/collapse.png\" alt=\"{label}\"></button>\n      </div>\n"
        ));
        html.push_str("      <div id=\"treeview\" class=\"css-treeview\">\n");
        push_tree(&mut html, tree.roots(), bundle, expanded, &mut Vec::new());
        html.push_str("      </div>\n");
    }
    html.push_str("    </div>\n  </nav>\n");
    html.push_str("  <div id=\"splitter\"></div>\n");

    html.push_str("  <main id=\"split-right\">\n    <div style=\"padding: 5px\">\n");
    if options.with_menu {
        let label = html_escape(bundle.text("button.home"));
        html.push_str(&format!(
            "      <div class=\"top-bar\">\n        <button title=\"{label}\" onclick=\"location.href='.'\"><img src=\"{root}/images/home.png\" alt=\"{label}\"></button>\n      </div>\n"
        ));
    }
    html.push_str(&format!("      <h1 id=\"main-title\">{title}</h1>\n"));
    html.push_str(content);
    html.push_str("    </div>\n  </main>\n</body>\n</html>\n");
    html
}

/// Nested lists for the CSS tree view. Nodes with children get a checkbox
/// whose id encodes their position among expandable siblings.
fn push_tree(
    html: &mut String,
    nodes: &[TopicNode],
    bundle: &Bundle,
    expanded: &[&str],
    path: &mut Vec<usize>,
) {
    let indent = "  ".repeat(path.len() * 2 + 4);
    html.push_str(&format!("{indent}<ul>\n"));
    let mut folder = 0;
    for node in nodes {
        let link = format!(
            "<a href=\"{}\">{}</a>",
            href(&node.id),
            html_escape(bundle.text(&node.label))
        );
        if node.has_children() {
            path.push(folder);
            folder += 1;
            let id = item_id(path);
            let checked = if expanded.contains(&node.id.as_str()) {
                " checked"
            } else {
                ""
            };
            html.push_str(&format!(
                "{indent}  <li><input type=\"checkbox\" id=\"{id}\"{checked} /><label for=\"{id}\">{link}</label>\n"
            ));
            push_tree(html, &node.children, bundle, expanded, path);
            html.push_str(&format!("{indent}  </li>\n"));
            path.pop();
        } else {
            html.push_str(&format!("{indent}  <li>{link}</li>\n"));
        }
    }
    html.push_str(&format!("{indent}</ul>\n"));
}

fn item_id(path: &[usize]) -> String {
    let parts: Vec<String> = path.iter().map(ToString::to_string).collect();
    format!("item-{}", parts.join("-"))
}

/// Landing page linking to each language.
fn render_language_index(options: &SiteOptions, store: &PageStore) -> Result<String, SiteError> {
    let mut content = String::from("<ul>\n");
    for lang in Language::ALL {
        let home = store.get(lang, HOME_PAGE)?;
        content.push_str(&format!(
            "  <li><a href=\"{}/{}\">{}</a> ({})</li>\n",
            lang.code(),
            href(HOME_PAGE),
            html_escape(lang.name()),
            html_escape(&home.title)
        ));
    }
    content.push_str("</ul>\n");
    let options = SiteOptions {
        with_menu: false,
        ..options.clone()
    };
    Ok(render_shell(
        DEFAULT_TITLE,
        Language::default(),
        &content,
        &Bundle::default(),
        &TopicTree::default(),
        &[],
        &options,
    ))
}

fn create_dir(path: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(path).map_err(|source| SiteError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    fs::write(path, contents).map_err(|source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the whole help as static HTML under `out_dir`.
///
/// Layout: `<out>/index.html` (language list), the shared assets, and
/// `<out>/<language code>/<topic id>.html` for every topic in every
/// language, with `index.html` as each language's home page.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written, or if the
/// embedded content is malformed.
pub fn build_site(out_dir: &Path, options: &SiteOptions) -> Result<BuildReport, SiteError> {
    let tree = TopicTree::embedded()?;
    let store = PageStore::embedded()?;
    let mut report = BuildReport {
        out_dir: out_dir.to_path_buf(),
        ..BuildReport::default()
    };

    create_dir(out_dir)?;
    for (name, contents) in ASSETS {
        write_file(&out_dir.join(name), contents)?;
        report.assets_written += 1;
    }
    write_file(
        &out_dir.join("index.html"),
        &render_language_index(options, &store)?,
    )?;

    let mut ids = vec![HOME_PAGE];
    ids.extend(tree.ids());

    if options.with_menu {
        report
            .missing_images
            .extend(BUTTON_IMAGES.iter().map(ToString::to_string));
    }

    for lang in Language::ALL {
        let bundle = Bundle::load(lang, options.lang_dir.as_deref())?;
        let dir = out_dir.join(lang.code());
        create_dir(&dir)?;
        for id in &ids {
            let page = store.get(lang, id)?;
            if page.language != lang {
                report.fallbacks.push((lang, (*id).to_string()));
            }
            report
                .missing_images
                .extend(page_images(&page.body, lang.code()));
            let path = dir.join(href(id));
            write_file(&path, &render_page(page, &bundle, &tree, options))?;
            debug!(path = %path.display(), "page written");
            report.pages_written += 1;
        }
        info!(
            language = lang.code(),
            pages = ids.len(),
            "language written"
        );
    }

    if !report.missing_images.is_empty() {
        warn!(
            count = report.missing_images.len(),
            "pages link to images that are not part of the build"
        );
    }
    info!(
        out = %out_dir.display(),
        pages = report.pages_written,
        fallbacks = report.fallbacks.len(),
        "site built"
    );
    Ok(report)
}

/// Local pictures referenced by a page body written to `<page_dir>/`,
/// as paths from the site root. Absolute and external sources are
/// skipped, as are paths climbing out of the site.
fn page_images<'a>(body: &'a str, page_dir: &'a str) -> impl Iterator<Item = String> + 'a {
    IMAGE_PATTERN
        .captures_iter(body)
        .filter_map(move |caps| site_path(page_dir, &caps[1]))
}

fn site_path(page_dir: &str, src: &str) -> Option<String> {
    if src.starts_with('/') || src.contains(':') {
        return None;
    }
    let mut parts: Vec<&str> = vec![page_dir];
    for part in src.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            _ => parts.push(part),
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english_page(id: &str) -> String {
        let store = PageStore::embedded().unwrap();
        let tree = TopicTree::embedded().unwrap();
        let page = store.get(Language::English, id).unwrap();
        render_page(
            page,
            &Bundle::for_language(Language::English),
            &tree,
            &SiteOptions::default(),
        )
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_body_keeps_raw_kbd_tags() {
        let html = body_to_html("Press <kbd>Ctrl+A</kbd> then **Validate**.");
        assert!(html.contains("<kbd>Ctrl+A</kbd>"));
        assert!(html.contains("<strong>Validate</strong>"));
    }

    #[test]
    fn test_shell_has_split_layout() {
        let html = english_page("overview");
        assert!(html.contains("<body onload=\"splitter.init(200)\">"));
        assert!(html.contains("<nav id=\"split-left\">"));
        assert!(html.contains("<div id=\"splitter\"></div>"));
        assert!(html.contains("<main id=\"split-right\">"));
        assert!(html.contains("<h1 id=\"main-title\">Overview</h1>"));
        assert!(html.contains("href=\"/style.css\""));
        assert!(html.contains("src=\"/splitter.js\""));
    }

    #[test]
    fn test_tree_checkbox_ids_count_expandable_siblings() {
        let html = english_page("overview");
        assert!(html.contains("<input type=\"checkbox\" id=\"item-0\" /><label for=\"item-0\"><a href=\"getting_started.html\">Getting started</a></label>"));
        assert!(html.contains("id=\"item-0-0\" /><label for=\"item-0-0\"><a href=\"getting_started.cards.html\">"));
        assert!(html.contains("id=\"item-0-1\" /><label for=\"item-0-1\"><a href=\"getting_started.links.html\">"));
        assert!(html.contains("id=\"item-1\" /><label for=\"item-1\"><a href=\"options.html\">"));
        assert!(html.contains("<li><a href=\"legal.html\">Legal notice</a></li>"));
    }

    #[test]
    fn test_ancestors_of_current_page_are_expanded() {
        let html = english_page("getting_started.cards.add");
        assert!(html.contains("id=\"item-0\" checked />"));
        assert!(html.contains("id=\"item-0-0\" checked />"));
        assert!(html.contains("id=\"item-0-1\" />"));
    }

    #[test]
    fn test_menu_buttons_use_bundle_labels() {
        let store = PageStore::embedded().unwrap();
        let tree = TopicTree::embedded().unwrap();
        let page = store.get(Language::French, "overview").unwrap();
        let html = render_page(
            page,
            &Bundle::for_language(Language::French),
            &tree,
            &SiteOptions::default(),
        );
        assert!(html.contains("<html lang=\"fr-FR\">"));
        assert!(html.contains("title=\"Accueil\""));
        assert!(html.contains("onclick=\"location.href='.'\""));
        assert!(html.contains("onclick=\"collapseAll()\""));
    }

    #[test]
    fn test_no_menu_drops_top_bars_and_tree() {
        let store = PageStore::embedded().unwrap();
        let tree = TopicTree::embedded().unwrap();
        let page = store.get(Language::English, "legal").unwrap();
        let options = SiteOptions {
            with_menu: false,
            ..SiteOptions::default()
        };
        let html = render_page(page, &Bundle::default(), &tree, &options);
        assert!(!html.contains("top-bar"));
        assert!(!html.contains("treeview\" class"));
        assert!(html.contains("<h1 id=\"main-title\">Legal notice</h1>"));
        assert!(html.contains("<div id=\"splitter\"></div>"));
    }

    #[test]
    fn test_root_prefix_applies_to_assets() {
        let store = PageStore::embedded().unwrap();
        let tree = TopicTree::embedded().unwrap();
        let page = store.get(Language::English, "overview").unwrap();
        let options = SiteOptions {
            root: DEPLOYED_ROOT.to_string(),
            ..SiteOptions::default()
        };
        let html = render_page(page, &Bundle::default(), &tree, &options);
        assert!(html.contains("href=\"/products/jenealogio/help-doc/style.css\""));
        assert!(html.contains("src=\"/products/jenealogio/help-doc/images/home.png\""));
    }

    #[test]
    fn test_title_is_escaped() {
        let page = Page::parse(Language::English, "x", "# Cards & <Links>\n\nText").unwrap();
        let html = render_page(
            &page,
            &Bundle::default(),
            &TopicTree::default(),
            &SiteOptions::default(),
        );
        assert!(html.contains("<title>Cards &amp; &lt;Links&gt;</title>"));
        assert!(html.contains("<h1 id=\"main-title\">Cards &amp; &lt;Links&gt;</h1>"));
    }

    #[test]
    fn test_site_path_resolves_relative_sources() {
        assert_eq!(
            site_path("fr_FR", "../images/baby.png").as_deref(),
            Some("images/baby.png")
        );
        assert_eq!(
            site_path("eo", "./pics/a.png").as_deref(),
            Some("eo/pics/a.png")
        );
        assert_eq!(site_path("eo", "../../secret.png"), None);
        assert_eq!(site_path("eo", "/images/a.png"), None);
        assert_eq!(site_path("eo", "https://example.org/a.png"), None);
    }

    #[test]
    fn test_page_images_lists_markdown_pictures() {
        let body = "Text ![Birth](../images/baby.png) and ![Death](../images/tombstone.png \"t\").";
        let images: Vec<String> = page_images(body, "en_US").collect();
        assert_eq!(images, ["images/baby.png", "images/tombstone.png"]);
    }

    #[test]
    fn test_item_id_joins_path() {
        assert_eq!(item_id(&[0]), "item-0");
        assert_eq!(item_id(&[0, 1]), "item-0-1");
    }
}
