use std::fs;

use jenealogio_help::i18n::Language;
use jenealogio_help::site::{DEPLOYED_ROOT, SiteOptions, build_site};

#[test]
fn test_build_writes_every_page_in_every_language() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("site");
    let report = build_site(&out, &SiteOptions::default()).unwrap();

    assert_eq!(report.out_dir, out);
    assert_eq!(report.assets_written, 3);
    // Home page plus 17 topics, in three languages
    assert_eq!(report.pages_written, 54);
    for asset in ["style.css", "treeview.css", "splitter.js", "index.html"] {
        assert!(out.join(asset).is_file(), "missing {asset}");
    }
    for lang in Language::ALL {
        let dir = out.join(lang.code());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 18, "{}", lang.code());
        assert!(dir.join("getting_started.cards.add.html").is_file());
    }
}

#[test]
fn test_build_reports_untranslated_pages() {
    let dir = tempfile::tempdir().unwrap();
    let report = build_site(dir.path(), &SiteOptions::default()).unwrap();

    assert!(
        report
            .fallbacks
            .iter()
            .all(|(lang, _)| *lang != Language::English)
    );
    let french: Vec<&str> = report
        .fallbacks
        .iter()
        .filter(|(lang, _)| *lang == Language::French)
        .map(|(_, id)| id.as_str())
        .collect();
    assert_eq!(
        french,
        [
            "getting_started.workbench",
            "getting_started.links.add",
            "options.colors",
            "legal"
        ]
    );
    let esperanto = report
        .fallbacks
        .iter()
        .filter(|(lang, _)| *lang == Language::Esperanto)
        .count();
    assert_eq!(esperanto, 13);
}

#[test]
fn test_fallback_page_keeps_english_content_and_translated_menu() {
    let dir = tempfile::tempdir().unwrap();
    build_site(dir.path(), &SiteOptions::default()).unwrap();

    let html = fs::read_to_string(dir.path().join("fr_FR").join("legal.html")).unwrap();
    assert!(html.contains("<h1 id=\"main-title\">Legal notice</h1>"));
    assert!(html.contains("title=\"Accueil\""));

    let html = fs::read_to_string(dir.path().join("fr_FR").join("index.html")).unwrap();
    assert!(html.contains("Utilisation de l&#39;aide"));
}

#[test]
fn test_language_index_links_each_home_page() {
    let dir = tempfile::tempdir().unwrap();
    build_site(dir.path(), &SiteOptions::default()).unwrap();

    let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
    for lang in Language::ALL {
        assert!(html.contains(&format!("<a href=\"{}/index.html\">", lang.code())));
    }
    assert!(!html.contains("top-bar"));
}

#[test]
fn test_deployed_build_uses_root_prefix_and_no_menu() {
    let dir = tempfile::tempdir().unwrap();
    let options = SiteOptions {
        root: DEPLOYED_ROOT.to_string(),
        with_menu: false,
        ..SiteOptions::default()
    };
    build_site(dir.path(), &options).unwrap();

    let html = fs::read_to_string(dir.path().join("en_US").join("overview.html")).unwrap();
    assert!(html.contains("href=\"/products/jenealogio/help-doc/style.css\""));
    assert!(html.contains("splitter.init(200)"));
    assert!(!html.contains("top-bar"));
}

#[test]
fn test_build_fails_when_output_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("taken");
    fs::write(&out, "not a directory").unwrap();
    assert!(build_site(&out, &SiteOptions::default()).is_err());
}

#[test]
fn test_build_reads_labels_from_lang_dir() {
    let labels = tempfile::tempdir().unwrap();
    fs::write(labels.path().join("fr_FR.lang"), "button.home=Maison\n").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = SiteOptions {
        lang_dir: Some(labels.path().to_path_buf()),
        ..SiteOptions::default()
    };
    build_site(dir.path(), &options).unwrap();

    let html = fs::read_to_string(dir.path().join("fr_FR").join("overview.html")).unwrap();
    assert!(html.contains("title=\"Maison\""));
    // Keys missing from the file keep their built-in translation
    assert!(html.contains("onclick=\"collapseAll()\""));
    let html = fs::read_to_string(dir.path().join("en_US").join("overview.html")).unwrap();
    assert!(html.contains("title=\"Home\""));
}

#[test]
fn test_build_fails_on_unreadable_label_file() {
    let labels = tempfile::tempdir().unwrap();
    fs::create_dir(labels.path().join("eo.lang")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = SiteOptions {
        lang_dir: Some(labels.path().to_path_buf()),
        ..SiteOptions::default()
    };
    assert!(build_site(dir.path(), &options).is_err());
}

#[test]
fn test_build_reports_images_it_does_not_ship() {
    let dir = tempfile::tempdir().unwrap();
    let report = build_site(dir.path(), &SiteOptions::default()).unwrap();
    assert!(report.missing_images.contains("images/home.png"));
    assert!(report.missing_images.contains("images/collapse.png"));
    assert!(report.missing_images.contains("images/baby.png"));
    assert!(report.missing_images.iter().all(|path| path.starts_with("images/")));
    assert!(!dir.path().join("images").exists());

    let options = SiteOptions {
        with_menu: false,
        ..SiteOptions::default()
    };
    let report = build_site(dir.path(), &options).unwrap();
    assert!(!report.missing_images.contains("images/home.png"));
    assert!(report.missing_images.contains("images/tombstone.png"));
}
