use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::i18n::Language;

/// Flags that can be saved as defaults in a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub lang: Option<Language>,
    pub left_width: Option<u16>,
    pub min_left_width: Option<u16>,
    pub log_file: Option<PathBuf>,
    /// Directory of `<code>.lang` files overriding the built-in labels
    pub lang_dir: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets, `other` winning wherever it sets a value.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            lang: other.lang.or(self.lang),
            left_width: other.left_width.or(self.left_width),
            min_left_width: other.min_left_width.or(self.min_left_width),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
            lang_dir: other.lang_dir.clone().or_else(|| self.lang_dir.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("jenealogio-help").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("jenealogio-help")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("jenealogio-help").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("jenealogio-help")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".jenhelprc")
}

/// Read saved flags. A missing file yields no flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, one flag per line.
///
/// # Errors
///
/// Returns an error if the directory or the file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# jenealogio-help defaults (saved with --save)".to_string()];
    if let Some(lang) = flags.lang {
        lines.push(format!("--lang {}", lang.code()));
    }
    if let Some(width) = flags.left_width {
        lines.push(format!("--left-width {width}"));
    }
    if let Some(width) = flags.min_left_width {
        lines.push(format!("--min-left-width {width}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(dir) = &flags.lang_dir {
        lines.push(format!("--lang-dir {}", dir.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved config file if there is one.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list, skipping everything else.
///
/// Both `--flag value` and `--flag=value` are accepted. Values that do not
/// parse leave the flag unset.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        let takes_value = matches!(
            name,
            "--lang" | "--left-width" | "--min-left-width" | "--log-file" | "--lang-dir"
        );
        if !takes_value {
            i += 1;
            continue;
        }
        let value = match inline_value {
            Some(value) => Some(value),
            None => {
                i += 1;
                tokens.get(i).map(String::as_str)
            }
        };
        if let Some(value) = value {
            match name {
                "--lang" => flags.lang = parse_language(value),
                "--left-width" => flags.left_width = value.parse().ok(),
                "--min-left-width" => flags.min_left_width = value.parse().ok(),
                "--lang-dir" => flags.lang_dir = Some(PathBuf::from(value)),
                _ => flags.log_file = Some(PathBuf::from(value)),
            }
        }
        i += 1;
    }
    flags
}

fn parse_language(s: &str) -> Option<Language> {
    Language::from_str(s, false).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "jenealogio-help",
            "--lang",
            "fr_FR",
            "--left-width=40",
            "--min-left-width",
            "25",
            "--log-file=help.log",
            "--lang-dir",
            "labels",
            "browse",
            "tree",
        ]);
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.lang, Some(Language::French));
        assert_eq!(flags.left_width, Some(40));
        assert_eq!(flags.min_left_width, Some(25));
        assert_eq!(flags.log_file, Some(PathBuf::from("help.log")));
        assert_eq!(flags.lang_dir, Some(PathBuf::from("labels")));
    }

    #[test]
    fn test_parse_flag_tokens_accepts_language_aliases() {
        let flags = parse_flag_tokens(&tokens(&["--lang", "fr"]));
        assert_eq!(flags.lang, Some(Language::French));
        let flags = parse_flag_tokens(&tokens(&["--lang=eo"]));
        assert_eq!(flags.lang, Some(Language::Esperanto));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_bad_values() {
        let flags = parse_flag_tokens(&tokens(&["--lang", "de", "--left-width", "wide"]));
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_parse_flag_tokens_tolerates_missing_value() {
        let flags = parse_flag_tokens(&tokens(&["--left-width"]));
        assert_eq!(flags.left_width, None);
    }

    #[test]
    fn test_config_union_prefers_other() {
        let file = ConfigFlags {
            lang: Some(Language::Esperanto),
            left_width: Some(35),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            lang: Some(Language::French),
            min_left_width: Some(10),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.lang, Some(Language::French));
        assert_eq!(merged.left_width, Some(35));
        assert_eq!(merged.min_left_width, Some(10));
        assert_eq!(merged.log_file, None);
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            lang: Some(Language::Esperanto),
            left_width: Some(42),
            min_left_width: Some(22),
            log_file: Some(PathBuf::from("help.log")),
            lang_dir: Some(PathBuf::from("labels")),
        };

        save_config_flags(&path, &flags).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# jenealogio-help defaults"));
        assert!(content.contains("--lang eo\n"));
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }

    #[test]
    fn test_clear_missing_config_is_ok() {
        let dir = tempdir().unwrap();
        assert!(clear_config_flags(&dir.path().join("absent")).is_ok());
    }
}
