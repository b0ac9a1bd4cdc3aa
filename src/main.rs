//! Jenealogio help: terminal browser and static site generator.
//!
//! # Usage
//!
//! ```bash
//! jenealogio-help
//! jenealogio-help --lang fr_FR browse getting_started.cards
//! jenealogio-help build --out site --root /products/jenealogio/help-doc
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jenealogio_help::app::App;
use jenealogio_help::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use jenealogio_help::i18n::Language;
use jenealogio_help::site::{SiteOptions, build_site};
use jenealogio_help::ui::{DEFAULT_LEFT_WIDTH, DEFAULT_MIN_LEFT_WIDTH};

/// Multilingual help for the Jenealogio family tree editor
#[derive(Parser, Debug)]
#[command(name = "jenealogio-help", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Language of the help pages
    #[arg(long, global = true, value_enum)]
    lang: Option<Language>,

    /// Initial width of the topic tree, in columns
    #[arg(long, global = true, value_name = "COLUMNS")]
    left_width: Option<u16>,

    /// Narrowest the topic tree can be dragged to, in columns
    #[arg(long, global = true, value_name = "COLUMNS")]
    min_left_width: Option<u16>,

    /// Write log events to a file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Directory of <code>.lang files overriding the built-in labels
    #[arg(long, global = true, value_name = "DIR")]
    lang_dir: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the help in the terminal (default)
    Browse {
        /// Topic to open instead of the home page
        #[arg(value_name = "TOPIC")]
        topic: Option<String>,
    },
    /// Write the help as a static HTML site
    Build {
        /// Output directory
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        /// URL prefix of the shared assets
        #[arg(long, value_name = "PREFIX", default_value = "")]
        root: String,

        /// Leave out the topic tree and the top bars
        #[arg(long)]
        no_menu: bool,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The browser owns the terminal, stray log lines would corrupt it.
        None if interactive => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::sink)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let command = cli.command.unwrap_or(Command::Browse { topic: None });
    let interactive = matches!(command, Command::Browse { .. });
    init_logging(
        cli.log_file.as_deref().or(effective.log_file.as_deref()),
        interactive,
    )?;

    let language = cli.lang.or(effective.lang).unwrap_or_default();
    let lang_dir = cli.lang_dir.or(effective.lang_dir);

    match command {
        Command::Browse { topic } => {
            let mut app = App::new(language)
                .with_start_topic(topic)
                .with_lang_dir(lang_dir)
                .with_left_width(
                    cli.left_width
                        .or(effective.left_width)
                        .unwrap_or(DEFAULT_LEFT_WIDTH),
                )
                .with_min_left_width(
                    cli.min_left_width
                        .or(effective.min_left_width)
                        .unwrap_or(DEFAULT_MIN_LEFT_WIDTH),
                )
                .with_config_paths(
                    Some(global_path),
                    local_path.exists().then_some(local_path),
                );
            app.run().context("Application error")
        }
        Command::Build {
            out,
            root,
            no_menu,
        } => {
            let options = SiteOptions {
                root,
                with_menu: !no_menu,
                lang_dir,
                ..SiteOptions::default()
            };
            let report = build_site(&out, &options)
                .with_context(|| format!("Failed to build site in {}", out.display()))?;
            println!(
                "Wrote {} pages and {} assets to {}",
                report.pages_written,
                report.assets_written,
                report.out_dir.display()
            );
            for (lang, id) in &report.fallbacks {
                println!("  {}: {id} (English)", lang.code());
            }
            if !report.missing_images.is_empty() {
                println!("Images to copy into {}:", report.out_dir.display());
                for image in &report.missing_images {
                    println!("  {image}");
                }
            }
            Ok(())
        }
    }
}
