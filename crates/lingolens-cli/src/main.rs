mod analyze;
mod practice;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use lingolens_config::{Settings, Theme};
use lingolens_types::{AnalysisDocument, Language, LanguagePair};

#[derive(Parser)]
#[command(
    name = "lingolens",
    about = "Language learning content from images and scene descriptions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an image or a scene description
    Analyze {
        /// Image file to analyze (jpg, jpeg, png, webp, gif)
        image: Option<PathBuf>,

        /// Scene description to analyze instead of an image (10-500 characters)
        #[arg(short, long, conflicts_with = "image")]
        text: Option<String>,

        /// Target language override (e.g. "spanish")
        #[arg(short, long)]
        language: Option<String>,

        /// Source language override (e.g. "english")
        #[arg(short, long)]
        source_language: Option<String>,

        /// Model server URL override
        #[arg(long)]
        server: Option<String>,

        /// Write the full result to this file as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check connectivity to the model server
    Check {
        /// Model server URL override
        #[arg(long)]
        server: Option<String>,
    },
    /// Display a previously exported analysis
    Show {
        /// Exported analysis JSON file
        file: PathBuf,
    },
    /// Practice vocabulary with the built-in games
    Practice {
        /// Game mode
        #[arg(value_enum)]
        mode: practice::Mode,

        /// Target language override (e.g. "spanish")
        #[arg(short, long)]
        language: Option<String>,

        /// Source language override (e.g. "english")
        #[arg(short, long)]
        source_language: Option<String>,
    },
    /// Show or change persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print current settings
    Show,
    /// Set one setting (keys: language, sourceLanguage, ollamaUrl, theme)
    Set { key: String, value: String },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            image,
            text,
            language,
            source_language,
            server,
            output,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(analyze::run_analyze(
                image,
                text,
                language,
                source_language,
                server,
                output,
            ))?;
        }
        Commands::Check { server } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(analyze::run_check(server))?;
        }
        Commands::Show { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let doc: AnalysisDocument = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", file.display()))?;
            render::print_document(&doc);
        }
        Commands::Practice {
            mode,
            language,
            source_language,
        } => {
            let settings = lingolens_config::load_settings()?;
            let pair = resolve_pair(&settings, language, source_language)?;
            practice::run(mode, pair)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => config_show()?,
            ConfigAction::Set { key, value } => config_set(&key, &value)?,
        },
    }

    Ok(())
}

/// Resolve the language pair from settings with optional CLI overrides.
pub(crate) fn resolve_pair(
    settings: &Settings,
    language: Option<String>,
    source_language: Option<String>,
) -> anyhow::Result<LanguagePair> {
    let mut pair = settings.language_pair();
    if let Some(code) = language {
        pair.target = parse_language(&code)?;
    }
    if let Some(code) = source_language {
        pair.source = parse_language(&code)?;
    }
    Ok(pair)
}

pub(crate) fn parse_language(code: &str) -> anyhow::Result<Language> {
    Language::parse(code).ok_or_else(|| {
        let known: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        anyhow::anyhow!("unknown language {code:?} (expected one of: {})", known.join(", "))
    })
}

fn config_show() -> anyhow::Result<()> {
    let settings = lingolens_config::load_settings()?;
    let theme = match settings.theme {
        Theme::Dark => "dark",
        Theme::Light => "light",
    };
    println!("language:       {}", settings.language);
    println!("sourceLanguage: {}", settings.source_language);
    println!("theme:          {theme}");
    println!("ollamaUrl:      {}", settings.ollama_url);
    println!(
        "settings file:  {}",
        lingolens_config::settings_file_path()?.display()
    );
    Ok(())
}

fn config_set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut settings = lingolens_config::load_settings()?;
    match key {
        "language" => settings.language = parse_language(value)?,
        "sourceLanguage" => settings.source_language = parse_language(value)?,
        "ollamaUrl" => settings.ollama_url = value.trim_end_matches('/').to_string(),
        "theme" => {
            settings.theme = match value.to_lowercase().as_str() {
                "dark" => Theme::Dark,
                "light" => Theme::Light,
                other => anyhow::bail!("unknown theme {other:?} (expected dark or light)"),
            }
        }
        other => anyhow::bail!(
            "unknown setting {other:?} (expected language, sourceLanguage, ollamaUrl, or theme)"
        ),
    }
    lingolens_config::save_settings(&settings)?;
    println!("{key} = {value}");
    Ok(())
}
