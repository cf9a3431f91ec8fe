//! CLI definitions and entry point

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;

use stencil::Context;
use stencil::config::{CONFIG_FILE, Config};
use stencil::lexer;
use stencil::output::{OutputMode, RenderResult, TagListing, TokenListing};
use stencil::parser::TokenParser;

/// stencil - render templates built from pluggable block tags
#[derive(Parser, Debug)]
#[command(
    name = "stencil",
    version,
    about = "Render templates built from pluggable block tags",
    long_about = "Render templates built from pluggable block tags.\n\n\
                  Variables are written {{ name }}, block tags {% tag args %}\n\
                  and comments {# note #}."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a template file to stdout
    Render {
        /// Template file
        template: PathBuf,

        /// Context file (.json or .toml)
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Set a string variable (repeatable)
        #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
        defines: Vec<String>,

        /// Config file (defaults to ./stencil.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Extra directory searched by include (repeatable)
        #[arg(short = 'I', long = "template-dir", value_name = "DIR")]
        template_dirs: Vec<PathBuf>,

        /// Fail on unknown tags instead of dropping them
        #[arg(long)]
        strict: bool,
    },

    /// Print the tokens of a template file
    Tokens {
        /// Template file
        template: PathBuf,
    },

    /// List the built-in tags
    Tags,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Render {
            template,
            context,
            defines,
            config,
            template_dirs,
            strict,
        }) => render(
            &template,
            context.as_deref(),
            &defines,
            config.as_deref(),
            template_dirs,
            strict,
            output_mode,
        ),
        Some(Command::Tokens { template }) => tokens(&template, output_mode),
        Some(Command::Tags) => {
            let parser = TokenParser::new(Vec::new());
            TagListing {
                tags: parser.tag_names().into_iter().map(String::from).collect(),
            }
            .render(output_mode);
            Ok(())
        },
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": stencil::VERSION
                    })
                );
            } else {
                println!("stencil v{}", stencil::VERSION);
            }
            Ok(())
        },
        None => {
            println!("stencil v{}", stencil::VERSION);
            println!("Run 'stencil --help' for usage");
            Ok(())
        },
    }
}

fn render(
    template: &Path,
    context_file: Option<&Path>,
    defines: &[String],
    config_file: Option<&Path>,
    template_dirs: Vec<PathBuf>,
    strict: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let mut config = match config_file {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(CONFIG_FILE)?,
    };
    config.parser.strict_tags |= strict;

    // CLI dirs first, then config dirs, then the template's own directory
    let mut dirs = template_dirs;
    dirs.append(&mut config.loader.template_dirs);
    if let Some(parent) = template.parent() {
        dirs.push(parent.to_path_buf());
    }
    config.loader.template_dirs = dirs;

    let loader = config.loader();
    let parsed = loader
        .load_path(template)
        .with_context(|| format!("failed to load {}", template.display()))?;

    let mut context = match context_file {
        Some(path) => Context::from_value(read_context(path)?)?,
        None => Context::new(),
    };
    for define in defines {
        let Some((key, value)) = define.split_once('=') else {
            bail!("invalid define `{define}`, expected KEY=VALUE");
        };
        context.set(key.trim(), value);
    }
    let mut context = context.with_loader(loader);

    let output = parsed
        .render(&mut context)
        .with_context(|| format!("failed to render {}", template.display()))?;

    RenderResult {
        template: template.display().to_string(),
        output,
    }
    .render(output_mode);
    Ok(())
}

fn read_context(path: &Path) -> anyhow::Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let value = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    };
    Ok(value)
}

fn tokens(template: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let source = fs::read_to_string(template)
        .with_context(|| format!("failed to read {}", template.display()))?;

    TokenListing {
        template: template.display().to_string(),
        tokens: lexer::tokenize(&source),
    }
    .render(output_mode);
    Ok(())
}
