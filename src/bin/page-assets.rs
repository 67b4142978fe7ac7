//! page-assets CLI - inspect and preview bundle manifests
//!
//! ## Example Usage
//!
//! ```bash
//! # List bundles declared in the manifest
//! page-assets list
//!
//! # Show the order in which a bundle's dependencies inject content
//! page-assets order widget
//!
//! # Preview the sections produced by registering bundles
//! page-assets --manifest site/assets.toml render widget analytics
//!
//! # Print only the end of body
//! page-assets render widget --section endBody
//! ```

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use page_assets::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// page-assets: asset bundle manifest tool
#[derive(Parser)]
#[command(name = "page-assets")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and preview asset bundle manifests", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Manifest path (overrides the configuration file)
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared bundles and their dependencies
    List,

    /// Show dependency-first registration order of a bundle
    Order {
        /// Bundle id
        #[arg(value_name = "BUNDLE")]
        id: String,
    },

    /// Register bundles into an empty page and print its sections
    Render {
        /// Bundle ids, registered in the given order
        #[arg(value_name = "BUNDLE", required = true)]
        ids: Vec<String>,

        /// Only print this section (head, beginBody, endBody)
        #[arg(short, long, value_parser = parse_section)]
        section: Option<Section>,
    },
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    #[serde(default = "default_manifest")]
    manifest: PathBuf,
    #[serde(default)]
    base_url: Option<String>,
}

fn parse_section(name: &str) -> std::result::Result<Section, String> {
    Section::from_name(name).ok_or_else(|| {
        let names: Vec<&str> = Section::ALL.iter().map(|s| s.name()).collect();
        format!("unknown section {} (expected one of {})", name, names.join(", "))
    })
}

fn default_manifest() -> PathBuf {
    PathBuf::from("assets.toml")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            base_url: None,
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Self {
        if let Some(config_path) = path {
            match fs::read_to_string(config_path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                    }
                },
                Err(e) => {
                    eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
                }
            }
        } else if let Some(home) = dirs::home_dir() {
            let default_config = home.join(".page-assets").join("config.toml");
            if let Ok(contents) = fs::read_to_string(&default_config) {
                if let Ok(config) = toml::from_str(&contents) {
                    return config;
                }
            }
        }

        Config::default()
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref());
    if let Some(manifest) = cli.manifest {
        config.manifest = manifest;
    }

    if cli.verbose {
        println!(
            "{} v{}",
            "page-assets".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!("Manifest: {}", config.manifest.display().to_string().dimmed());
    }

    let result = load_manifest(&config).and_then(|manifest| match cli.command {
        Commands::List => list_bundles(&manifest),
        Commands::Order { id } => show_order(manifest, &id),
        Commands::Render { ids, section } => render_bundles(manifest, &ids, section),
    });

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn load_manifest(config: &Config) -> Result<Manifest> {
    let mut manifest = Manifest::load(&config.manifest)
        .with_context(|| format!("loading manifest {}", config.manifest.display()))?;

    if let Some(base_url) = &config.base_url {
        manifest.urls.base_url = base_url.clone();
    }

    Ok(manifest)
}

fn list_bundles(manifest: &Manifest) -> Result<()> {
    println!("{}", "Bundles".bold());
    println!("{}", "=======".dimmed());

    for bundle in &manifest.bundles {
        let deps: Vec<String> = bundle.depends.iter().map(|d| d.to_string()).collect();
        if deps.is_empty() {
            println!("  {}", bundle.id.bright_green());
        } else {
            println!(
                "  {} {} {}",
                bundle.id.bright_green(),
                "->".dimmed(),
                deps.join(", ")
            );
        }
    }

    println!();
    println!("  {} {}", "Templates:".bold(), manifest.templates.len());
    Ok(())
}

fn show_order(manifest: Manifest, id: &str) -> Result<()> {
    manifest.validate()?;
    let registry = manifest.registry()?;
    let order = registry.dependency_order(id)?;

    println!("{}", format!("Registration order for {}", id).cyan().bold());
    for (position, bundle) in order.iter().enumerate() {
        println!("  {:>3}. {}", position + 1, bundle);
    }
    Ok(())
}

fn render_bundles(manifest: Manifest, ids: &[String], only: Option<Section>) -> Result<()> {
    let env = manifest.into_env(HandlebarsViews::new())?;
    let page = env.render_page(ids.iter().map(|id| id.as_str()))?;

    let sections = match only {
        Some(section) => vec![section],
        None => Section::ALL.to_vec(),
    };

    for section in sections {
        println!("{}", format!("<!-- {} -->", section).cyan().bold());
        print!("{}", page.section(section));
        println!();
    }

    println!(
        "{} {}",
        "Registered:".bold(),
        page.ledger().join(", ").bright_green()
    );
    Ok(())
}
