//! services/api/src/bin/paper.rs
//!
//! Command-line client: export editor content locally, or publish it through
//! the deployed upload function.

use anyhow::{anyhow, Context, Result};
use api_lib::adapters::{AppwriteAccountAdapter, AppwriteClient, AppwriteFunctionsAdapter, ChromeRasterizer};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use paper_core::domain::{PublishRequest, DEFAULT_FONT_ID, DEFAULT_THEME_ID};
use paper_core::export::{export_html, html_file_name, png_file_name, raster_html, DocumentMeta};
use paper_core::fonts::{all_fonts, google_fonts_url};
use paper_core::ports::{IdentityService, PublishService, Rasterizer};
use paper_core::themes::{all_themes, theme_background, theme_by_id, theme_or_default};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// paper - export and publish minimalist documents
#[derive(Parser, Debug)]
#[command(name = "paper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an HTML fragment to a standalone document or image
    Export(ExportArgs),

    /// Publish an HTML fragment to IPFS through the upload function
    Publish(PublishArgs),

    /// List the available themes
    Themes,

    /// List the available fonts
    Fonts,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Png,
}

#[derive(Debug, Args)]
struct StyleArgs {
    /// Theme id
    #[arg(long, default_value = DEFAULT_THEME_ID)]
    theme: String,

    /// Font id
    #[arg(long, default_value = DEFAULT_FONT_ID)]
    font: String,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// File holding the editor's HTML fragment
    input: PathBuf,

    #[command(flatten)]
    style: StyleArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: Format,

    /// Output file (defaults to a name derived from the content)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Browser window width used for PNG rendering
    #[arg(long, env = "CHROME_WINDOW_WIDTH", default_value = "1200")]
    width: u32,
}

#[derive(Debug, Args)]
struct PublishArgs {
    /// File holding the editor's HTML fragment
    input: PathBuf,

    /// Title stored with the paper
    #[arg(short, long)]
    title: String,

    /// Republish over an existing paper
    #[arg(long)]
    paper_id: Option<String>,

    #[command(flatten)]
    style: StyleArgs,

    /// Publish without the watermark
    #[arg(long)]
    no_watermark: bool,

    /// Session JWT of the publishing user
    #[arg(long, env = "PAPER_JWT", hide_env_values = true)]
    jwt: String,

    #[arg(long, env = "APPWRITE_ENDPOINT")]
    endpoint: String,

    #[arg(long, env = "APPWRITE_PROJECT_ID")]
    project: String,

    #[arg(long, env = "APPWRITE_FUNCTION_ID", default_value = api_lib::adapters::functions::DEFAULT_FUNCTION_ID)]
    function: String,
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn check_theme(id: &str) -> Result<()> {
    theme_by_id(id)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Unknown theme '{}'. Run `paper themes` for the list.", id))
}

async fn export(args: ExportArgs) -> Result<()> {
    check_theme(&args.style.theme)?;
    let content = read_input(&args.input)?;
    let theme = theme_or_default(&args.style.theme);

    let (bytes, default_name) = match args.format {
        Format::Html => {
            let title = DocumentMeta::from_content(&content).title;
            let html = export_html(&content, &args.style.font, theme);
            (html.into_bytes(), html_file_name(&title))
        }
        Format::Png => {
            let rasterizer = ChromeRasterizer::new(args.width);
            let png = rasterizer
                .rasterize(&raster_html(&content, &args.style.font, theme))
                .await?;
            (png, png_file_name(Utc::now()))
        }
    };

    let out = args.out.unwrap_or_else(|| PathBuf::from(default_name));
    fs::write(&out, bytes).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Exported {}", out.display());
    Ok(())
}

async fn publish(args: PublishArgs) -> Result<()> {
    check_theme(&args.style.theme)?;
    let content = read_input(&args.input)?;
    let theme = theme_or_default(&args.style.theme);
    let html = export_html(&content, &args.style.font, theme);

    let http = reqwest::Client::builder().build()?;
    let client = AppwriteClient::new(http, &args.endpoint, &args.project);
    let user = AppwriteAccountAdapter::new(client.clone())
        .current_user(&args.jwt)
        .await
        .context("Session token was rejected")?;
    info!("Publishing as {}", user.id);

    let request = PublishRequest {
        html,
        title: args.title,
        content: Some(content),
        theme: Some(args.style.theme),
        font: Some(args.style.font),
        watermark: Some(!args.no_watermark),
        paper_id: args.paper_id,
    };
    let receipt = AppwriteFunctionsAdapter::new(client, &args.function)
        .publish(&args.jwt, &user.id, request)
        .await?;

    println!("Published paper {}", receipt.paper_id);
    println!("  CID:     {}", receipt.cid);
    println!("  Gateway: {}", receipt.gateway);
    Ok(())
}

fn list_themes() {
    for theme in all_themes() {
        println!("{:<10} {:<10} {}", theme.id, theme.label, theme_background(theme.id));
    }
}

fn list_fonts() {
    for font in all_fonts() {
        let source = if font.google_font.is_some() { "web" } else { "system" };
        println!("{:<12} {:<18} {}", font.id, font.label, source);
    }
    println!();
    println!("Web font stylesheet: {}", google_fonts_url());
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Export(args) => export(args).await,
        Command::Publish(args) => publish(args).await,
        Command::Themes => {
            list_themes();
            Ok(())
        }
        Command::Fonts => {
            list_fonts();
            Ok(())
        }
    }
}
