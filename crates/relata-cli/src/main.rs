use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use jiff::civil::Date;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use relata_core::models::pdf_config::PdfConfigRecord;
use relata_core::models::placeholder::Placeholder;
use relata_core::models::report::ReportRecord;
use relata_export::pdf::{WeasyPrint, WeasyPrintConfig};
use relata_export::{ReportRenderRequest, ReportRenderer, StyleConfig};

#[derive(Debug, Parser)]
#[command(name = "relata", version, about = "Render pentest reports to PDF")]
struct Cli {
    /// Log as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a report to PDF.
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output file. Defaults to the report's download filename.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Write the HTML and CSS the render engine would receive.
    Preview {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value = "preview")]
        out_dir: PathBuf,
    },
    /// List the supported placeholders.
    Placeholders {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Report JSON, including its blocks.
    #[arg(long)]
    report: PathBuf,

    /// PDF configuration JSON. Missing fields use defaults.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Date for the CURRENT_* placeholders (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<Date>,
}

/// Overrides on top of the RELATA_* environment variables.
#[derive(Debug, Args)]
struct EngineArgs {
    #[arg(long)]
    weasyprint: Option<PathBuf>,

    /// Base URL for relative image links.
    #[arg(long)]
    base_url: Option<String>,

    /// Log unloadable resources instead of failing.
    #[arg(long)]
    lenient_resources: bool,
}

impl EngineArgs {
    fn config(&self) -> WeasyPrintConfig {
        let mut config = WeasyPrintConfig::from_env();
        if let Some(binary) = &self.weasyprint {
            config.binary = binary.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if self.lenient_resources {
            config.strict_resources = false;
        }
        config
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Render {
            input,
            output,
            engine,
        } => render(&input, output, &engine),
        Command::Preview { input, out_dir } => preview(&input, &out_dir),
        Command::Placeholders { json } => placeholders(json),
    }
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn render(input: &InputArgs, output: Option<PathBuf>, engine: &EngineArgs) -> Result<()> {
    let request = load_request(input)?;
    let renderer = ReportRenderer::new(WeasyPrint::new(engine.config()));

    let report = renderer.render(&request)?;
    let path = output.unwrap_or_else(|| PathBuf::from(&report.filename));
    fs::write(&path, &report.bytes).wrap_err_with(|| format!("writing {}", path.display()))?;

    info!(path = %path.display(), bytes = report.bytes.len(), "pdf written");
    Ok(())
}

fn preview(input: &InputArgs, out_dir: &Path) -> Result<()> {
    let request = load_request(input)?;
    let preview = ReportRenderer::<WeasyPrint>::default().render_preview(&request)?;

    fs::create_dir_all(out_dir).wrap_err_with(|| format!("creating {}", out_dir.display()))?;
    let html_path = out_dir.join("document.html");
    let css_path = out_dir.join("report.css");
    fs::write(&html_path, &preview.html)?;
    fs::write(&css_path, &preview.css)?;

    info!(html = %html_path.display(), css = %css_path.display(), "preview written");
    Ok(())
}

fn placeholders(json: bool) -> Result<()> {
    if json {
        let entries: Vec<_> = Placeholder::ALL
            .iter()
            .map(|p| {
                serde_json::json!({
                    "key": p.key(),
                    "label": p.label(),
                    "description": p.description(),
                    "legacy": p.is_legacy(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for p in Placeholder::ALL {
        let legacy = if p.is_legacy() { " (legado)" } else { "" };
        println!("{:<22} {}{legacy}", p.key(), p.description());
    }
    Ok(())
}

fn load_request(input: &InputArgs) -> Result<ReportRenderRequest> {
    let report: ReportRecord = read_json(&input.report)?;
    let record = match &input.style {
        Some(path) => read_json(path)?,
        None => PdfConfigRecord::default(),
    };

    let resolved = StyleConfig::resolve(&record);
    if !resolved.defaulted.is_empty() {
        debug!(count = resolved.defaulted.len(), "style fields defaulted");
    }

    let request = ReportRenderRequest::from_records(&report, resolved.config)?;
    Ok(match input.date {
        Some(date) => request.with_render_date(date),
        None => request,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("parsing {}", path.display()))
}
