//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use docweave_core::{BatchRunConfig, BatchRunReport, ProgressReporter};
use docweave_shared::{AppConfig, BatchId, StyleConfig, init_config, load_config};
use docweave_store::{BatchDirs, FormattingSummary, current_batch, summary::write_summary};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Docweave — assemble business documents from extracted content fragments.
#[derive(Parser)]
#[command(
    name = "docweave",
    version,
    about = "Merge extracted content fragments into placeholder document templates.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Create a fresh batch and its working directory skeleton.
    NewBatch {
        /// Workspace root (defaults to the configured workspace dir).
        #[arg(long)]
        root: Option<String>,
    },

    /// Format extracted fragments into artifact intermediates.
    Format {
        /// Batch token (defaults to the current batch).
        #[arg(long)]
        batch: Option<String>,

        /// Workspace root (defaults to the configured workspace dir).
        #[arg(long)]
        root: Option<String>,
    },

    /// Run the full pipeline: format, chart series, and document assembly.
    Run {
        /// Batch token (defaults to the current batch).
        #[arg(long)]
        batch: Option<String>,

        /// Workspace root (defaults to the configured workspace dir).
        #[arg(long)]
        root: Option<String>,

        /// Templates directory (defaults to the configured templates dir).
        #[arg(long)]
        templates: Option<String>,
    },

    /// Preview the scaled schedule for a workflow variant.
    Plan {
        /// Step count of the workflow variant (21 or 23).
        #[arg(long, default_value = "21")]
        steps: u32,

        /// Target total in days.
        #[arg(long, default_value = "120")]
        days: i64,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docweave=info",
        1 => "docweave=debug",
        _ => "docweave=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::NewBatch { root } => cmd_new_batch(root.as_deref()),
        Command::Format { batch, root } => cmd_format(batch.as_deref(), root.as_deref()),
        Command::Run {
            batch,
            root,
            templates,
        } => cmd_run(batch.as_deref(), root.as_deref(), templates.as_deref()),
        Command::Plan { steps, days } => cmd_plan(steps, days),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// Expand a leading `~/` against the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn resolve_root(config: &AppConfig, root: Option<&str>) -> PathBuf {
    match root {
        Some(p) => PathBuf::from(p),
        None => expand_home(&config.defaults.workspace_dir),
    }
}

fn resolve_batch(root: &std::path::Path, batch: Option<&str>) -> Result<BatchId> {
    match batch {
        Some(token) => Ok(BatchId(token.to_string())),
        None => current_batch(root)
            .map_err(|e| eyre!("no batch token given and none recorded: {e}")),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_new_batch(root: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let root = resolve_root(&config, root);

    let batch = docweave_store::create_batch(&root)?;

    println!();
    println!("  Batch created!");
    println!("  Token: {batch}");
    println!("  Path:  {}", root.join(batch.to_string()).display());
    println!();

    Ok(())
}

fn cmd_format(batch: Option<&str>, root: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let root = resolve_root(&config, root);
    let batch = resolve_batch(&root, batch)?;
    let templates_dir = expand_home(&config.defaults.templates_dir);
    let style = StyleConfig::from(&config);

    info!(%batch, "formatting extracted fragments");

    let dirs = BatchDirs::new(&root, &batch);
    dirs.create()?;
    let set = docweave_store::load_content_set(&root, &batch)?;

    let outcome =
        docweave_core::format_fragments(&set, &style, &templates_dir, &dirs.artifacts_dir)?;

    let summary = FormattingSummary {
        batch_id: batch.clone(),
        formatted: outcome.formatted_keys.clone(),
        artifacts: outcome.artifacts,
        skipped: outcome.skipped.clone(),
        total_formatted: outcome.formatted_keys.len(),
        timestamp: chrono::Utc::now(),
    };
    write_summary(&dirs.batch_dir.join("formatting_summary.json"), &summary)?;

    println!();
    println!("  Formatting complete!");
    println!("  Formatted: {}", summary.total_formatted);
    for key in &summary.formatted {
        println!("    + {key}");
    }
    for (key, reason) in &summary.skipped {
        println!("    - {key} ({reason})");
    }
    println!();

    Ok(())
}

fn cmd_run(batch: Option<&str>, root: Option<&str>, templates: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let root = resolve_root(&config, root);
    let batch = resolve_batch(&root, batch)?;

    let templates_dir = match templates {
        Some(p) => PathBuf::from(p),
        None => expand_home(&config.defaults.templates_dir),
    };

    let run_config = BatchRunConfig {
        workspace_root: root,
        templates_dir,
        batch: batch.clone(),
        style: StyleConfig::from(&config),
        line_spacing: config.defaults.line_spacing,
        plans: config.documents.clone(),
    };

    info!(%batch, documents = run_config.plans.len(), "running batch assembly");

    let reporter = CliProgress::new();
    let report = docweave_core::run_batch(&run_config, &reporter)?;

    println!();
    println!("  Batch assembled!");
    println!("  Batch:     {}", report.batch);
    println!("  Formatted: {} fragments ({} skipped)", report.formatted, report.skipped);
    for doc in &report.documents {
        match &doc.error {
            Some(error) => println!("    ! {}: {error}", doc.output),
            None => println!(
                "    + {}: {}/{} placeholders",
                doc.output, doc.substituted, doc.attempted
            ),
        }
    }
    println!("  Time:      {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_plan(steps: u32, days: i64) -> Result<()> {
    let series = docweave_schedule::timeline_series(steps, days);
    let total: i64 = series.values.iter().sum();

    println!();
    println!("  {}", series.title);
    for (label, value) in series.labels.iter().zip(series.values.iter()) {
        println!("  {value:>4}  {label}");
    }
    println!("  ----");
    println!("  {total:>4}  total (target {days})");
    println!();

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn item(&self, current: usize, total: usize, detail: &str) {
        self.spinner.set_message(format!(
            "Assembling [{current}/{total}] {detail}"
        ));
    }

    fn done(&self, _report: &BatchRunReport) {
        self.spinner.finish_and_clear();
    }
}
