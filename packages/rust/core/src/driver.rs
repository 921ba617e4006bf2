//! Document assembly driver: template load, iterated substitution,
//! final formatting pass, persistence, and the end-to-end batch run.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use docweave_docmodel::{DocumentTree, apply_line_spacing, load_document, save_document};
use docweave_formatters::{dispatch, load_artifact, write_artifact};
use docweave_schedule::{
    DEFAULT_TARGET_DAYS, parse_target_days, personnel_series, timeline_series, write_series,
};
use docweave_shared::{
    AssemblyPlanEntry, BatchId, ContentSet, FragmentContent, Result, StyleConfig,
};
use docweave_store::{
    ArtifactMeta, AssemblyRunSummary, BatchDirs, DocumentReport, FormattingSummary, KeyOutcome,
    load_content_set, summary::write_summary,
};

use crate::scalar::{SubstitutionOutcome, substitute_scalar};
use crate::structural::substitute_structural;

/// Key of the step-table fragment driving the conditional process table.
pub const PROCESS_STEPS_KEY: &str = "cac_buoc_thuc_hien";
/// Key of the completion-time fragment the chart target is parsed from.
pub const COMPLETION_TIME_KEY: &str = "thoi_gian_hoan_thanh";

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting batch-run status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called per processed item within a phase.
    fn item(&self, current: usize, total: usize, detail: &str);
    /// Called when the run completes.
    fn done(&self, report: &BatchRunReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn item(&self, _current: usize, _total: usize, _detail: &str) {}
    fn done(&self, _report: &BatchRunReport) {}
}

// ---------------------------------------------------------------------------
// Formatting phase
// ---------------------------------------------------------------------------

/// Outcome of the formatting phase.
#[derive(Debug)]
pub struct FormatOutcome {
    /// Keys that produced an artifact, in store order.
    pub formatted_keys: Vec<String>,
    /// Metadata of written artifact files.
    pub artifacts: Vec<ArtifactMeta>,
    /// Keys skipped, with reasons.
    pub skipped: Vec<(String, String)>,
}

/// Format every successfully extracted fragment and write one artifact file
/// per key. Failed or malformed fragments are skipped, never fatal.
pub fn format_fragments(
    set: &ContentSet,
    style: &StyleConfig,
    templates_dir: &Path,
    artifacts_dir: &Path,
) -> Result<FormatOutcome> {
    let mut outcome = FormatOutcome {
        formatted_keys: Vec::new(),
        artifacts: Vec::new(),
        skipped: Vec::new(),
    };

    for (key, record) in &set.placeholders {
        if !set.is_success(key) {
            let reason = set
                .extraction_log
                .get(key)
                .and_then(|e| e.error.clone())
                .unwrap_or_else(|| "extraction failed".to_string());
            warn!(key, %reason, "skipping fragment");
            outcome.skipped.push((key.clone(), reason));
            continue;
        }

        let Some(artifact) = dispatch(key, record, style, templates_dir) else {
            outcome
                .skipped
                .push((key.clone(), "no artifact produced".to_string()));
            continue;
        };

        let path = write_artifact(artifacts_dir, key, artifact)?;
        let content = std::fs::read_to_string(&path)
            .map_err(|e| docweave_shared::DocweaveError::io(&path, e))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        outcome
            .artifacts
            .push(ArtifactMeta::describe(key, &filename, &content));
        outcome.formatted_keys.push(key.clone());
    }

    info!(
        formatted = outcome.formatted_keys.len(),
        skipped = outcome.skipped.len(),
        "formatting phase complete"
    );

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Per-document assembly
// ---------------------------------------------------------------------------

/// Assemble one document from a template.
///
/// Loads a private copy of the template (missing template is fatal for this
/// document only), substitutes each candidate key in order, persists the
/// working copy after every applied substitution, then applies the uniform
/// line-spacing pass and persists the final artifact. Keys whose fragments
/// are absent or failed are skipped; tokens absent from the template are
/// reported "not found" and assembly continues.
#[allow(clippy::too_many_arguments)]
pub fn assemble_document(
    template_path: &Path,
    output_path: &Path,
    keys: &[String],
    set: &ContentSet,
    artifacts_dir: &Path,
    style: &StyleConfig,
    line_spacing: f64,
) -> Result<DocumentReport> {
    let mut tree = load_document(template_path)?;
    save_document(output_path, &tree)?;

    let mut substituted = 0usize;
    let mut keys_report: Vec<(String, KeyOutcome)> = Vec::new();

    for key in keys {
        let outcome = substitute_key(&mut tree, key, set, artifacts_dir, style);

        if outcome == KeyOutcome::Substituted {
            substituted += 1;
            // Persist after every substitution so a later failure never
            // rolls back earlier successful ones.
            save_document(output_path, &tree)?;
        }
        keys_report.push((key.clone(), outcome));
    }

    apply_line_spacing(&mut tree, line_spacing);
    save_document(output_path, &tree)?;

    info!(
        template = %template_path.display(),
        output = %output_path.display(),
        substituted,
        attempted = keys.len(),
        "document assembled"
    );

    Ok(DocumentReport {
        template: file_name(template_path),
        output: file_name(output_path),
        substituted,
        attempted: keys.len(),
        keys: keys_report,
        error: None,
    })
}

fn substitute_key(
    tree: &mut DocumentTree,
    key: &str,
    set: &ContentSet,
    artifacts_dir: &Path,
    style: &StyleConfig,
) -> KeyOutcome {
    let Some(record) = set.placeholders.get(key) else {
        return KeyOutcome::Skipped;
    };
    if !set.is_success(key) {
        return KeyOutcome::Skipped;
    }

    // Plain text substitutes in-run from the fragment itself; everything
    // else replaces whole paragraphs from the artifact intermediate.
    let outcome = match FragmentContent::parse(record) {
        Some(FragmentContent::PlainText(text)) => substitute_scalar(tree, key, &text),
        _ => match load_artifact(artifacts_dir, key) {
            Ok(artifact) => substitute_structural(tree, key, &artifact, &style.font),
            Err(e) => {
                warn!(key, error = %e, "artifact unavailable, skipping key");
                return KeyOutcome::Skipped;
            }
        },
    };

    match outcome {
        SubstitutionOutcome::Applied => KeyOutcome::Substituted,
        SubstitutionOutcome::NotFound => KeyOutcome::NotFound,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// Batch run
// ---------------------------------------------------------------------------

/// Configuration for one end-to-end batch run.
#[derive(Debug, Clone)]
pub struct BatchRunConfig {
    /// Root directory holding batch working directories.
    pub workspace_root: PathBuf,
    /// Directory holding templates and canonical fragments.
    pub templates_dir: PathBuf,
    /// The batch to process.
    pub batch: BatchId,
    /// Styling defaults threaded through every formatter call.
    pub style: StyleConfig,
    /// Line-spacing multiple for the final formatting pass.
    pub line_spacing: f64,
    /// Documents to assemble, in order.
    pub plans: Vec<AssemblyPlanEntry>,
}

/// Result of one end-to-end batch run.
#[derive(Debug)]
pub struct BatchRunReport {
    pub batch: BatchId,
    /// Keys that produced artifacts.
    pub formatted: usize,
    /// Keys skipped during formatting.
    pub skipped: usize,
    /// Per-document assembly reports, plan order.
    pub documents: Vec<DocumentReport>,
    pub elapsed: Duration,
}

/// Run the full batch pipeline.
///
/// 1. Load the content store
/// 2. Format fragments into artifact intermediates
/// 3. Emit chart series for the external renderer
/// 4. Assemble each planned document (a missing template is recorded and
///    assembly continues with the next document)
/// 5. Write the formatting and assembly summaries
pub fn run_batch(
    config: &BatchRunConfig,
    progress: &dyn ProgressReporter,
) -> Result<BatchRunReport> {
    let start = Instant::now();
    let dirs = BatchDirs::new(&config.workspace_root, &config.batch);
    dirs.create()?;

    info!(batch = %config.batch, "starting batch run");

    // --- Phase 1: Content store ---
    progress.phase("Loading content store");
    let set = load_content_set(&config.workspace_root, &config.batch)?;

    // --- Phase 2: Formatting ---
    progress.phase("Formatting content");
    let format_outcome = format_fragments(
        &set,
        &config.style,
        &config.templates_dir,
        &dirs.artifacts_dir,
    )?;

    let formatting_summary = FormattingSummary {
        batch_id: config.batch.clone(),
        formatted: format_outcome.formatted_keys.clone(),
        artifacts: format_outcome.artifacts,
        skipped: format_outcome.skipped.clone(),
        total_formatted: format_outcome.formatted_keys.len(),
        timestamp: Utc::now(),
    };
    write_summary(
        &dirs.batch_dir.join("formatting_summary.json"),
        &formatting_summary,
    )?;

    // --- Phase 3: Chart series ---
    progress.phase("Building chart series");
    emit_chart_series(&set, &dirs)?;

    // --- Phase 4: Assembly ---
    progress.phase("Assembling documents");
    let keys = format_outcome.formatted_keys;
    let mut documents = Vec::with_capacity(config.plans.len());
    let total = config.plans.len();

    for (i, plan) in config.plans.iter().enumerate() {
        progress.item(i + 1, total, &plan.output);

        let template_path = config.templates_dir.join(&plan.template);
        let output_path = dirs.documents_dir.join(&plan.output);

        match assemble_document(
            &template_path,
            &output_path,
            &keys,
            &set,
            &dirs.artifacts_dir,
            &config.style,
            config.line_spacing,
        ) {
            Ok(report) => documents.push(report),
            Err(e) => {
                warn!(template = %plan.template, error = %e, "document assembly failed, continuing");
                documents.push(DocumentReport {
                    template: plan.template.clone(),
                    output: plan.output.clone(),
                    substituted: 0,
                    attempted: 0,
                    keys: vec![],
                    error: Some(e.to_string()),
                });
            }
        }
    }

    // --- Phase 5: Summaries ---
    progress.phase("Writing run summary");
    let summary = AssemblyRunSummary::new(config.batch.clone(), documents.clone());
    write_summary(&dirs.batch_dir.join("assembly_summary.json"), &summary)?;

    let report = BatchRunReport {
        batch: config.batch.clone(),
        formatted: formatting_summary.total_formatted,
        skipped: formatting_summary.skipped.len(),
        documents,
        elapsed: start.elapsed(),
    };

    progress.done(&report);

    info!(
        batch = %report.batch,
        formatted = report.formatted,
        documents = report.documents.len(),
        elapsed_ms = report.elapsed.as_millis(),
        "batch run complete"
    );

    Ok(report)
}

/// Detect the workflow variant from the step-table fragment.
fn detect_step_count(set: &ContentSet) -> u32 {
    for (key, record) in &set.placeholders {
        if !set.is_success(key) {
            continue;
        }
        if let Some(FragmentContent::StepTable { step_count }) = FragmentContent::parse(record) {
            return step_count;
        }
    }
    warn!("no step-table fragment present, assuming the 21-step workflow");
    21
}

/// Parse the chart day target from the completion-time fragment.
fn chart_target_days(set: &ContentSet) -> i64 {
    let completion_text = set
        .placeholders
        .get(COMPLETION_TIME_KEY)
        .filter(|_| set.is_success(COMPLETION_TIME_KEY))
        .and_then(|record| match FragmentContent::parse(record) {
            Some(FragmentContent::PlainText(text)) => Some(text),
            _ => None,
        });

    match completion_text {
        Some(text) => parse_target_days(&text),
        None => {
            warn!("no completion-time fragment present, using the default day target");
            DEFAULT_TARGET_DAYS
        }
    }
}

/// Write the timeline and personnel chart series for the batch.
fn emit_chart_series(set: &ContentSet, dirs: &BatchDirs) -> Result<()> {
    let step_count = detect_step_count(set);
    let target_days = chart_target_days(set);

    let timeline = timeline_series(step_count, target_days);
    write_series(&dirs.charts_dir.join("implementation_timeline.json"), &timeline)?;

    let personnel = personnel_series(step_count, target_days);
    write_series(&dirs.charts_dir.join("personnel_plan.json"), &personnel)?;

    info!(step_count, target_days, "chart series written");
    Ok(())
}
