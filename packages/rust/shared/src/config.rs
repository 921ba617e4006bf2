//! Application configuration for Docweave.
//!
//! User config lives at `~/.docweave/docweave.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocweaveError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docweave.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docweave";

// ---------------------------------------------------------------------------
// Config structs (matching docweave.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Document styling defaults.
    #[serde(default)]
    pub style: StyleDefaults,

    /// Documents to assemble per batch, in order.
    #[serde(default = "default_documents")]
    pub documents: Vec<AssemblyPlanEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            style: StyleDefaults::default(),
            documents: default_documents(),
        }
    }
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Root directory holding batch working directories.
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: String,

    /// Directory holding template documents and canonical fragments.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Line-spacing multiple applied document-wide after assembly.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            workspace_dir: default_workspace_dir(),
            templates_dir: default_templates_dir(),
            line_spacing: default_line_spacing(),
        }
    }
}

fn default_workspace_dir() -> String {
    "~/docweave-batches".into()
}
fn default_templates_dir() -> String {
    "templates".into()
}
fn default_line_spacing() -> f64 {
    1.4
}

/// `[style]` section. These are the process-wide formatting defaults the
/// formatters receive explicitly; nothing reads them as ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleDefaults {
    /// Font family applied to generated and normalized runs.
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Font size in points.
    #[serde(default = "default_font_size")]
    pub font_size_pt: f64,

    /// Total width budget for generated tables, in inches.
    #[serde(default = "default_page_width")]
    pub page_width_in: f64,

    /// Per-column width band, in inches.
    #[serde(default = "default_min_col")]
    pub min_col_in: f64,
    #[serde(default = "default_max_col")]
    pub max_col_in: f64,

    /// Cells shorter than this many characters are center-aligned.
    #[serde(default = "default_center_threshold")]
    pub center_threshold: usize,

    /// First-line indent for structured paragraphs, in inches.
    #[serde(default = "default_first_line_indent")]
    pub first_line_indent_in: f64,

    /// Spacing after structured paragraphs, in points.
    #[serde(default = "default_space_after")]
    pub space_after_pt: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size_pt: default_font_size(),
            page_width_in: default_page_width(),
            min_col_in: default_min_col(),
            max_col_in: default_max_col(),
            center_threshold: default_center_threshold(),
            first_line_indent_in: default_first_line_indent(),
            space_after_pt: default_space_after(),
        }
    }
}

fn default_font_name() -> String {
    "Times New Roman".into()
}
fn default_font_size() -> f64 {
    14.0
}
fn default_page_width() -> f64 {
    7.0
}
fn default_min_col() -> f64 {
    0.6
}
fn default_max_col() -> f64 {
    2.0
}
fn default_center_threshold() -> usize {
    10
}
fn default_first_line_indent() -> f64 {
    0.5
}
fn default_space_after() -> f64 {
    6.0
}

/// `[[documents]]` entry: one template to assemble into one output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyPlanEntry {
    /// Template file name inside the templates directory.
    pub template: String,
    /// Output file name inside the batch `documents/` directory.
    pub output: String,
}

fn plan(stem: &str) -> AssemblyPlanEntry {
    AssemblyPlanEntry {
        template: format!("{stem}_template.json"),
        output: format!("{stem}.json"),
    }
}

/// The standard procurement document set assembled for every batch.
fn default_documents() -> Vec<AssemblyPlanEntry> {
    [
        "02_MUC_DO_HIEU_BIET",
        "04_CAM_KET_DAP_UNG_YEU_CAU_CHUONG_V",
        "05_CAM_KET_DAP_UNG_VPP",
        "06_TINH_BAO_MAT",
        "08_CAM_KET_THUC_PM",
        "10_QUY_DINH_AP_DUNG",
        "11_CAM_KET_THUC_HIEN_GOI_THAU",
        "12_CAM_KET_BAO_HANH_XU_LY_SU_CO",
        "14_GIAI_PHAP_VA_PHUONG_PHAP_LUAN_THUC_HIEN_GOI_THAU",
    ]
    .into_iter()
    .map(plan)
    .collect()
}

// ---------------------------------------------------------------------------
// Runtime style config (merged from config file, threaded explicitly)
// ---------------------------------------------------------------------------

/// A font family + size pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub name: String,
    pub size_pt: f64,
}

/// Runtime styling passed explicitly into every formatter call.
#[derive(Debug, Clone)]
pub struct StyleConfig {
    /// Fixed font for generated runs and font normalization.
    pub font: FontSpec,
    /// Table width budget and band, in inches.
    pub page_width_in: f64,
    pub min_col_in: f64,
    pub max_col_in: f64,
    /// Center-alignment threshold in characters.
    pub center_threshold: usize,
    /// Structured-paragraph indent and spacing.
    pub first_line_indent_in: f64,
    pub space_after_pt: f64,
}

impl From<&AppConfig> for StyleConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            font: FontSpec {
                name: config.style.font_name.clone(),
                size_pt: config.style.font_size_pt,
            },
            page_width_in: config.style.page_width_in,
            min_col_in: config.style.min_col_in,
            max_col_in: config.style.max_col_in,
            center_threshold: config.style.center_threshold,
            first_line_indent_in: config.style.first_line_indent_in,
            space_after_pt: config.style.space_after_pt,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docweave/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocweaveError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docweave/docweave.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocweaveError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocweaveError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocweaveError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocweaveError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocweaveError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("workspace_dir"));
        assert!(toml_str.contains("Times New Roman"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.line_spacing, 1.4);
        assert_eq!(parsed.style.font_size_pt, 14.0);
        assert_eq!(parsed.documents.len(), 9);
    }

    #[test]
    fn config_with_custom_documents() {
        let toml_str = r#"
[defaults]
workspace_dir = "/tmp/batches"

[[documents]]
template = "cover_template.json"
output = "cover.json"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.documents.len(), 1);
        assert_eq!(config.documents[0].output, "cover.json");
        assert_eq!(config.defaults.workspace_dir, "/tmp/batches");
    }

    #[test]
    fn style_config_from_app_config() {
        let app = AppConfig::default();
        let style = StyleConfig::from(&app);
        assert_eq!(style.font.name, "Times New Roman");
        assert_eq!(style.page_width_in, 7.0);
        assert_eq!(style.min_col_in, 0.6);
        assert_eq!(style.max_col_in, 2.0);
        assert_eq!(style.center_threshold, 10);
    }
}
