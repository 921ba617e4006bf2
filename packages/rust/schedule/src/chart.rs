//! Chart-series builders for the generated schedule charts.
//!
//! The raster rendering itself belongs to an external charting collaborator;
//! this module produces the numeric series + labels it consumes and persists
//! them as standalone JSON files so rendering is an independently re-runnable
//! stage.

use std::path::Path;

use serde::Serialize;

use docweave_shared::{DocweaveError, Result};

use crate::scale::scale_to_total;
use crate::weights::{CREW_ROLES, ScheduleStep, select_table, weights};

/// A single labeled numeric series (the implementation-timeline chart).
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

/// One crew role's per-step head counts.
#[derive(Debug, Clone, Serialize)]
pub struct RoleSeries {
    pub role: String,
    pub counts: Vec<u32>,
}

/// Scaled day counts plus per-role crew series (the personnel-plan chart).
#[derive(Debug, Clone, Serialize)]
pub struct PersonnelSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub days: Vec<i64>,
    pub roles: Vec<RoleSeries>,
}

fn labels(steps: &[ScheduleStep]) -> Vec<String> {
    steps.iter().map(|s| s.label.to_string()).collect()
}

/// Build the implementation-timeline series for a step-count variant scaled
/// to `target_days`. Unknown step counts fall back to the 21-step table.
pub fn timeline_series(step_count: u32, target_days: i64) -> ChartSeries {
    let (steps, effective) = select_table(step_count);
    ChartSeries {
        title: format!("KẾ HOẠCH THỰC HIỆN CÔNG VIỆC ({effective} BƯỚC)"),
        labels: labels(steps),
        values: scale_to_total(&weights(steps), target_days),
    }
}

/// Build the personnel-plan series: scaled days plus the three crew roles.
pub fn personnel_series(step_count: u32, target_days: i64) -> PersonnelSeries {
    let (steps, effective) = select_table(step_count);
    let roles = CREW_ROLES
        .iter()
        .enumerate()
        .map(|(i, role)| RoleSeries {
            role: (*role).to_string(),
            counts: steps.iter().map(|s| s.crew[i]).collect(),
        })
        .collect();

    PersonnelSeries {
        title: format!("KẾ HOẠCH NHÂN SỰ ({effective} BƯỚC)"),
        labels: labels(steps),
        days: scale_to_total(&weights(steps), target_days),
        roles,
    }
}

/// Persist a series as pretty JSON for the external renderer.
pub fn write_series<T: Serialize>(path: &Path, series: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DocweaveError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(series)
        .map_err(|e| DocweaveError::validation(format!("series serialization: {e}")))?;
    std::fs::write(path, json).map_err(|e| DocweaveError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_series_matches_variant() {
        let series = timeline_series(23, 126);
        assert_eq!(series.labels.len(), 23);
        assert_eq!(series.values.len(), 23);
        assert!(series.title.contains("23 BƯỚC"));
    }

    #[test]
    fn timeline_series_unknown_variant_falls_back() {
        let series = timeline_series(22, 126);
        assert_eq!(series.labels.len(), 21);
        assert!(series.title.contains("21 BƯỚC"));
    }

    #[test]
    fn personnel_series_has_three_roles() {
        let series = personnel_series(21, 126);
        assert_eq!(series.roles.len(), 3);
        assert_eq!(series.roles[0].role, "Quản lý dự án");
        for role in &series.roles {
            assert_eq!(role.counts.len(), 21);
        }
        assert_eq!(series.days.len(), 21);
    }

    #[test]
    fn write_series_creates_file() {
        let dir = std::env::temp_dir().join(format!(
            "docweave-chart-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let series = timeline_series(21, 126);
        let path = dir.join("timeline.json");
        write_series(&path, &series).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("KẾ HOẠCH THỰC HIỆN"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
