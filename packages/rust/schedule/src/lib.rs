//! Schedule scaling for Docweave.
//!
//! Converts the canonical baseline weight tables into integer day-count
//! distributions matching an extracted completion-time target, and builds
//! the chart series the external renderer consumes.

pub mod chart;
pub mod scale;
pub mod weights;

pub use chart::{ChartSeries, PersonnelSeries, RoleSeries, personnel_series, timeline_series, write_series};
pub use scale::{DEFAULT_TARGET_DAYS, parse_target_days, scale_to_total};
pub use weights::{CREW_ROLES, STEPS_21, STEPS_23, ScheduleStep, select_table, weights};
