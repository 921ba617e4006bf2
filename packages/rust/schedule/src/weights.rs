//! Canonical schedule weight tables.
//!
//! Two fixed variants of the archival processing workflow exist: the 21-step
//! and the 23-step process. Each step carries a task label, a baseline
//! duration weight (the 21-step weights sum to 100.0, the 23-step weights to
//! 99.5), and the crew counts per role. Process-wide static data, never
//! mutated at runtime.

use tracing::warn;

/// One step of the canonical workflow.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleStep {
    /// Task label as it appears in generated charts.
    pub label: &'static str,
    /// Baseline duration weight, rescaled to a concrete day total at runtime.
    pub weight: f64,
    /// Crew counts: [project managers, team leads, processing staff].
    pub crew: [u32; 3],
}

/// Crew role names, in `ScheduleStep::crew` order.
pub const CREW_ROLES: [&str; 3] = [
    "Quản lý dự án",
    "Trưởng nhóm chỉnh lý",
    "Nhân sự chỉnh lý",
];

const fn step(label: &'static str, weight: f64, crew: [u32; 3]) -> ScheduleStep {
    ScheduleStep {
        label,
        weight,
        crew,
    }
}

/// The 21-step workflow variant.
pub const STEPS_21: [ScheduleStep; 21] = [
    step("Giao nhận tài liệu và lập biên bản giao nhận tài liệu", 1.0, [1, 1, 5]),
    step("Vận chuyển tài liệu từ kho bảo quản đến địa điểm chỉnh lý", 1.0, [1, 1, 10]),
    step("Vệ sinh sơ bộ tài liệu", 1.0, [1, 1, 10]),
    step("Khảo sát và biên soạn các văn bản hướng dẫn chỉnh lý", 1.0, [1, 1, 2]),
    step("Phân loại tài liệu theo Hướng dẫn phân loại", 20.0, [1, 1, 10]),
    step("Lập hồ sơ hoặc chỉnh sửa hoàn thiện hồ sơ theo Hướng dẫn lập hồ sơ", 30.0, [1, 1, 10]),
    step("Viết các trường thông tin vào phiếu tin", 3.0, [1, 1, 10]),
    step("Kiểm tra chỉnh sửa hồ sơ và phiếu tin", 1.0, [1, 1, 2]),
    step("Hệ thống hóa phiếu tin theo phương án phân loại", 1.0, [1, 1, 10]),
    step("Hệ thống hóa hồ sơ theo phiếu tin", 1.0, [1, 1, 10]),
    step("Biên mục hồ sơ", 15.0, [1, 1, 10]),
    step("Kiểm tra và chỉnh sửa việc biên mục hồ sơ", 1.0, [1, 1, 2]),
    step("Ghi số hồ sơ chính thức vào phiếu tin và lên bìa hồ sơ", 7.0, [1, 1, 10]),
    step("Vệ sinh tài liệu tháo bỏ ghim kẹp làm phẳng và đưa tài liệu vào bìa hồ sơ", 2.0, [1, 1, 10]),
    step("Đưa hồ sơ vào hộp cặp", 3.0, [1, 1, 10]),
    step("Viết in và dán nhãn hộp cặp", 3.0, [1, 1, 10]),
    step("Vận chuyển tài liệu vào kho và xếp lên giá", 1.0, [1, 1, 10]),
    step("Kiểm tra chỉnh sửa việc biên phiếu tin", 1.0, [1, 1, 2]),
    step("Lập mục lục hồ sơ", 5.0, [1, 1, 10]),
    step("Thống kê bó gói lập danh mục và viết thuyết minh tài liệu loại", 1.0, [1, 1, 10]),
    step("Kết thúc chỉnh lý", 1.0, [1, 1, 2]),
];

/// The 23-step workflow variant (adds post-processing handover and
/// database-entry steps).
pub const STEPS_23: [ScheduleStep; 23] = [
    step("Giao nhận tài liệu và lập biên bản giao nhận tài liệu", 0.5, [1, 1, 5]),
    step("Vận chuyển tài liệu từ kho bảo quản đến địa điểm chỉnh lý", 1.0, [1, 1, 10]),
    step("Vệ sinh sơ bộ tài liệu", 1.0, [1, 1, 10]),
    step("Khảo sát và biên soạn các văn bản hướng dẫn chỉnh lý", 1.0, [1, 1, 2]),
    step("Phân loại tài liệu theo Hướng dẫn phân loại", 20.0, [1, 1, 10]),
    step("Lập hồ sơ hoặc chỉnh sửa hoàn thiện hồ sơ theo Hướng dẫn lập hồ sơ", 30.0, [1, 1, 10]),
    step("Viết các trường thông tin vào phiếu tin", 2.0, [1, 1, 10]),
    step("Kiểm tra chỉnh sửa hồ sơ và phiếu tin", 1.0, [1, 1, 2]),
    step("Hệ thống hóa phiếu tin theo phương án phân loại", 1.0, [1, 1, 10]),
    step("Hệ thống hóa hồ sơ theo phiếu tin", 1.0, [1, 1, 10]),
    step("Biên mục hồ sơ", 15.0, [1, 1, 10]),
    step("Kiểm tra và chỉnh sửa việc biên mục hồ sơ", 1.0, [1, 1, 2]),
    step("Ghi số hồ sơ chính thức vào phiếu tin và lên bìa hồ sơ", 6.0, [1, 1, 10]),
    step("Vệ sinh tài liệu tháo bỏ ghim kẹp làm phẳng và đưa tài liệu vào bìa hồ sơ", 1.0, [1, 1, 10]),
    step("Đưa hồ sơ vào hộp cặp", 2.0, [1, 1, 10]),
    step("Viết in và dán nhãn hộp cặp", 2.0, [1, 1, 10]),
    step("Vận chuyển tài liệu vào kho và xếp lên giá", 1.0, [1, 1, 10]),
    step("Giao nhận tài liệu sau chỉnh lý và lập Biên bản giao nhận tài liệu", 1.0, [1, 1, 2]),
    step("Nhập phiếu tin vào cơ sở dữ liệu", 5.0, [1, 1, 10]),
    step("Kiểm tra chỉnh sửa việc nhập phiếu tin", 1.0, [1, 1, 2]),
    step("Lập mục lục hồ sơ", 4.0, [1, 1, 10]),
    step("Thống kê bó gói lập danh mục và viết thuyết minh tài liệu loại", 1.0, [1, 1, 10]),
    step("Kết thúc chỉnh lý", 1.0, [1, 1, 2]),
];

/// Select the canonical table for a detected step count.
///
/// Only 21 and 23 are defined; anything else falls back to the 21-step
/// variant with a logged warning. Returns the table and the effective count.
pub fn select_table(step_count: u32) -> (&'static [ScheduleStep], u32) {
    match step_count {
        21 => (&STEPS_21, 21),
        23 => (&STEPS_23, 23),
        other => {
            warn!(step_count = other, "unknown step count, falling back to 21-step table");
            (&STEPS_21, 21)
        }
    }
}

/// Baseline weights of a table, in step order.
pub fn weights(steps: &[ScheduleStep]) -> Vec<f64> {
    steps.iter().map(|s| s.weight).collect()
}
