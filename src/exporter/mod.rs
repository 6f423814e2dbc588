// ==========================================
// 坐席产能规划系统 - 导出层
// ==========================================
// 职责: 判定结果 → 外部报表输入
// ==========================================

pub mod decision_writer;
pub mod error;

pub use decision_writer::DecisionWriter;
pub use error::{ExportError, ExportResult};
