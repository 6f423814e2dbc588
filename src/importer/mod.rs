// ==========================================
// 坐席产能规划系统 - 导入层
// ==========================================
// 职责: 外部表格数据 → 类型化输入记录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod record_loader;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use record_loader::{PlanningInputs, RecordLoader};
