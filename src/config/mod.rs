// ==========================================
// 坐席产能规划系统 - 配置层
// ==========================================
// 职责: 规划参数加载与校验
// 存储: JSON 配置文件 (路径由调用方显式传入)
// ==========================================

pub mod error;
pub mod planning_config;

// 重导出核心配置
pub use error::{ConfigError, ConfigResult};
pub use planning_config::{PlanningConfig, MAX_PLANNING_HORIZON};
