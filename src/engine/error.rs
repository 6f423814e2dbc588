// ==========================================
// 坐席产能规划系统 - 引擎错误类型
// ==========================================
// 传播口径:
// - Config: 全局致命,运行中止
// - UnknownAssociate / InvalidAssociate / TaskFailed: 局部失败,
//   仅排除该坐席的客户,其余坐席照常输出
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 规划引擎错误类型
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("未知坐席: {associate_name}（产能状态中不存在）")]
    UnknownAssociate { associate_name: String },

    #[error("坐席产能状态不合法 ({associate_name}): {reason}")]
    InvalidAssociate {
        associate_name: String,
        reason: String,
    },

    #[error("坐席评估任务失败 ({associate_name}): {message}")]
    TaskFailed {
        associate_name: String,
        message: String,
    },
}

impl PlanningError {
    /// 是否为全局致命错误
    pub fn is_fatal(&self) -> bool {
        matches!(self, PlanningError::Config(_))
    }
}

/// Result 类型别名
pub type PlanningResult<T> = Result<T, PlanningError>;
