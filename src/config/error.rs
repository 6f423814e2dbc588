// ==========================================
// 坐席产能规划系统 - 配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// 传播: 全局致命错误,模拟开始前中止运行
// ==========================================

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(String),

    #[error("配置缺少必填字段: {0}")]
    MissingField(String),

    #[error("配置值不合法 (字段 {field}, 值 {value}): {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
