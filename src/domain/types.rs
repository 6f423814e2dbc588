// ==========================================
// 坐席产能规划系统 - 领域类型定义
// ==========================================
// 职责: 产能模拟的语义开关（截断口径 / 逾期工单口径）
// 序列化格式: SCREAMING_SNAKE_CASE (与配置文件一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 截断口径 (Clamp Mode)
// ==========================================
// 红线: 口径必须显式选择,不得隐式猜测
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClampMode {
    /// 用截断前的负荷与产能比较,截断值仅用于展示
    #[default]
    Strict,
    /// 兼容旧口径: 先截断到产能再比较,结果恒为可接单
    Legacy,
}

impl fmt::Display for ClampMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClampMode::Strict => write!(f, "STRICT"),
            ClampMode::Legacy => write!(f, "LEGACY"),
        }
    }
}

// ==========================================
// 逾期工单口径 (Overdue Policy)
// ==========================================
// 逾期 = day_offset < 0,不在 0..horizon 的模拟窗口内
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverduePolicy {
    /// 忽略逾期工单
    #[default]
    Ignore,
    /// 逾期工单计入初始负荷
    FoldIntoInitial,
}

impl fmt::Display for OverduePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverduePolicy::Ignore => write!(f, "IGNORE"),
            OverduePolicy::FoldIntoInitial => write!(f, "FOLD_INTO_INITIAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ClampMode::default(), ClampMode::Strict);
        assert_eq!(OverduePolicy::default(), OverduePolicy::Ignore);
    }

    #[test]
    fn test_serde_matches_display() {
        let json = serde_json::to_string(&OverduePolicy::FoldIntoInitial).unwrap();
        assert_eq!(json, format!("\"{}\"", OverduePolicy::FoldIntoInitial));

        let mode: ClampMode = serde_json::from_str("\"LEGACY\"").unwrap();
        assert_eq!(mode, ClampMode::Legacy);
    }
}
