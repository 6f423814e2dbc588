// ==========================================
// 坐席产能规划系统 - 规划参数配置
// ==========================================
// 职责: 全局速率参数 + 规划窗口 + 模拟口径
// 红线: 单次运行内不可变; 基准日是运行参数,不属于配置
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{ClampMode, OverduePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 规划窗口上限（天）
pub const MAX_PLANNING_HORIZON: u32 = 3650;

// ==========================================
// PlanningConfig - 规划参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningConfig {
    /// 每日完成工单数 (>= 0)
    pub completion_rate: f64,
    /// 每日计划外到单均值 (>= 0)
    pub average_unknown: f64,
    /// 规划窗口天数 (1..=MAX_PLANNING_HORIZON)
    pub planning_horizon: u32,
    pub clamp_mode: ClampMode,
    pub overdue_policy: OverduePolicy,
}

/// 配置文件原始结构（所有字段可缺省,缺失由校验统一报错）
#[derive(Debug, Clone, Default, Deserialize)]
struct RawPlanningConfig {
    #[serde(default)]
    completion_rate: Option<f64>,
    #[serde(default)]
    average_unknown: Option<f64>,
    #[serde(default)]
    planning_horizon: Option<i64>,
    #[serde(default)]
    clamp_mode: Option<ClampMode>,
    #[serde(default)]
    overdue_policy: Option<OverduePolicy>,
}

impl PlanningConfig {
    /// 构造并校验配置（口径取默认值: STRICT / IGNORE）
    ///
    /// # 参数
    /// - completion_rate: 每日完成数
    /// - average_unknown: 每日计划外到单均值
    /// - planning_horizon: 规划窗口天数
    ///
    /// # 返回
    /// - Err(ConfigError::InvalidValue): 速率为负/非有限值,或窗口不在 1..=MAX_PLANNING_HORIZON
    pub fn new(
        completion_rate: f64,
        average_unknown: f64,
        planning_horizon: i64,
    ) -> ConfigResult<Self> {
        validate_rate("completion_rate", completion_rate)?;
        validate_rate("average_unknown", average_unknown)?;

        let planning_horizon = validate_horizon(planning_horizon)?;

        Ok(Self {
            completion_rate,
            average_unknown,
            planning_horizon,
            clamp_mode: ClampMode::default(),
            overdue_policy: OverduePolicy::default(),
        })
    }

    pub fn with_clamp_mode(mut self, clamp_mode: ClampMode) -> Self {
        self.clamp_mode = clamp_mode;
        self
    }

    pub fn with_overdue_policy(mut self, overdue_policy: OverduePolicy) -> Self {
        self.overdue_policy = overdue_policy;
        self
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let raw: RawPlanningConfig = serde_json::from_str(raw)?;

        let completion_rate = raw
            .completion_rate
            .ok_or_else(|| ConfigError::MissingField("completion_rate".to_string()))?;
        let average_unknown = raw
            .average_unknown
            .ok_or_else(|| ConfigError::MissingField("average_unknown".to_string()))?;
        let planning_horizon = raw
            .planning_horizon
            .ok_or_else(|| ConfigError::MissingField("planning_horizon".to_string()))?;

        Ok(Self::new(completion_rate, average_unknown, planning_horizon)?
            .with_clamp_mode(raw.clamp_mode.unwrap_or_default())
            .with_overdue_policy(raw.overdue_policy.unwrap_or_default()))
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// 重新校验（字段为 pub,调用方可能直接构造）
    pub fn validate(&self) -> ConfigResult<()> {
        validate_rate("completion_rate", self.completion_rate)?;
        validate_rate("average_unknown", self.average_unknown)?;
        validate_horizon(i64::from(self.planning_horizon))?;
        Ok(())
    }
}

fn validate_horizon(planning_horizon: i64) -> ConfigResult<u32> {
    match u32::try_from(planning_horizon) {
        Ok(horizon) if (1..=MAX_PLANNING_HORIZON).contains(&horizon) => Ok(horizon),
        _ => Err(ConfigError::InvalidValue {
            field: "planning_horizon".to_string(),
            value: planning_horizon.to_string(),
            message: format!("规划窗口必须在 1..={} 天之间", MAX_PLANNING_HORIZON),
        }),
    }
}

fn validate_rate(field: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            message: "速率必须为非负有限数".to_string(),
        });
    }
    Ok(())
}
