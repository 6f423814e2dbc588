// ==========================================
// 坐席产能规划系统 - 坐席产能领域模型
// ==========================================
// 红线: 单次运行内只读,模拟过程不得修改
// 用途: 产能模拟的静态输入
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// AssociateState - 坐席产能状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociateState {
    pub name: String,           // 坐席名称（主键）
    pub current_workload: f64,  // 当前在手工单数 (>= 0)
    pub capacity: f64,          // 产能上限 (> 0)
}

impl AssociateState {
    pub fn new(name: impl Into<String>, current_workload: f64, capacity: f64) -> Self {
        Self {
            name: name.into(),
            current_workload,
            capacity,
        }
    }

    /// 校验产能状态
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(reason): 不合法原因（供上层包装为错误）
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("坐席名称为空".to_string());
        }
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(format!("产能必须为正数: capacity={}", self.capacity));
        }
        if !self.current_workload.is_finite() || self.current_workload < 0.0 {
            return Err(format!(
                "当前负荷不能为负数: current_workload={}",
                self.current_workload
            ));
        }
        Ok(())
    }
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: CapacitySimulator 约束检查接口
pub trait CapacityConstraint {
    /// 给定负荷是否仍在产能内（等于上限视为未超限）
    fn fits(&self, workload: f64) -> bool;

    /// 截断到产能上限（仅用于展示）
    fn clamp_workload(&self, workload: f64) -> f64;

    /// 剩余产能（不小于 0）
    fn remaining_capacity(&self, workload: f64) -> f64;

    /// 超限比例（0.0 表示未超限）
    fn overflow_ratio(&self, workload: f64) -> f64;
}

impl CapacityConstraint for AssociateState {
    fn fits(&self, workload: f64) -> bool {
        workload <= self.capacity
    }

    fn clamp_workload(&self, workload: f64) -> f64 {
        workload.min(self.capacity)
    }

    fn remaining_capacity(&self, workload: f64) -> f64 {
        (self.capacity - workload).max(0.0)
    }

    fn overflow_ratio(&self, workload: f64) -> f64 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        ((workload - self.capacity) / self.capacity).max(0.0)
    }
}
