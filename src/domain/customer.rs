// ==========================================
// 坐席产能规划系统 - 客户工单领域模型
// ==========================================
// 职责: 交期记录 / 分派记录 / 合并记录
// 主键: customer_id (两路输入的关联键)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DueDateRecord - 交期记录
// ==========================================
// 一个客户一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDateRecord {
    pub customer_id: String,
    pub due_date: NaiveDate,
}

impl DueDateRecord {
    pub fn new(customer_id: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            customer_id: customer_id.into(),
            due_date,
        }
    }
}

// ==========================================
// AssignmentRecord - 分派记录
// ==========================================
// 客户 → 坐席
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub customer_id: String,
    pub associate_name: String,
}

impl AssignmentRecord {
    pub fn new(customer_id: impl Into<String>, associate_name: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            associate_name: associate_name.into(),
        }
    }
}

// ==========================================
// MergedRecord - 合并记录（派生）
// ==========================================
// 仅在单次运行内存活
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub customer_id: String,
    pub due_date: NaiveDate,
    pub associate_name: String,
    /// due_date - reference_date（天）,负数表示已逾期
    pub day_offset: i64,
}

impl MergedRecord {
    /// 是否已逾期（相对基准日）
    pub fn is_overdue(&self) -> bool {
        self.day_offset < 0
    }
}
