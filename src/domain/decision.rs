// ==========================================
// 坐席产能规划系统 - 准入判定结果
// ==========================================
// 用途: 交给外部报表/可视化的最终输出
// ==========================================

use crate::domain::customer::MergedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// AssignmentDecision - 准入判定
// ==========================================
// 同一坐席的所有客户共享同一个 assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDecision {
    pub customer_id: String,
    pub due_date: NaiveDate,
    pub associate_name: String,
    pub assigned: bool,
}

impl AssignmentDecision {
    /// 由合并记录生成判定（三元组原样保留）
    pub fn from_merged(record: &MergedRecord, assigned: bool) -> Self {
        Self {
            customer_id: record.customer_id.clone(),
            due_date: record.due_date,
            associate_name: record.associate_name.clone(),
            assigned,
        }
    }
}
