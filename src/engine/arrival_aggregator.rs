// ==========================================
// 坐席产能规划系统 - 到单聚合引擎
// ==========================================
// 职责: 交期 ⋈ 分派（内连接）→ day_offset → 按坐席/按天计数
// 输入: 交期记录 + 分派记录 + 基准日
// 输出: ArrivalSchedule + 合并记录序列 + 未匹配客户
// 红线: 纯函数,不修改输入; 基准日必须显式传入
// ==========================================

use crate::domain::customer::{AssignmentRecord, DueDateRecord, MergedRecord};
use crate::domain::schedule::ArrivalSchedule;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, warn};

/// 交期相对基准日的天数偏移（负数表示已逾期）
pub fn day_offset(due_date: NaiveDate, reference_date: NaiveDate) -> i64 {
    (due_date - reference_date).num_days()
}

// ==========================================
// Aggregation - 聚合结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub schedule: ArrivalSchedule,
    /// 合并记录（保持交期输入顺序）
    pub merged: Vec<MergedRecord>,
    /// 交期中存在但分派中缺失的客户（按输入顺序）
    pub unmatched_customers: Vec<String>,
}

impl Aggregation {
    /// 某坐席的合并记录
    pub fn merged_for<'a>(
        &'a self,
        associate_name: &'a str,
    ) -> impl Iterator<Item = &'a MergedRecord> + 'a {
        self.merged
            .iter()
            .filter(move |r| r.associate_name == associate_name)
    }
}

// ==========================================
// ArrivalAggregator - 到单聚合引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrivalAggregator {
    // 无状态引擎
}

impl ArrivalAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 聚合到单计划
    ///
    /// 规则:
    /// 1) 按 customer_id 内连接,分派缺失的客户静默剔除（记入 unmatched_customers）
    /// 2) 分派重复: 首条生效; 交期重复: 首行生效
    /// 3) 按坐席、按 day_offset 计数
    ///
    /// # 参数
    /// - `due_dates`: 交期记录
    /// - `assignments`: 分派记录
    /// - `reference_date`: 基准日
    #[instrument(skip(self, due_dates, assignments), fields(
        due_dates_count = due_dates.len(),
        assignments_count = assignments.len(),
        reference_date = %reference_date
    ))]
    pub fn aggregate(
        &self,
        due_dates: &[DueDateRecord],
        assignments: &[AssignmentRecord],
        reference_date: NaiveDate,
    ) -> Aggregation {
        // 1. 分派索引（首条生效）
        let mut owner_by_customer: HashMap<&str, &str> = HashMap::with_capacity(assignments.len());
        for assignment in assignments {
            match owner_by_customer.get(assignment.customer_id.as_str()) {
                Some(existing) => {
                    warn!(
                        customer_id = %assignment.customer_id,
                        kept = %existing,
                        ignored = %assignment.associate_name,
                        "分派记录重复,保留首条"
                    );
                }
                None => {
                    owner_by_customer.insert(
                        assignment.customer_id.as_str(),
                        assignment.associate_name.as_str(),
                    );
                }
            }
        }

        // 2. 内连接 + 计算偏移
        let mut schedule = ArrivalSchedule::new();
        let mut merged = Vec::with_capacity(due_dates.len());
        let mut unmatched_customers = Vec::new();
        let mut seen: HashSet<&str> = HashSet::with_capacity(due_dates.len());

        for record in due_dates {
            if !seen.insert(record.customer_id.as_str()) {
                warn!(customer_id = %record.customer_id, "交期记录重复,保留首行");
                continue;
            }

            let Some(associate_name) = owner_by_customer.get(record.customer_id.as_str()) else {
                unmatched_customers.push(record.customer_id.clone());
                continue;
            };

            let offset = day_offset(record.due_date, reference_date);
            schedule.record(associate_name, offset);
            merged.push(MergedRecord {
                customer_id: record.customer_id.clone(),
                due_date: record.due_date,
                associate_name: associate_name.to_string(),
                day_offset: offset,
            });
        }

        if !unmatched_customers.is_empty() {
            warn!(
                unmatched_count = unmatched_customers.len(),
                "部分客户无分派记录,已剔除"
            );
        }

        debug!(
            merged_count = merged.len(),
            associates_count = schedule.len(),
            "到单聚合完成"
        );

        Aggregation {
            schedule,
            merged,
            unmatched_customers,
        }
    }
}
