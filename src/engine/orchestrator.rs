// ==========================================
// 坐席产能规划系统 - 引擎编排器
// ==========================================
// 用途: 协调到单聚合与产能模拟的执行顺序
// 流程: 聚合（一次）→ 逐坐席模拟（每坐席一次）→ 按合并记录输出判定
// 红线: 同一坐席的所有客户共享同一判定; 坐席之间互不影响
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::associate::AssociateState;
use crate::domain::customer::{AssignmentRecord, DueDateRecord};
use crate::domain::decision::AssignmentDecision;
use crate::domain::schedule::DailyArrivals;
use crate::engine::arrival_aggregator::{Aggregation, ArrivalAggregator};
use crate::engine::capacity_simulator::{CapacitySimulator, SimulationOutcome};
use crate::engine::error::{PlanningError, PlanningResult};
use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

// ==========================================
// RunReport - 运行结果
// ==========================================

/// 单坐席评估结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociateEvaluation {
    pub associate_name: String,
    pub customer_count: usize,
    pub outcome: SimulationOutcome,
}

impl AssociateEvaluation {
    pub fn assigned(&self) -> bool {
        self.outcome.feasible
    }
}

/// 被排除的坐席（局部失败）
#[derive(Debug, Serialize)]
pub struct AssociateExclusion {
    pub associate_name: String,
    /// 受影响的客户（不输出判定）
    pub customer_ids: Vec<String>,
    #[serde(serialize_with = "serialize_error")]
    pub error: PlanningError,
}

fn serialize_error<S: Serializer>(error: &PlanningError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.to_string())
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub reference_date: NaiveDate,
    pub config: PlanningConfig,
    /// 判定（按合并记录顺序）
    pub decisions: Vec<AssignmentDecision>,
    /// 坐席评估（按坐席名称排序）
    pub evaluations: Vec<AssociateEvaluation>,
    pub exclusions: Vec<AssociateExclusion>,
    pub unmatched_customers: Vec<String>,
}

impl RunReport {
    /// 是否所有坐席均完成评估
    pub fn is_complete(&self) -> bool {
        self.exclusions.is_empty()
    }

    pub fn assigned_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.assigned).count()
    }

    pub fn decision_for(&self, customer_id: &str) -> Option<&AssignmentDecision> {
        self.decisions.iter().find(|d| d.customer_id == customer_id)
    }

    pub fn evaluation_for(&self, associate_name: &str) -> Option<&AssociateEvaluation> {
        self.evaluations
            .iter()
            .find(|e| e.associate_name == associate_name)
    }

    pub fn exclusion_for(&self, associate_name: &str) -> Option<&AssociateExclusion> {
        self.exclusions
            .iter()
            .find(|e| e.associate_name == associate_name)
    }
}

// ==========================================
// AssignmentOrchestrator - 引擎编排器
// ==========================================

#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentOrchestrator {
    aggregator: ArrivalAggregator,
    simulator: CapacitySimulator,
}

impl AssignmentOrchestrator {
    pub fn new() -> Self {
        Self {
            aggregator: ArrivalAggregator::new(),
            simulator: CapacitySimulator::new(),
        }
    }

    /// 执行一次准入判定（同步）
    ///
    /// # 参数
    /// - due_dates: 交期记录
    /// - assignments: 分派记录
    /// - associates: 坐席产能状态
    /// - config: 规划参数
    /// - reference_date: 基准日
    ///
    /// # 返回
    /// - Ok(RunReport): 判定集合（可能附带坐席排除）
    /// - Err(PlanningError::Config): 配置非法,未执行任何模拟
    #[instrument(skip_all, fields(reference_date = %reference_date))]
    pub fn run(
        &self,
        due_dates: &[DueDateRecord],
        assignments: &[AssignmentRecord],
        associates: &[AssociateState],
        config: &PlanningConfig,
        reference_date: NaiveDate,
    ) -> PlanningResult<RunReport> {
        config.validate()?;
        log_run_start(due_dates.len(), assignments.len(), associates.len(), config);

        // 步骤1: 到单聚合
        let aggregation = self
            .aggregator
            .aggregate(due_dates, assignments, reference_date);
        let directory = build_directory(associates);

        // 步骤2: 逐坐席模拟
        let results: Vec<(String, PlanningResult<SimulationOutcome>)> = aggregation
            .schedule
            .iter()
            .map(|(name, arrivals)| {
                let result = lookup_associate(&directory, name)
                    .map(|state| self.simulator.simulate(state, arrivals, config));
                (name.to_string(), result)
            })
            .collect();

        // 步骤3: 组装判定
        Ok(assemble_report(aggregation, results, config, reference_date))
    }

    /// 执行一次准入判定（按坐席并行）
    ///
    /// 与 `run` 语义一致: 每个坐席的模拟作为独立阻塞任务执行,
    /// 结果按坐席名称顺序回收,输出与 `run` 完全相同
    #[instrument(skip_all, fields(reference_date = %reference_date))]
    pub async fn run_parallel(
        &self,
        due_dates: &[DueDateRecord],
        assignments: &[AssignmentRecord],
        associates: &[AssociateState],
        config: &PlanningConfig,
        reference_date: NaiveDate,
    ) -> PlanningResult<RunReport> {
        config.validate()?;
        log_run_start(due_dates.len(), assignments.len(), associates.len(), config);

        let aggregation = self
            .aggregator
            .aggregate(due_dates, assignments, reference_date);
        let directory = build_directory(associates);
        let shared_config = Arc::new(config.clone());

        let tasks = aggregation.schedule.iter().map(|(name, arrivals)| {
            let name = name.to_string();
            let lookup = lookup_associate(&directory, &name).cloned();
            let arrivals: DailyArrivals = arrivals.clone();
            let config = Arc::clone(&shared_config);
            let simulator = self.simulator;

            async move {
                let state = match lookup {
                    Ok(state) => state,
                    Err(e) => return (name, Err(e)),
                };
                let joined = tokio::task::spawn_blocking(move || {
                    simulator.simulate(&state, &arrivals, &config)
                })
                .await;

                let result = joined.map_err(|e| PlanningError::TaskFailed {
                    associate_name: name.clone(),
                    message: e.to_string(),
                });
                (name, result)
            }
        });

        let results = join_all(tasks).await;

        Ok(assemble_report(aggregation, results, config, reference_date))
    }
}

// ==========================================
// 内部辅助函数
// ==========================================

fn log_run_start(
    due_dates_count: usize,
    assignments_count: usize,
    associates_count: usize,
    config: &PlanningConfig,
) {
    info!(
        due_dates_count,
        assignments_count,
        associates_count,
        planning_horizon = config.planning_horizon,
        completion_rate = config.completion_rate,
        average_unknown = config.average_unknown,
        clamp_mode = %config.clamp_mode,
        overdue_policy = %config.overdue_policy,
        "开始执行准入判定"
    );
}

/// 坐席索引（名称重复时首条生效）
fn build_directory(associates: &[AssociateState]) -> HashMap<&str, &AssociateState> {
    let mut directory = HashMap::with_capacity(associates.len());
    for state in associates {
        if directory.contains_key(state.name.as_str()) {
            warn!(associate = %state.name, "坐席产能状态重复,保留首条");
            continue;
        }
        directory.insert(state.name.as_str(), state);
    }
    directory
}

/// 查找并校验坐席产能状态
fn lookup_associate<'a>(
    directory: &HashMap<&str, &'a AssociateState>,
    associate_name: &str,
) -> PlanningResult<&'a AssociateState> {
    let state = directory
        .get(associate_name)
        .copied()
        .ok_or_else(|| PlanningError::UnknownAssociate {
            associate_name: associate_name.to_string(),
        })?;

    state
        .validate()
        .map_err(|reason| PlanningError::InvalidAssociate {
            associate_name: associate_name.to_string(),
            reason,
        })?;

    Ok(state)
}

/// 将逐坐席结果写回合并记录
fn assemble_report(
    aggregation: Aggregation,
    results: Vec<(String, PlanningResult<SimulationOutcome>)>,
    config: &PlanningConfig,
    reference_date: NaiveDate,
) -> RunReport {
    let mut verdicts: HashMap<String, bool> = HashMap::with_capacity(results.len());
    let mut evaluations = Vec::new();
    let mut exclusions = Vec::new();

    // 按坐席分组客户（一次遍历）
    let mut customers_by_associate: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in &aggregation.merged {
        customers_by_associate
            .entry(record.associate_name.as_str())
            .or_default()
            .push(record.customer_id.as_str());
    }

    for (associate_name, result) in results {
        let customers = customers_by_associate
            .get(associate_name.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let customer_count = customers.len();
        match result {
            Ok(outcome) => {
                verdicts.insert(associate_name.clone(), outcome.feasible);
                evaluations.push(AssociateEvaluation {
                    associate_name,
                    customer_count,
                    outcome,
                });
            }
            Err(error) => {
                warn!(
                    associate = %associate_name,
                    customer_count,
                    error = %error,
                    "坐席评估失败,其客户不输出判定"
                );
                let customer_ids = customers.iter().map(|id| id.to_string()).collect();
                exclusions.push(AssociateExclusion {
                    associate_name,
                    customer_ids,
                    error,
                });
            }
        }
    }

    let decisions: Vec<AssignmentDecision> = aggregation
        .merged
        .iter()
        .filter_map(|record| {
            verdicts
                .get(&record.associate_name)
                .map(|assigned| AssignmentDecision::from_merged(record, *assigned))
        })
        .collect();

    let report = RunReport {
        reference_date,
        config: config.clone(),
        decisions,
        evaluations,
        exclusions,
        unmatched_customers: aggregation.unmatched_customers,
    };

    info!(
        decisions_count = report.decisions.len(),
        assigned_count = report.assigned_count(),
        evaluated_associates = report.evaluations.len(),
        excluded_associates = report.exclusions.len(),
        unmatched_customers = report.unmatched_customers.len(),
        "准入判定完成"
    );

    report
}
