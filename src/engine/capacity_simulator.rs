// ==========================================
// 坐席产能规划系统 - 产能模拟引擎
// ==========================================
// 职责: 单坐席逐日前向模拟,判定能否再接一单
// 输入: 坐席产能状态 + 该坐席到单分片 + 规划参数
// 输出: SimulationOutcome（可行性 + 逐日负荷轨迹）
// 红线: 纯函数,不修改 AssociateState; 复杂度 O(planning_horizon)
// ==========================================
// 递推: workload = workload - completion_rate + arrivals(day) + average_unknown
// 初值: current_workload + 1（为新工单预留）
// ==========================================

use crate::config::{PlanningConfig, MAX_PLANNING_HORIZON};
use crate::domain::associate::{AssociateState, CapacityConstraint};
use crate::domain::schedule::DailyArrivals;
use crate::domain::types::{ClampMode, OverduePolicy};
use serde::Serialize;
use tracing::{debug, instrument};

// ==========================================
// 模拟轨迹
// ==========================================

/// 单日负荷
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayWorkload {
    pub day: u32,
    pub arrivals: u32,
    /// 截断前负荷
    pub raw_workload: f64,
    /// 截断到产能后的负荷（展示口径）
    pub workload: f64,
}

/// 首次超限位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreachPoint {
    /// 预留新工单后即超限
    Initial,
    /// 第 N 天超限
    Day(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub feasible: bool,
    pub clamp_mode: ClampMode,
    /// 预留新工单（及可选的逾期折算）后的初始负荷
    pub initial_workload: f64,
    /// 逾期到单数（day_offset < 0）
    pub overdue_arrivals: u32,
    /// 已计入初始负荷的逾期到单数
    pub folded_overdue: u32,
    /// 窗口外到单数（day_offset >= planning_horizon）
    pub beyond_horizon_arrivals: u32,
    /// 截断前的最大负荷（含初始负荷）
    pub peak_workload: f64,
    /// 峰值时的剩余产能（不小于 0）
    pub peak_headroom: f64,
    /// 峰值超出产能的比例（0.0 表示未超限）
    pub peak_overflow_ratio: f64,
    pub first_breach: Option<BreachPoint>,
    pub trace: Vec<DayWorkload>,
}

// ==========================================
// CapacitySimulator - 产能模拟引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacitySimulator {
    // 无状态引擎
}

impl CapacitySimulator {
    pub fn new() -> Self {
        Self {}
    }

    /// 能否再接一单
    pub fn can_assign(
        &self,
        state: &AssociateState,
        arrivals: &DailyArrivals,
        config: &PlanningConfig,
    ) -> bool {
        self.simulate(state, arrivals, config).feasible
    }

    /// 逐日模拟
    ///
    /// 口径（ClampMode）:
    /// - STRICT: 截断前负荷与产能比较（含初始预留）,递推使用截断前负荷
    /// - LEGACY: 每步先截断再比较,递推使用截断后负荷,结果恒为可行
    ///
    /// 逾期口径（OverduePolicy）:
    /// - IGNORE: 负偏移到单不参与模拟
    /// - FOLD_INTO_INITIAL: 负偏移到单计入初始负荷
    #[instrument(skip(self, state, arrivals, config), fields(
        associate = %state.name,
        planning_horizon = config.planning_horizon,
        clamp_mode = %config.clamp_mode
    ))]
    pub fn simulate(
        &self,
        state: &AssociateState,
        arrivals: &DailyArrivals,
        config: &PlanningConfig,
    ) -> SimulationOutcome {
        // 直接构造的配置可能未经校验,窗口按上限截断
        let horizon = config.planning_horizon.min(MAX_PLANNING_HORIZON);

        let overdue_arrivals: u32 = arrivals.range(..0_i64).map(|(_, count)| *count).sum();
        let beyond_horizon_arrivals: u32 = arrivals
            .range(i64::from(horizon)..)
            .map(|(_, count)| *count)
            .sum();

        // 1. 初始负荷（预留新工单）
        let folded_overdue = match config.overdue_policy {
            OverduePolicy::Ignore => 0,
            OverduePolicy::FoldIntoInitial => overdue_arrivals,
        };
        let initial_workload = state.current_workload + 1.0 + f64::from(folded_overdue);

        let mut first_breach = None;
        if config.clamp_mode == ClampMode::Strict && !state.fits(initial_workload) {
            first_breach = Some(BreachPoint::Initial);
        }

        // 2. 逐日递推
        let mut workload = initial_workload;
        let mut peak_workload = initial_workload;
        let mut trace = Vec::with_capacity(horizon as usize);

        for day in 0..horizon {
            let arrivals_today = arrivals.get(&i64::from(day)).copied().unwrap_or(0);
            let raw_workload = workload - config.completion_rate
                + f64::from(arrivals_today)
                + config.average_unknown;
            let clamped = state.clamp_workload(raw_workload);
            peak_workload = peak_workload.max(raw_workload);

            let compared = match config.clamp_mode {
                ClampMode::Strict => raw_workload,
                ClampMode::Legacy => clamped,
            };
            if first_breach.is_none() && !state.fits(compared) {
                first_breach = Some(BreachPoint::Day(day));
            }

            workload = match config.clamp_mode {
                ClampMode::Strict => raw_workload,
                ClampMode::Legacy => clamped,
            };

            trace.push(DayWorkload {
                day,
                arrivals: arrivals_today,
                raw_workload,
                workload: clamped,
            });
        }

        let feasible = first_breach.is_none();
        let peak_headroom = state.remaining_capacity(peak_workload);
        let peak_overflow_ratio = state.overflow_ratio(peak_workload);
        debug!(
            feasible,
            initial_workload,
            peak_workload,
            peak_headroom,
            peak_overflow_ratio,
            overdue_arrivals,
            beyond_horizon_arrivals,
            "产能模拟完成"
        );

        SimulationOutcome {
            feasible,
            clamp_mode: config.clamp_mode,
            initial_workload,
            overdue_arrivals,
            folded_overdue,
            beyond_horizon_arrivals,
            peak_workload,
            peak_headroom,
            peak_overflow_ratio,
            first_breach,
            trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn create_test_config(completion_rate: f64, average_unknown: f64, horizon: i64) -> PlanningConfig {
        PlanningConfig::new(completion_rate, average_unknown, horizon).unwrap()
    }

    fn arrivals(pairs: &[(i64, u32)]) -> DailyArrivals {
        pairs.iter().copied().collect()
    }

    fn raw_trace(outcome: &SimulationOutcome) -> Vec<f64> {
        std::iter::once(outcome.initial_workload)
            .chain(outcome.trace.iter().map(|d| d.raw_workload))
            .collect()
    }

    // ==========================================
    // 基础场景
    // ==========================================

    #[test]
    fn test_steady_decline_trace() {
        // workload=10, capacity=15, 每日 -2 +1
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 10.0, 15.0);
        let config = create_test_config(2.0, 1.0, 5);

        for mode in [ClampMode::Strict, ClampMode::Legacy] {
            let config = config.clone().with_clamp_mode(mode);
            let outcome = simulator.simulate(&state, &DailyArrivals::new(), &config);

            assert!(outcome.feasible, "mode={}", mode);
            assert_eq!(raw_trace(&outcome), vec![11.0, 10.0, 9.0, 8.0, 7.0, 6.0]);
            assert_eq!(outcome.peak_workload, 11.0);
            assert_eq!(outcome.peak_headroom, 4.0);
            assert_eq!(outcome.peak_overflow_ratio, 0.0);
            assert_eq!(outcome.first_breach, None);
        }
    }

    #[test]
    fn test_strict_detects_breach_on_day() {
        // 5+1=6 → 6-1+3+0=8 → 8-1+4=11 > 10
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 5.0, 10.0);
        let config = create_test_config(1.0, 0.0, 4);
        let schedule = arrivals(&[(0, 3), (1, 4)]);

        let outcome = simulator.simulate(&state, &schedule, &config);

        assert!(!outcome.feasible);
        assert_eq!(outcome.first_breach, Some(BreachPoint::Day(1)));
        assert_eq!(outcome.trace[1].raw_workload, 11.0);
        assert_eq!(outcome.trace[1].workload, 10.0);
        assert!(!simulator.can_assign(&state, &schedule, &config));
    }

    #[test]
    fn test_legacy_always_feasible() {
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 5.0, 10.0);
        let config = create_test_config(1.0, 0.0, 4).with_clamp_mode(ClampMode::Legacy);
        let schedule = arrivals(&[(0, 3), (1, 4)]);

        let outcome = simulator.simulate(&state, &schedule, &config);

        assert!(outcome.feasible);
        assert_eq!(outcome.first_breach, None);
        // 旧口径下递推使用截断值: 10 - 1 + 0 = 9
        assert_eq!(outcome.trace[2].raw_workload, 9.0);
    }

    #[test]
    fn test_initial_reservation_breach() {
        // current_workload + 1 > capacity
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 10.0, 10.0);
        let config = create_test_config(5.0, 0.0, 3);

        let outcome = simulator.simulate(&state, &DailyArrivals::new(), &config);
        assert!(!outcome.feasible);
        assert_eq!(outcome.first_breach, Some(BreachPoint::Initial));

        let legacy = config.with_clamp_mode(ClampMode::Legacy);
        assert!(simulator.can_assign(&state, &DailyArrivals::new(), &legacy));
    }

    #[test]
    fn test_exactly_at_capacity_is_feasible() {
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 9.0, 10.0);
        let config = create_test_config(0.0, 0.0, 3);

        assert!(simulator.can_assign(&state, &DailyArrivals::new(), &config));
    }

    // ==========================================
    // 窗口边界
    // ==========================================

    #[test]
    fn test_day_zero_included() {
        // 4+1=5 → 5-0+6=11 > 10
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 4.0, 10.0);
        let config = create_test_config(0.0, 0.0, 1);
        let schedule = arrivals(&[(0, 6)]);

        let outcome = simulator.simulate(&state, &schedule, &config);
        assert_eq!(outcome.first_breach, Some(BreachPoint::Day(0)));
    }

    #[test]
    fn test_beyond_horizon_ignored() {
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 4.0, 10.0);
        let config = create_test_config(0.0, 0.0, 3);
        let schedule = arrivals(&[(3, 50), (10, 2)]);

        let outcome = simulator.simulate(&state, &schedule, &config);
        assert!(outcome.feasible);
        assert_eq!(outcome.beyond_horizon_arrivals, 52);
        assert_eq!(outcome.trace.len(), 3);
    }

    #[test]
    fn test_overdue_ignored_by_default() {
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 4.0, 10.0);
        let config = create_test_config(0.0, 0.0, 3);
        let schedule = arrivals(&[(-2, 8), (-1, 1)]);

        let outcome = simulator.simulate(&state, &schedule, &config);
        assert!(outcome.feasible);
        assert_eq!(outcome.overdue_arrivals, 9);
        assert_eq!(outcome.folded_overdue, 0);
        assert_eq!(outcome.initial_workload, 5.0);
    }

    #[test]
    fn test_overdue_folded_into_initial() {
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 4.0, 10.0);
        let config = create_test_config(0.0, 0.0, 3)
            .with_overdue_policy(OverduePolicy::FoldIntoInitial);
        let schedule = arrivals(&[(-2, 8), (-1, 1)]);

        let outcome = simulator.simulate(&state, &schedule, &config);
        assert_eq!(outcome.folded_overdue, 9);
        assert_eq!(outcome.initial_workload, 14.0);
        assert!(!outcome.feasible);
        assert_eq!(outcome.first_breach, Some(BreachPoint::Initial));
    }

    #[test]
    fn test_empty_schedule_property() {
        // 空计划 + average_unknown=0: STRICT ⇔ current_workload + 1 <= capacity; LEGACY 恒可行
        let simulator = CapacitySimulator::new();
        let cases = [
            (0.0, 1.0),
            (0.0, 0.5),
            (4.0, 5.0),
            (4.5, 5.0),
            (9.0, 5.0),
            (14.0, 15.0),
        ];

        for rate in [0.0, 1.0, 3.5] {
            let config = create_test_config(rate, 0.0, 6);
            for (workload, capacity) in cases {
                let state = AssociateState::new("A", workload, capacity);
                let expected = workload + 1.0 <= capacity;

                assert_eq!(
                    simulator.can_assign(&state, &DailyArrivals::new(), &config),
                    expected,
                    "workload={} capacity={} rate={}",
                    workload,
                    capacity,
                    rate
                );
                let legacy = config.clone().with_clamp_mode(ClampMode::Legacy);
                assert!(simulator.can_assign(&state, &DailyArrivals::new(), &legacy));
            }
        }
    }

    #[test]
    fn test_state_not_mutated() {
        let simulator = CapacitySimulator::new();
        let state = AssociateState::new("A", 5.0, 10.0);
        let snapshot = state.clone();
        let config = create_test_config(1.0, 2.0, 10);

        let _ = simulator.simulate(&state, &arrivals(&[(0, 3)]), &config);
        assert_eq!(state, snapshot);
    }
}
