// ==========================================
// 坐席产能规划系统 - 引擎层
// ==========================================
// 职责: 到单聚合 → 产能模拟 → 准入编排
// 红线: 数据单向流动,后序组件不回调前序组件
// ==========================================

pub mod arrival_aggregator;
pub mod capacity_simulator;
pub mod error;
pub mod orchestrator;

// 重导出核心引擎
pub use arrival_aggregator::{day_offset, Aggregation, ArrivalAggregator};
pub use capacity_simulator::{BreachPoint, CapacitySimulator, DayWorkload, SimulationOutcome};
pub use error::{PlanningError, PlanningResult};
pub use orchestrator::{AssignmentOrchestrator, AssociateEvaluation, AssociateExclusion, RunReport};
