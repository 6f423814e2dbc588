// ==========================================
// 坐席产能规划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、约束接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod associate;
pub mod customer;
pub mod decision;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use associate::{AssociateState, CapacityConstraint};
pub use customer::{AssignmentRecord, DueDateRecord, MergedRecord};
pub use decision::AssignmentDecision;
pub use schedule::{ArrivalSchedule, DailyArrivals};
pub use types::{ClampMode, OverduePolicy};
