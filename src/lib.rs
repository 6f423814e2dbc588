// ==========================================
// 坐席产能规划系统 - 核心库
// ==========================================
// 系统定位: 准入判定（坐席能否再接一单）
// 数据流: 输入记录 → 到单聚合 → 产能模拟 → 准入判定
// 红线: 单次运行无状态,基准日显式传入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 聚合/模拟/编排
pub mod engine;

// 导入层 - 外部表格数据
pub mod importer;

// 导出层 - 判定结果
pub mod exporter;

// 配置层 - 规划参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ArrivalSchedule, AssignmentDecision, AssignmentRecord, AssociateState, ClampMode,
    DailyArrivals, DueDateRecord, MergedRecord, OverduePolicy,
};

// 配置
pub use config::{ConfigError, PlanningConfig};

// 引擎
pub use engine::{
    Aggregation, ArrivalAggregator, AssignmentOrchestrator, CapacitySimulator, PlanningError,
    RunReport, SimulationOutcome,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "坐席产能规划系统";
