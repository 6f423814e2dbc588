// ==========================================
// 规划参数配置测试
// ==========================================
// 测试目标: 配置文件加载、默认口径、非法值拒绝
// ==========================================


use capacity_planner::config::MAX_PLANNING_HORIZON;
use capacity_planner::{ClampMode, ConfigError, OverduePolicy, PlanningConfig};
use test_helpers::write_config;

#[test]
fn test_load_with_defaults() {
    let file = write_config(
        r#"{"completion_rate": 2.0, "average_unknown": 1.0, "planning_horizon": 5}"#,
    );

    let config = PlanningConfig::from_file(file.path()).unwrap();

    assert_eq!(config.completion_rate, 2.0);
    assert_eq!(config.average_unknown, 1.0);
    assert_eq!(config.planning_horizon, 5);
    assert_eq!(config.clamp_mode, ClampMode::Strict);
    assert_eq!(config.overdue_policy, OverduePolicy::Ignore);
}

#[test]
fn test_load_explicit_modes() {
    let file = write_config(
        r#"{
            "completion_rate": 1,
            "average_unknown": 0.5,
            "planning_horizon": 30,
            "clamp_mode": "LEGACY",
            "overdue_policy": "FOLD_INTO_INITIAL"
        }"#,
    );

    let config = PlanningConfig::from_file(file.path()).unwrap();

    assert_eq!(config.clamp_mode, ClampMode::Legacy);
    assert_eq!(config.overdue_policy, OverduePolicy::FoldIntoInitial);
}

#[test]
fn test_invalid_values_rejected() {
    let cases = [
        r#"{"completion_rate": -1, "average_unknown": 1, "planning_horizon": 5}"#,
        r#"{"completion_rate": 1, "average_unknown": -0.5, "planning_horizon": 5}"#,
        r#"{"completion_rate": 1, "average_unknown": 1, "planning_horizon": 0}"#,
        r#"{"completion_rate": 1, "average_unknown": 1, "planning_horizon": -3}"#,
    ];

    for raw in cases {
        let result = PlanningConfig::from_json_str(raw);
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { .. })),
            "应拒绝非法配置: {}",
            raw
        );
    }
}

#[test]
fn test_missing_field_and_missing_file() {
    let result = PlanningConfig::from_json_str(r#"{"completion_rate": 1, "average_unknown": 1}"#);
    assert!(matches!(result, Err(ConfigError::MissingField(field)) if field == "planning_horizon"));

    let result = PlanningConfig::from_file("/nonexistent/planning.json");
    assert!(matches!(result, Err(ConfigError::FileReadError { .. })));
}

#[test]
fn test_horizon_beyond_limit_rejected() {
    let at_limit = format!(
        r#"{{"completion_rate": 1, "average_unknown": 0, "planning_horizon": {}}}"#,
        MAX_PLANNING_HORIZON
    );
    let config = PlanningConfig::from_json_str(&at_limit).unwrap();
    assert_eq!(config.planning_horizon, MAX_PLANNING_HORIZON);

    let oversized = format!(
        r#"{{"completion_rate": 1, "average_unknown": 0, "planning_horizon": {}}}"#,
        u32::MAX
    );
    let result = PlanningConfig::from_json_str(&oversized);
    assert!(
        matches!(&result, Err(ConfigError::InvalidValue { field, .. }) if field == "planning_horizon"),
        "超出上限的窗口应被拒绝: {:?}",
        result
    );
}
