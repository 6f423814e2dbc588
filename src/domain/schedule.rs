// ==========================================
// 坐席产能规划系统 - 到单计划领域模型
// ==========================================
// 结构: associate_name → (day_offset → count)
// 稀疏映射: 缺失的 day_offset 视为 0
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个坐席的每日到单数（day_offset → count）
pub type DailyArrivals = BTreeMap<i64, u32>;

// ==========================================
// ArrivalSchedule - 到单计划
// ==========================================
// 按坐席分区,BTreeMap 保证遍历顺序稳定（输出可复现）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalSchedule {
    by_associate: BTreeMap<String, DailyArrivals>,
}

impl ArrivalSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一笔到单
    pub(crate) fn record(&mut self, associate_name: &str, day_offset: i64) {
        *self
            .by_associate
            .entry(associate_name.to_string())
            .or_default()
            .entry(day_offset)
            .or_insert(0) += 1;
    }

    /// 取单个坐席的到单分片（不存在返回 None,调用方按空计划处理）
    pub fn slice(&self, associate_name: &str) -> Option<&DailyArrivals> {
        self.by_associate.get(associate_name)
    }

    /// 某坐席某天的到单数
    pub fn arrivals(&self, associate_name: &str, day_offset: i64) -> u32 {
        self.slice(associate_name)
            .and_then(|daily| daily.get(&day_offset).copied())
            .unwrap_or(0)
    }

    /// 某坐席的到单总数
    pub fn total_for(&self, associate_name: &str) -> u32 {
        self.slice(associate_name)
            .map(|daily| daily.values().sum())
            .unwrap_or(0)
    }

    /// 出现在计划中的坐席（按名称排序）
    pub fn associates(&self) -> impl Iterator<Item = &str> {
        self.by_associate.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DailyArrivals)> {
        self.by_associate.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.by_associate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_associate.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_offset_is_zero() {
        let mut schedule = ArrivalSchedule::new();
        schedule.record("A", 2);
        schedule.record("A", 2);
        schedule.record("A", -1);

        assert_eq!(schedule.arrivals("A", 2), 2);
        assert_eq!(schedule.arrivals("A", 0), 0);
        assert_eq!(schedule.arrivals("B", 2), 0);
        assert_eq!(schedule.total_for("A"), 3);
        assert!(schedule.slice("B").is_none());
    }

    #[test]
    fn test_associates_sorted() {
        let mut schedule = ArrivalSchedule::new();
        schedule.record("Zoe", 0);
        schedule.record("Adam", 0);

        let names: Vec<&str> = schedule.associates().collect();
        assert_eq!(names, vec!["Adam", "Zoe"]);
        assert_eq!(schedule.len(), 2);
    }
}
