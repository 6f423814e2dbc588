// ==========================================
// 坐席产能规划系统 - 字段映射器实现
// ==========================================
// 职责: 原始行 → 类型化记录（交期 / 分派 / 坐席产能）
// 表头口径: 忽略大小写,空格与连字符视为下划线,支持别名
// ==========================================

use crate::domain::associate::AssociateState;
use crate::domain::customer::{AssignmentRecord, DueDateRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

// ==========================================
// 标准字段及别名
// ==========================================
const CUSTOMER_ID: (&str, &[&str]) = (
    "customer_id",
    &["customer_id", "customerid", "customer", "cust_id", "客户号", "客户编号"],
);
const DUE_DATE: (&str, &[&str]) = ("due_date", &["due_date", "duedate", "due", "交期"]);
const ASSOCIATE_NAME: (&str, &[&str]) = (
    "associate_name",
    &["associate_name", "associate", "assigned_to", "坐席"],
);
// 坐席产能表以坐席为主体,额外接受 name 列
const ASSOCIATE_STATE_NAME: (&str, &[&str]) = (
    "associate_name",
    &["associate_name", "associate", "name", "assigned_to", "坐席"],
);
const CURRENT_WORKLOAD: (&str, &[&str]) = (
    "current_workload",
    &["current_workload", "workload", "在手工单"],
);
const CAPACITY: (&str, &[&str]) = ("capacity", &["capacity", "max_capacity", "产能"]);

/// 表头标准化
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

// ==========================================
// FieldMapper
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper;

impl FieldMapper {
    /// 映射交期记录
    pub fn map_due_date(&self, row: &RawRow, row_number: usize) -> ImportResult<DueDateRecord> {
        let row = normalize_row(row);
        let customer_id = self.require_key(&row, CUSTOMER_ID, row_number)?;
        let due_date = self
            .parse_date(&row, DUE_DATE, row_number)?
            .ok_or_else(|| ImportError::RequiredFieldMissing {
                row: row_number,
                field: DUE_DATE.0.to_string(),
            })?;

        Ok(DueDateRecord {
            customer_id,
            due_date,
        })
    }

    /// 映射分派记录
    pub fn map_assignment(
        &self,
        row: &RawRow,
        row_number: usize,
    ) -> ImportResult<AssignmentRecord> {
        let row = normalize_row(row);
        let customer_id = self.require_key(&row, CUSTOMER_ID, row_number)?;
        let associate_name = self.get_string(&row, ASSOCIATE_NAME).ok_or_else(|| {
            ImportError::RequiredFieldMissing {
                row: row_number,
                field: ASSOCIATE_NAME.0.to_string(),
            }
        })?;

        Ok(AssignmentRecord {
            customer_id,
            associate_name,
        })
    }

    /// 映射坐席产能状态（数值合法性在引擎侧校验）
    pub fn map_associate(&self, row: &RawRow, row_number: usize) -> ImportResult<AssociateState> {
        let row = normalize_row(row);
        let name = self.require_key(&row, ASSOCIATE_STATE_NAME, row_number)?;
        let current_workload = self.require_f64(&row, CURRENT_WORKLOAD, row_number)?;
        let capacity = self.require_f64(&row, CAPACITY, row_number)?;

        Ok(AssociateState {
            name,
            current_workload,
            capacity,
        })
    }

    // ==========================================
    // 字段提取
    // ==========================================

    /// 提取字符串字段（空串视为缺失）,按别名顺序查找
    fn get_string(&self, row: &HashMap<String, String>, field: (&str, &[&str])) -> Option<String> {
        let (_, aliases) = field;
        for alias in aliases {
            if let Some(v) = row.get(*alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    fn require_key(
        &self,
        row: &HashMap<String, String>,
        field: (&str, &[&str]),
        row_number: usize,
    ) -> ImportResult<String> {
        self.get_string(row, field)
            .ok_or_else(|| ImportError::PrimaryKeyMissing {
                row: row_number,
                field: field.0.to_string(),
            })
    }

    fn require_f64(
        &self,
        row: &HashMap<String, String>,
        field: (&str, &[&str]),
        row_number: usize,
    ) -> ImportResult<f64> {
        let value = self
            .get_string(row, field)
            .ok_or_else(|| ImportError::RequiredFieldMissing {
                row: row_number,
                field: field.0.to_string(),
            })?;

        value
            .parse::<f64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: field.0.to_string(),
                message: format!("无法解析为数值: {}", value),
            })
    }

    /// 解析日期（YYYY-MM-DD / YYYYMMDD / YYYY/MM/DD / 带时间部分）
    fn parse_date(
        &self,
        row: &HashMap<String, String>,
        field: (&str, &[&str]),
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        let Some(value) = self.get_string(row, field) else {
            return Ok(None);
        };

        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&value, "%Y%m%d"))
            .or_else(|_| NaiveDate::parse_from_str(&value, "%Y/%m/%d"))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
            })
            .map(Some)
            .map_err(|_| ImportError::DateFormatError {
                row: row_number,
                field: field.0.to_string(),
                value: value.clone(),
            })
    }
}

fn normalize_row(row: &RawRow) -> HashMap<String, String> {
    row.iter()
        .map(|(k, v)| (normalize_header(k), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_due_date_basic() {
        let mapper = FieldMapper;
        let record = mapper
            .map_due_date(&row(&[("customer_id", "1"), ("due_date", "2023-11-25")]), 1)
            .unwrap();

        assert_eq!(record.customer_id, "1");
        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2023, 11, 25).unwrap());
    }

    #[test]
    fn test_map_due_date_header_aliases() {
        let mapper = FieldMapper;
        let record = mapper
            .map_due_date(&row(&[("Customer ID", " 42 "), ("Due-Date", "20231126")]), 1)
            .unwrap();

        assert_eq!(record.customer_id, "42");
        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2023, 11, 26).unwrap());
    }

    #[test]
    fn test_map_due_date_with_time_part() {
        let mapper = FieldMapper;
        let record = mapper
            .map_due_date(
                &row(&[("customer_id", "1"), ("due_date", "2023-11-27 00:00:00")]),
                1,
            )
            .unwrap();

        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2023, 11, 27).unwrap());
    }

    #[test]
    fn test_map_due_date_invalid_date() {
        let mapper = FieldMapper;
        let result = mapper.map_due_date(&row(&[("customer_id", "1"), ("due_date", "soon")]), 3);

        assert!(matches!(result, Err(ImportError::DateFormatError { row: 3, .. })));
    }

    #[test]
    fn test_map_due_date_missing_key() {
        let mapper = FieldMapper;
        let result = mapper.map_due_date(&row(&[("customer_id", ""), ("due_date", "2023-11-25")]), 2);

        assert!(matches!(result, Err(ImportError::PrimaryKeyMissing { row: 2, .. })));
    }

    #[test]
    fn test_map_assignment() {
        let mapper = FieldMapper;
        let record = mapper
            .map_assignment(&row(&[("customer_id", "3"), ("Associate", "Jane Smith")]), 1)
            .unwrap();

        assert_eq!(record.customer_id, "3");
        assert_eq!(record.associate_name, "Jane Smith");
    }

    #[test]
    fn test_map_assignment_missing_associate() {
        let mapper = FieldMapper;
        let result = mapper.map_assignment(&row(&[("customer_id", "3")]), 5);

        assert!(matches!(
            result,
            Err(ImportError::RequiredFieldMissing { row: 5, .. })
        ));
    }

    #[test]
    fn test_map_assignment_ignores_customer_name_column() {
        let mapper = FieldMapper;

        let record = mapper
            .map_assignment(
                &row(&[("customer_id", "3"), ("name", "Acme Ltd"), ("assigned_to", "Jane Smith")]),
                1,
            )
            .unwrap();
        assert_eq!(record.associate_name, "Jane Smith");

        let result = mapper.map_assignment(&row(&[("customer_id", "3"), ("name", "Acme Ltd")]), 2);
        assert!(matches!(
            result,
            Err(ImportError::RequiredFieldMissing { row: 2, .. })
        ));
    }

    #[test]
    fn test_map_associate() {
        let mapper = FieldMapper;
        let state = mapper
            .map_associate(
                &row(&[("name", "John Doe"), ("workload", "10"), ("capacity", "15.5")]),
                1,
            )
            .unwrap();

        assert_eq!(state.name, "John Doe");
        assert_eq!(state.current_workload, 10.0);
        assert_eq!(state.capacity, 15.5);
    }

    #[test]
    fn test_map_associate_invalid_number() {
        let mapper = FieldMapper;
        let result = mapper.map_associate(
            &row(&[("name", "John Doe"), ("workload", "ten"), ("capacity", "15")]),
            4,
        );

        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { row: 4, .. })
        ));
    }
}
