// ==========================================
// 坐席产能规划系统 - 输入记录加载器
// ==========================================
// 流程: 文件解析 → 字段映射 → 类型化记录
// 红线: 任一行映射失败即整体失败（不做部分导入）
// ==========================================

use crate::domain::associate::AssociateState;
use crate::domain::customer::{AssignmentRecord, DueDateRecord};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use std::path::Path;
use tracing::{info, instrument};

/// 单次运行的全部输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningInputs {
    pub due_dates: Vec<DueDateRecord>,
    pub assignments: Vec<AssignmentRecord>,
    pub associates: Vec<AssociateState>,
}

// ==========================================
// RecordLoader
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLoader {
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl RecordLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_due_dates<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<DueDateRecord>> {
        let rows = self.parser.parse(path.as_ref())?;
        let records = map_rows(&rows, |row, n| self.mapper.map_due_date(row, n))?;
        info!(count = records.len(), "交期记录加载完成");
        Ok(records)
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_assignments<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ImportResult<Vec<AssignmentRecord>> {
        let rows = self.parser.parse(path.as_ref())?;
        let records = map_rows(&rows, |row, n| self.mapper.map_assignment(row, n))?;
        info!(count = records.len(), "分派记录加载完成");
        Ok(records)
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_associates<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<AssociateState>> {
        let rows = self.parser.parse(path.as_ref())?;
        let records = map_rows(&rows, |row, n| self.mapper.map_associate(row, n))?;
        info!(count = records.len(), "坐席产能状态加载完成");
        Ok(records)
    }

    /// 一次加载三路输入
    pub fn load_all<P: AsRef<Path>>(
        &self,
        due_dates_path: P,
        assignments_path: P,
        associates_path: P,
    ) -> ImportResult<PlanningInputs> {
        Ok(PlanningInputs {
            due_dates: self.load_due_dates(due_dates_path)?,
            assignments: self.load_assignments(assignments_path)?,
            associates: self.load_associates(associates_path)?,
        })
    }
}

/// 逐行映射（行号从 1 开始,不含表头）
fn map_rows<T, F>(rows: &[RawRow], mut map: F) -> ImportResult<Vec<T>>
where
    F: FnMut(&RawRow, usize) -> ImportResult<T>,
{
    rows.iter()
        .enumerate()
        .map(|(idx, row)| map(row, idx + 1))
        .collect()
}
