// ==========================================
// 坐席产能规划系统 - 判定结果导出
// ==========================================
// 用途: 交给外部报表/可视化的交接点
// 格式: CSV (customer_id,due_date,associate_name,assigned) / JSON (完整 RunReport)
// ==========================================

use crate::domain::decision::AssignmentDecision;
use crate::engine::RunReport;
use crate::exporter::error::{ExportError, ExportResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionWriter;

impl DecisionWriter {
    /// 判定写入任意输出流（CSV）
    pub fn write_csv_to<W: Write>(&self, writer: W, decisions: &[AssignmentDecision]) -> ExportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for decision in decisions {
            csv_writer.serialize(decision)?;
        }
        csv_writer
            .flush()
            .map_err(|e| ExportError::CsvWriteError(e.to_string()))?;
        Ok(())
    }

    /// 判定写入 CSV 文件
    pub fn write_csv<P: AsRef<Path>>(&self, path: P, decisions: &[AssignmentDecision]) -> ExportResult<()> {
        let path = path.as_ref();
        let file = create_file(path)?;
        self.write_csv_to(BufWriter::new(file), decisions)?;
        info!(path = %path.display(), count = decisions.len(), "判定结果已导出 (CSV)");
        Ok(())
    }

    /// 完整运行报告写入 JSON 文件
    pub fn write_report_json<P: AsRef<Path>>(&self, path: P, report: &RunReport) -> ExportResult<()> {
        let path = path.as_ref();
        let file = create_file(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush().map_err(|e| ExportError::FileWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), "运行报告已导出 (JSON)");
        Ok(())
    }
}

fn create_file(path: &Path) -> ExportResult<File> {
    File::create(path).map_err(|e| ExportError::FileWriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
