// ==========================================
// NFL 数据 ETL - 装载审计日志仓储
// ==========================================
// 表: ETL_AUDIT.LOAD_LOG（与业务表同库）
// 红线: 每个数据集的结局都要记录；只追加，不修改
// ==========================================

use crate::domain::load::DatasetOutcome;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::store_trait::LoadAuditSink;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDateTime, Utc};
use duckdb::{params, Connection, ToSql};
use serde::Serialize;
use uuid::Uuid;

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const COLUMNS: &str = "run_id, dataset, target_table, status, stage, row_count, \
                       manifest_size, error, recorded_at";

// ==========================================
// LoadLogEntry - 审计记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadLogEntry {
    pub run_id: String,
    pub dataset: String,
    pub target_table: Option<String>,
    pub status: String, // SUCCEEDED / FAILED
    pub stage: Option<String>,
    pub row_count: Option<i64>,
    pub manifest_size: i64,
    pub error: Option<String>,
    pub recorded_at: NaiveDateTime,
}

impl LoadLogEntry {
    pub fn from_outcome(run_id: Uuid, outcome: &DatasetOutcome) -> Self {
        let recorded_at = Utc::now().naive_utc();
        match outcome {
            DatasetOutcome::Succeeded(report) => Self {
                run_id: run_id.to_string(),
                dataset: report.dataset.clone(),
                target_table: Some(report.target.to_string()),
                status: "SUCCEEDED".to_string(),
                stage: None,
                row_count: Some(report.row_count as i64),
                manifest_size: report.manifest_size as i64,
                error: None,
                recorded_at,
            },
            DatasetOutcome::Failed {
                dataset,
                target,
                stage,
                manifest_size,
                error,
            } => Self {
                run_id: run_id.to_string(),
                dataset: dataset.clone(),
                target_table: target.as_ref().map(|t| t.to_string()),
                status: "FAILED".to_string(),
                stage: Some(stage.to_string()),
                row_count: None,
                manifest_size: *manifest_size as i64,
                error: Some(error.clone()),
                recorded_at,
            },
        }
    }
}

// ==========================================
// LoadLogRepository - 审计日志仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct LoadLogRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LoadLogRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// 建表（幂等）
    pub fn ensure_table(&self) -> RepositoryResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE SCHEMA IF NOT EXISTS ETL_AUDIT;
            CREATE TABLE IF NOT EXISTS ETL_AUDIT.LOAD_LOG (
                run_id VARCHAR NOT NULL,
                dataset VARCHAR NOT NULL,
                target_table VARCHAR,
                status VARCHAR NOT NULL,
                stage VARCHAR,
                row_count BIGINT,
                manifest_size BIGINT NOT NULL,
                error VARCHAR,
                recorded_at VARCHAR NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// 插入审计记录
    pub fn insert(&self, entry: &LoadLogEntry) -> RepositoryResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO ETL_AUDIT.LOAD_LOG (
                run_id, dataset, target_table, status, stage,
                row_count, manifest_size, error, recorded_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                entry.run_id,
                entry.dataset,
                entry.target_table,
                entry.status,
                entry.stage,
                entry.row_count,
                entry.manifest_size,
                entry.error,
                entry.recorded_at.format(TS_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    /// 最近的审计记录（按记录时间倒序）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<LoadLogEntry>> {
        let sql = format!(
            "SELECT {} FROM ETL_AUDIT.LOAD_LOG ORDER BY recorded_at DESC LIMIT {}",
            COLUMNS, limit
        );
        self.query(&sql, &[])
    }

    /// 某一批次的审计记录（按记录时间正序）
    pub fn list_by_run(&self, run_id: Uuid) -> RepositoryResult<Vec<LoadLogEntry>> {
        let sql = format!(
            "SELECT {} FROM ETL_AUDIT.LOAD_LOG WHERE run_id = ? ORDER BY recorded_at",
            COLUMNS
        );
        self.query(&sql, &[&run_id.to_string()])
    }

    fn query(&self, sql: &str, args: &[&dyn ToSql]) -> RepositoryResult<Vec<LoadLogEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<i64>>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, Option<String>>(7)?,
                row.get::<_, String>(8)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (
                run_id,
                dataset,
                target_table,
                status,
                stage,
                row_count,
                manifest_size,
                error,
                ts,
            ) = row?;
            let recorded_at = NaiveDateTime::parse_from_str(&ts, TS_FORMAT).map_err(|e| {
                RepositoryError::FieldValueError {
                    field: "recorded_at".to_string(),
                    message: e.to_string(),
                }
            })?;
            entries.push(LoadLogEntry {
                run_id,
                dataset,
                target_table,
                status,
                stage,
                row_count,
                manifest_size,
                error,
                recorded_at,
            });
        }
        Ok(entries)
    }
}

impl LoadAuditSink for LoadLogRepository<'_> {
    fn record(&self, run_id: Uuid, outcome: &DatasetOutcome) -> PipelineResult<()> {
        self.insert(&LoadLogEntry::from_outcome(run_id, outcome))
            .map_err(|e| PipelineError::Audit(e.to_string()))
    }
}
