// ==========================================
// NFL 数据 ETL - DuckDB 存储实现
// ==========================================
// 读取: read_parquet / read_csv_auto 接收定位符列表，合并为一个关系
// 替换: 事务内 CREATE SCHEMA → DROP TABLE → CREATE TABLE AS
// ==========================================

use crate::db::{
    open_duckdb_connection, open_in_memory_connection, qualified_name, quote_identifier,
    quote_literal,
};
use crate::domain::manifest::Manifest;
use crate::domain::types::TableRef;
use crate::pipeline::error::{StoreError, StoreResult};
use crate::pipeline::store_trait::AnalyticalStore;
use chrono::{DateTime, Utc};
use duckdb::Connection;
use std::cell::Cell;
use tracing::{debug, info};

pub struct DuckDbStore {
    conn: Connection,
    httpfs_loaded: Cell<bool>,
}

impl DuckDbStore {
    /// 打开数据库文件
    pub fn open(db_path: &str) -> StoreResult<Self> {
        let conn = open_duckdb_connection(db_path)
            .map_err(|e| StoreError::Connection(format!("{}: {}", db_path, e)))?;
        info!("已打开 DuckDB: {}", db_path);
        Ok(Self::from_connection(conn))
    }

    /// 打开内存库
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn =
            open_in_memory_connection().map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            httpfs_loaded: Cell::new(false),
        }
    }

    /// 底层连接（供审计仓储、查询复用）
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// 远端定位符需要 httpfs 扩展；每个连接只加载一次
    fn ensure_httpfs(&self) -> StoreResult<()> {
        if self.httpfs_loaded.get() {
            return Ok(());
        }
        self.conn.execute_batch("INSTALL httpfs; LOAD httpfs;")?;
        self.httpfs_loaded.set(true);
        debug!("httpfs 扩展已加载");
        Ok(())
    }

    fn count_rows(&self, relation: &str) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", relation), [], |row| {
                row.get(0)
            })?;
        Ok(count.max(0) as u64)
    }
}

impl AnalyticalStore for DuckDbStore {
    fn stage_manifest(&self, staging: &str, manifest: &Manifest) -> StoreResult<u64> {
        if manifest.is_remote() {
            self.ensure_httpfs()?;
        }

        let locators = manifest
            .iter()
            .map(|l| quote_literal(l))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "CREATE OR REPLACE TEMP TABLE {} AS SELECT * FROM {}([{}])",
            quote_identifier(staging),
            manifest.format().reader_function(),
            locators
        );
        self.conn.execute_batch(&sql)?;
        self.count_rows(&quote_identifier(staging))
    }

    fn append_timestamp_column(
        &self,
        staging: &str,
        column: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} TIMESTAMP DEFAULT TIMESTAMP {}",
            quote_identifier(staging),
            quote_identifier(column),
            quote_literal(&at.format("%Y-%m-%d %H:%M:%S%.6f").to_string())
        );
        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    fn replace_table(&self, target: &TableRef, staging: &str) -> StoreResult<u64> {
        let table = qualified_name(target);

        self.conn
            .execute_batch("BEGIN TRANSACTION;")
            .map_err(|e| StoreError::Transaction(e.to_string()))?;

        let replaced = self
            .conn
            .execute_batch(&format!(
                "CREATE SCHEMA IF NOT EXISTS {schema};
                 DROP TABLE IF EXISTS {table};
                 CREATE TABLE {table} AS SELECT * FROM {staging};",
                schema = quote_identifier(&target.schema),
                table = table,
                staging = quote_identifier(staging),
            ))
            .map_err(StoreError::from)
            .and_then(|_| self.count_rows(&table));

        match replaced {
            Ok(rows) => {
                self.conn
                    .execute_batch("COMMIT;")
                    .map_err(|e| StoreError::Transaction(e.to_string()))?;
                Ok(rows)
            }
            Err(e) => {
                // 回滚失败不覆盖原始错误
                if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK;") {
                    debug!("回滚失败: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    fn drop_staging(&self, staging: &str) -> StoreResult<()> {
        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {};", quote_identifier(staging)))?;
        Ok(())
    }

    fn release(self) -> StoreResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| StoreError::Connection(e.to_string()))
    }
}
