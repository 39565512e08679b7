// ==========================================
// NFL 数据 ETL - DuckDB 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的配置行为
// - 统一标识符 / 字面量转义，避免各处手工拼接 SQL
// ==========================================

use crate::domain::types::TableRef;
use duckdb::{params, Connection};

/// 配置 DuckDB 连接的统一设置
pub fn configure_duckdb_connection(conn: &Connection) -> duckdb::Result<()> {
    conn.execute_batch("SET enable_progress_bar = false;")?;
    Ok(())
}

/// 打开 DuckDB 连接并应用统一配置
pub fn open_duckdb_connection(db_path: &str) -> duckdb::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_duckdb_connection(&conn)?;
    Ok(conn)
}

/// 打开内存库（测试 / 临时任务）
pub fn open_in_memory_connection() -> duckdb::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_duckdb_connection(&conn)?;
    Ok(conn)
}

/// 双引号标识符（内部双引号加倍）
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// 单引号字符串字面量（内部单引号加倍）
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// schema 限定的表名
pub fn qualified_name(target: &TableRef) -> String {
    format!(
        "{}.{}",
        quote_identifier(&target.schema),
        quote_identifier(&target.table)
    )
}

/// 检查表是否存在
pub fn table_exists(conn: &Connection, target: &TableRef) -> duckdb::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
        params![target.schema, target.table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// 按列序读取表的列名
pub fn table_columns(conn: &Connection, target: &TableRef) -> duckdb::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT column_name FROM information_schema.columns \
         WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
    )?;
    let rows = stmt.query_map(params![target.schema, target.table], |row| {
        row.get::<_, String>(0)
    })?;

    let mut columns = Vec::new();
    for row in rows {
        columns.push(row?);
    }
    Ok(columns)
}
