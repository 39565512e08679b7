// ==========================================
// NFL 数据 ETL - 领域类型定义
// ==========================================
// 职责: 年份输入、文件格式、目标表引用
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 年份值 (Year Value)
// ==========================================
// 调用方可以传整数，也可以传数字字符串（如 "2023"）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Int(i32),
    Text(String),
}

impl fmt::Display for YearValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearValue::Int(v) => write!(f, "{}", v),
            YearValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for YearValue {
    fn from(value: i32) -> Self {
        YearValue::Int(value)
    }
}

impl From<&str> for YearValue {
    fn from(value: &str) -> Self {
        YearValue::Text(value.to_string())
    }
}

impl From<String> for YearValue {
    fn from(value: String) -> Self {
        YearValue::Text(value)
    }
}

// ==========================================
// 年份规格 (Year Spec)
// ==========================================
// 单个值或值列表；只作为输入，不持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearSpec {
    Single(YearValue),
    Many(Vec<YearValue>),
}

impl YearSpec {
    /// 闭区间 [start, end] 的年份规格（两端点即可，解析时会补齐中间年份）
    pub fn span(start: i32, end: i32) -> Self {
        YearSpec::Many(vec![YearValue::Int(start), YearValue::Int(end)])
    }

    /// 统一为列表视图（标量 → 单元素列表）
    pub fn values(&self) -> Vec<&YearValue> {
        match self {
            YearSpec::Single(v) => vec![v],
            YearSpec::Many(vs) => vs.iter().collect(),
        }
    }
}

impl From<i32> for YearSpec {
    fn from(value: i32) -> Self {
        YearSpec::Single(YearValue::Int(value))
    }
}

impl From<&str> for YearSpec {
    fn from(value: &str) -> Self {
        YearSpec::Single(YearValue::from(value))
    }
}

impl From<Vec<i32>> for YearSpec {
    fn from(values: Vec<i32>) -> Self {
        YearSpec::Many(values.into_iter().map(YearValue::Int).collect())
    }
}

impl From<Vec<&str>> for YearSpec {
    fn from(values: Vec<&str>) -> Self {
        YearSpec::Many(values.into_iter().map(YearValue::from).collect())
    }
}

impl From<Vec<YearValue>> for YearSpec {
    fn from(values: Vec<YearValue>) -> Self {
        YearSpec::Many(values)
    }
}

// ==========================================
// 远端文件格式 (File Format)
// ==========================================
// 序列化格式: 小写扩展名（与 URL 后缀一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Parquet,
    Csv,
}

impl FileFormat {
    /// URL 扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Parquet => "parquet",
            FileFormat::Csv => "csv",
        }
    }

    /// DuckDB 读取函数名
    pub fn reader_function(&self) -> &'static str {
        match self {
            FileFormat::Parquet => "read_parquet",
            FileFormat::Csv => "read_csv_auto",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

// ==========================================
// 目标表引用 (Table Ref)
// ==========================================
// 表名统一大写；schema 保持调用方原样
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: &str) -> Self {
        Self {
            schema: schema.into(),
            table: table.trim().to_uppercase(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ref_uppercases_table_only() {
        let t = TableRef::new("BASE", "snap_counts");
        assert_eq!(t.table, "SNAP_COUNTS");
        assert_eq!(t.to_string(), "BASE.SNAP_COUNTS");
    }

    #[test]
    fn test_year_spec_deserialize_mixed() {
        let spec: YearSpec = serde_json::from_str(r#"["2023", 2020]"#).unwrap();
        assert_eq!(
            spec,
            YearSpec::Many(vec![YearValue::Text("2023".into()), YearValue::Int(2020)])
        );

        let scalar: YearSpec = serde_json::from_str("2022").unwrap();
        assert_eq!(scalar, YearSpec::from(2022));
    }

    #[test]
    fn test_file_format_defaults_to_parquet() {
        assert_eq!(FileFormat::default().extension(), "parquet");
        assert_eq!(FileFormat::Csv.reader_function(), "read_csv_auto");
    }
}
