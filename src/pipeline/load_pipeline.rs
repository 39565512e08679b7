// ==========================================
// NFL 数据 ETL - 装载管道
// ==========================================
// 状态机: Pending → Extracted → Transformed → Loaded
// 任一阶段失败 → Failed，后续阶段不再执行
// 红线: 目标表整体替换（非追加 / 非合并）；暂存表在所有退出路径上清理
// ==========================================

use crate::domain::load::{LoadReport, LoadRequest, LoadStage, LoadState};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::store_trait::AnalyticalStore;
use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 装载时间列名
pub const LOAD_TIMESTAMP_COLUMN: &str = "updated_at";

// ==========================================
// LoadPipeline - 单表装载管道
// ==========================================
pub struct LoadPipeline<'a, S: AnalyticalStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: AnalyticalStore + ?Sized> LoadPipeline<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// 执行一次完整装载
    ///
    /// # 返回
    /// - Ok(LoadReport): 目标表已被替换
    /// - Err(Extraction/Transform/Load): 目标表保持原样
    pub fn run(&self, request: &LoadRequest) -> PipelineResult<LoadReport> {
        let staging = staging_table_name(&request.target.table);
        let result = self.run_stages(request, &staging);

        // 清理暂存表（成功/失败均执行）
        if let Err(e) = self.store.drop_staging(&staging) {
            warn!(staging = %staging, "暂存表清理失败: {}", e);
        }

        match &result {
            Ok(report) => info!(
                rows = report.row_count,
                files = report.manifest_size,
                "Table {} updated successfully",
                report.target
            ),
            Err(e) => error!(
                dataset = %request.dataset,
                table = %request.target,
                stage = %e.stage(),
                "装载失败: {}",
                e
            ),
        }
        result
    }

    fn run_stages(&self, request: &LoadRequest, staging: &str) -> PipelineResult<LoadReport> {
        let mut state = LoadState::Pending;

        // === 阶段 1: Extract ===
        if request.manifest.is_empty() {
            return Err(self.fail(
                &mut state,
                PipelineError::Extraction {
                    manifest: Vec::new(),
                    message: "清单为空".to_string(),
                },
            ));
        }
        let staged_rows = match self.store.stage_manifest(staging, &request.manifest) {
            Ok(rows) => rows,
            Err(e) => {
                error!(manifest = ?request.manifest.locators(), "清单读取失败");
                return Err(self.fail(
                    &mut state,
                    PipelineError::Extraction {
                        manifest: request.manifest.locators().to_vec(),
                        message: e.to_string(),
                    },
                ));
            }
        };
        advance(&mut state, &request.dataset);
        debug!(rows = staged_rows, "暂存完成");

        // === 阶段 2: Transform ===
        let loaded_at = Utc::now();
        if let Err(e) = self
            .store
            .append_timestamp_column(staging, LOAD_TIMESTAMP_COLUMN, loaded_at)
        {
            return Err(self.fail(
                &mut state,
                PipelineError::Transform {
                    message: e.to_string(),
                },
            ));
        }
        advance(&mut state, &request.dataset);

        // === 阶段 3: Load ===
        let row_count = match self.store.replace_table(&request.target, staging) {
            Ok(rows) => rows,
            Err(e) => {
                return Err(self.fail(
                    &mut state,
                    PipelineError::Load {
                        table: request.target.to_string(),
                        message: e.to_string(),
                    },
                ));
            }
        };
        advance(&mut state, &request.dataset);

        Ok(LoadReport {
            dataset: request.dataset.clone(),
            target: request.target.clone(),
            manifest_size: request.manifest.len(),
            row_count,
            loaded_at,
            state,
        })
    }

    fn fail(&self, state: &mut LoadState, err: PipelineError) -> PipelineError {
        let stage = state.next_stage().unwrap_or(LoadStage::Load);
        *state = LoadState::Failed(stage);
        debug!(state = %state, "状态迁移");
        err
    }
}

fn advance(state: &mut LoadState, dataset: &str) {
    if let Some(next) = state.advance() {
        debug!(dataset, from = %state, to = %next, "状态迁移");
        *state = next;
    }
}

/// 暂存表名: 目标表名 + 随机后缀，避免同连接内冲突
fn staging_table_name(table: &str) -> String {
    format!(
        "__stage_{}_{}",
        table.to_lowercase(),
        Uuid::new_v4().simple()
    )
}

/// 执行单表装载并释放连接（所有退出路径都会释放）
pub fn load_and_release<S: AnalyticalStore>(
    store: S,
    request: &LoadRequest,
) -> PipelineResult<LoadReport> {
    let result = LoadPipeline::new(&store).run(request);
    let released = store.release();

    match (result, released) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(e)) => Err(PipelineError::Release(e.to_string())),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release_err)) => {
            warn!("连接释放失败: {}", release_err);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manifest::Manifest;
    use crate::domain::types::{FileFormat, TableRef};
    use crate::pipeline::error::{StoreError, StoreResult};
    use chrono::DateTime;
    use std::cell::RefCell;
    use std::rc::Rc;

    // ==========================================
    // 记录型 Mock 存储
    // ==========================================
    #[derive(Default)]
    struct MockStore {
        calls: Rc<RefCell<Vec<String>>>,
        fail_at: Option<LoadStage>,
    }

    impl MockStore {
        fn failing_at(stage: LoadStage) -> Self {
            Self {
                fail_at: Some(stage),
                ..Default::default()
            }
        }

        fn log(&self, call: &str) {
            self.calls.borrow_mut().push(call.to_string());
        }

        fn check(&self, stage: LoadStage) -> StoreResult<()> {
            if self.fail_at == Some(stage) {
                return Err(StoreError::Query(format!("injected {}", stage)));
            }
            Ok(())
        }
    }

    impl AnalyticalStore for MockStore {
        fn stage_manifest(&self, _staging: &str, manifest: &Manifest) -> StoreResult<u64> {
            self.log("stage");
            self.check(LoadStage::Extract)?;
            Ok(manifest.len() as u64 * 10)
        }

        fn append_timestamp_column(
            &self,
            _staging: &str,
            column: &str,
            _at: DateTime<Utc>,
        ) -> StoreResult<()> {
            self.log(&format!("append:{}", column));
            self.check(LoadStage::Transform)
        }

        fn replace_table(&self, target: &TableRef, _staging: &str) -> StoreResult<u64> {
            self.log(&format!("replace:{}", target));
            self.check(LoadStage::Load)?;
            Ok(20)
        }

        fn drop_staging(&self, _staging: &str) -> StoreResult<()> {
            self.log("drop_staging");
            Ok(())
        }

        fn release(self) -> StoreResult<()> {
            self.log("release");
            Ok(())
        }
    }

    fn request() -> LoadRequest {
        LoadRequest {
            dataset: "snap_counts".to_string(),
            manifest: Manifest::new(
                vec!["a.parquet".to_string(), "b.parquet".to_string()],
                FileFormat::Parquet,
            ),
            target: TableRef::new("BASE", "snap_counts"),
        }
    }

    #[test]
    fn test_happy_path_runs_all_stages() {
        let store = MockStore::default();
        let report = LoadPipeline::new(&store).run(&request()).unwrap();

        assert_eq!(report.state, LoadState::Loaded);
        assert_eq!(report.row_count, 20);
        assert_eq!(report.manifest_size, 2);
        assert_eq!(
            *store.calls.borrow(),
            vec![
                "stage",
                "append:updated_at",
                "replace:BASE.SNAP_COUNTS",
                "drop_staging"
            ]
        );
    }

    #[test]
    fn test_extract_failure_halts_later_stages() {
        let store = MockStore::failing_at(LoadStage::Extract);
        let err = LoadPipeline::new(&store).run(&request()).unwrap_err();

        assert_eq!(err.stage(), LoadStage::Extract);
        match err {
            PipelineError::Extraction { manifest, .. } => assert_eq!(manifest.len(), 2),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(*store.calls.borrow(), vec!["stage", "drop_staging"]);
    }

    #[test]
    fn test_load_failure_reports_table() {
        let store = MockStore::failing_at(LoadStage::Load);
        let err = LoadPipeline::new(&store).run(&request()).unwrap_err();

        assert_eq!(err.stage(), LoadStage::Load);
        assert!(err.to_string().contains("BASE.SNAP_COUNTS"));
        assert_eq!(store.calls.borrow().last().unwrap(), "drop_staging");
    }

    #[test]
    fn test_empty_manifest_never_touches_store() {
        let store = MockStore::default();
        let mut req = request();
        req.manifest = Manifest::new(vec![], FileFormat::Parquet);

        let err = LoadPipeline::new(&store).run(&req).unwrap_err();
        assert_eq!(err.stage(), LoadStage::Extract);
        assert_eq!(*store.calls.borrow(), vec!["drop_staging"]);
    }

    #[test]
    fn test_release_on_success_and_failure() {
        let ok_store = MockStore::default();
        let ok_calls = ok_store.calls.clone();
        assert!(load_and_release(ok_store, &request()).is_ok());
        assert_eq!(ok_calls.borrow().last().unwrap(), "release");

        let bad_store = MockStore::failing_at(LoadStage::Transform);
        let bad_calls = bad_store.calls.clone();
        let err = load_and_release(bad_store, &request()).unwrap_err();
        assert_eq!(err.stage(), LoadStage::Transform);
        assert_eq!(bad_calls.borrow().last().unwrap(), "release");
    }

    #[test]
    fn test_staging_name_is_unique() {
        assert_ne!(staging_table_name("X"), staging_table_name("X"));
        assert!(staging_table_name("SNAP").starts_with("__stage_snap_"));
    }
}
