// ==========================================
// NFL 数据 ETL - 批次装载
// ==========================================
// 职责: 顺序遍历装载任务，逐个数据集执行 规划 → 装载
// 红线: 单个数据集失败只记录，不中断后续数据集；无并发、无重试
// ==========================================

use crate::domain::load::{BatchReport, DatasetOutcome};
use crate::domain::types::TableRef;
use crate::engine::catalog::{DatasetCatalog, LoadJob};
use crate::engine::manifest::ManifestBuilder;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::load_pipeline::LoadPipeline;
use crate::pipeline::store_trait::{AnalyticalStore, LoadAuditSink};
use chrono::Utc;
use tracing::{error, info, warn};

pub struct BatchRunner {
    catalog: DatasetCatalog,
    builder: ManifestBuilder,
    schema: String,
}

impl BatchRunner {
    pub fn new(catalog: DatasetCatalog, builder: ManifestBuilder, schema: &str) -> Self {
        Self {
            catalog,
            builder,
            schema: schema.to_string(),
        }
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    pub fn builder(&self) -> &ManifestBuilder {
        &self.builder
    }

    /// 顺序执行全部任务
    ///
    /// # 说明
    /// - 解析失败 / 装载失败均记为该数据集的 Failed 结局，继续下一个
    /// - audit 写入失败仅告警
    pub fn run<S: AnalyticalStore + ?Sized>(
        &self,
        store: &S,
        jobs: &[LoadJob],
        audit: Option<&dyn LoadAuditSink>,
    ) -> BatchReport {
        let mut report = BatchReport::start();
        info!(run_id = %report.run_id, jobs = jobs.len(), "批次开始");

        let pipeline = LoadPipeline::new(store);
        for job in jobs {
            let outcome = match self.catalog.plan(job, &self.builder, &self.schema) {
                Ok(request) => match pipeline.run(&request) {
                    Ok(load) => DatasetOutcome::Succeeded(load),
                    Err(e) => failed_outcome(
                        job,
                        Some(request.target.clone()),
                        request.manifest.len(),
                        &e,
                    ),
                },
                Err(e) => {
                    let e = PipelineError::from(e);
                    error!(dataset = %job.dataset, "清单构建失败: {}", e);
                    let target = TableRef::new(self.schema.as_str(), job.table_name());
                    failed_outcome(job, Some(target), 0, &e)
                }
            };

            if let Some(sink) = audit {
                if let Err(e) = sink.record(report.run_id, &outcome) {
                    warn!(dataset = %job.dataset, "{}", e);
                }
            }
            report.outcomes.push(outcome);
        }

        report.finished_at = Some(Utc::now());
        info!(
            run_id = %report.run_id,
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "批次结束"
        );
        report
    }

    /// 执行批次并释放连接
    pub fn run_and_release<S: AnalyticalStore>(
        &self,
        store: S,
        jobs: &[LoadJob],
    ) -> PipelineResult<BatchReport> {
        let report = self.run(&store, jobs, None);
        store
            .release()
            .map_err(|e| PipelineError::Release(e.to_string()))?;
        Ok(report)
    }
}

fn failed_outcome(
    job: &LoadJob,
    target: Option<TableRef>,
    manifest_size: usize,
    err: &PipelineError,
) -> DatasetOutcome {
    DatasetOutcome::Failed {
        dataset: job.dataset.clone(),
        target,
        stage: err.stage(),
        manifest_size,
        error: err.to_string(),
    }
}
