//! 배치 비교기.
//!
//! 모든 파일 × 두 백엔드 압축을 한꺼번에 시작하고 입력 순서대로 결과를 모은다.
//! - `run`: 첫 실패에서 배치 전체 중단 (부분 결과 없음)
//! - `run_isolated`: 파일 단위로 성공/실패를 따로 수집

use futures::future::{join_all, try_join_all};
use imgbench_core::config::{BenchConfig, FailurePolicy};
use imgbench_core::error::CoreError;
use imgbench_core::models::report::{ComparisonResult, FileOutcome};
use imgbench_core::ports::compressor::ImageCompressor;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 실패 정책에 따른 배치 결과
#[derive(Debug)]
pub enum BatchOutcome {
    /// 전체 성공 (FailFast)
    Complete(Vec<ComparisonResult>),
    /// 파일별 결과 (Isolate)
    Isolated(Vec<FileOutcome>),
}

/// 두 압축 어댑터를 파일 목록에 대해 비교 실행
pub struct BatchComparator {
    config: BenchConfig,
    adapters: [Arc<dyn ImageCompressor>; 2],
}

impl BatchComparator {
    /// 새 비교기 생성 (`adapters`는 `[primary, secondary]` 순서)
    pub fn new(config: BenchConfig, adapters: [Arc<dyn ImageCompressor>; 2]) -> Self {
        Self { config, adapters }
    }

    /// 현재 설정
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// 백엔드별 출력 디렉토리 생성 (첫 쓰기 전에 완료)
    pub async fn prepare_output_dirs(&self) -> Result<(), CoreError> {
        for adapter in &self.adapters {
            let dir = self
                .config
                .output_dir
                .join(adapter.backend().output_dir_name());
            tokio::fs::create_dir_all(&dir).await?;
            debug!("출력 디렉토리 준비: {}", dir.display());
        }
        Ok(())
    }

    /// 설정된 실패 정책으로 실행
    pub async fn run_configured(&self) -> Result<BatchOutcome, CoreError> {
        match self.config.failure_policy {
            FailurePolicy::FailFast => self.run().await.map(BatchOutcome::Complete),
            FailurePolicy::Isolate => self.run_isolated().await.map(BatchOutcome::Isolated),
        }
    }

    /// 전체 배치 실행. 어느 하나라도 실패하면 에러 반환.
    pub async fn run(&self) -> Result<Vec<ComparisonResult>, CoreError> {
        self.prepare_output_dirs().await?;
        info!("배치 시작: {}개 파일 (fail-fast)", self.config.file_names.len());

        let jobs = self
            .config
            .file_names
            .iter()
            .map(|file_name| self.compare_file(file_name));
        let results = try_join_all(jobs).await?;

        info!("배치 완료: {}개 파일", results.len());
        Ok(results)
    }

    /// 파일 단위 격리 실행. 디렉토리 준비 실패만 배치 에러.
    pub async fn run_isolated(&self) -> Result<Vec<FileOutcome>, CoreError> {
        self.prepare_output_dirs().await?;
        info!("배치 시작: {}개 파일 (isolate)", self.config.file_names.len());

        let jobs = self.config.file_names.iter().map(|file_name| async move {
            let result = self.compare_file(file_name).await;
            if let Err(e) = &result {
                warn!("{} 비교 실패: {}", file_name, e);
            }
            FileOutcome {
                file_name: file_name.clone(),
                result,
            }
        });
        let outcomes = join_all(jobs).await;

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            "배치 완료: 성공 {}개, 실패 {}개",
            outcomes.len() - failed,
            failed
        );
        Ok(outcomes)
    }

    /// 파일 1개를 두 백엔드로 동시에 압축
    async fn compare_file(&self, file_name: &str) -> Result<ComparisonResult, CoreError> {
        let input_path = self.config.input_path(file_name);
        let output_dir = &self.config.output_dir;
        let [primary, secondary] = &self.adapters;

        let pair = async {
            tokio::try_join!(
                primary.compress(&input_path, output_dir, file_name),
                secondary.compress(&input_path, output_dir, file_name),
            )
        };

        let (first, second) = match self.config.timeout_secs {
            Some(timeout_secs) => tokio::time::timeout(Duration::from_secs(timeout_secs), pair)
                .await
                .map_err(|_| CoreError::Timeout {
                    file_name: file_name.to_string(),
                    timeout_secs,
                })??,
            None => pair.await?,
        };

        debug!(
            "{} 비교 완료: {} {} / {} {}",
            file_name, first.backend, first.size_diff, second.backend, second.size_diff
        );
        // 변화율은 절댓값이므로 커진 경우는 로그로 구분
        for report in [&first, &second] {
            if !report.is_reduction() {
                info!(
                    "{} {}: 출력이 입력보다 작지 않음 ({} → {})",
                    file_name, report.backend, report.input_size, report.output_size
                );
            }
        }
        Ok(ComparisonResult {
            file_name: file_name.to_string(),
            reports: [first, second],
        })
    }
}
