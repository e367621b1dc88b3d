//! 압축 어댑터.
//!
//! `ImageCompressor` 포트 구현. 블로킹 풀에서 포맷 감지/인코딩 → stat → 리포트.
//! 완료 전에 중단되면 출력 파일을 남기지 않는다.
//! 백엔드별 차이는 `FormatEncoder` 구현체에만 있다.

use async_trait::async_trait;
use imgbench_core::error::CoreError;
use imgbench_core::metrics::format_elapsed;
use imgbench_core::models::report::{BackendKind, CompressionReport};
use imgbench_core::ports::compressor::ImageCompressor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::format::{self, SourceFormat};

/// 포맷별 인코딩 경로를 가진 백엔드 인코더
///
/// CPU 바운드 동기 코드. 어댑터가 `spawn_blocking`에서 호출한다.
pub trait FormatEncoder: Send + Sync + 'static {
    /// 이 인코더의 백엔드
    fn backend(&self) -> BackendKind;

    /// 원본 파일 바이트를 감지된 포맷 경로로 재인코딩
    fn encode(&self, format: SourceFormat, source: &[u8]) -> Result<Vec<u8>, CoreError>;
}

/// 인코더를 감싸 `ImageCompressor` 포트를 구현하는 어댑터
pub struct EncodingAdapter<E> {
    encoder: Arc<E>,
}

impl<E: FormatEncoder> EncodingAdapter<E> {
    /// 새 어댑터 생성
    pub fn new(encoder: E) -> Self {
        Self {
            encoder: Arc::new(encoder),
        }
    }
}

/// 블로킹 작업과 공유하는 취소 플래그. 출력 쓰기는 락을 잡은 채로 한다.
type CancelFlag = Arc<Mutex<bool>>;

fn lock_flag(flag: &CancelFlag) -> MutexGuard<'_, bool> {
    flag.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 완료 전에 drop되면 (타임아웃, fail-fast 중단, 에러) 블로킹 작업을 취소하고
/// 이미 쓰인 출력 파일을 지운다.
struct OutputGuard {
    cancelled: CancelFlag,
    output: PathBuf,
    armed: bool,
}

impl OutputGuard {
    fn new(output: PathBuf) -> Self {
        Self {
            cancelled: Arc::new(Mutex::new(false)),
            output,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // 쓰기 중이면 끝날 때까지 기다린 뒤 취소 표시
        let mut cancelled = lock_flag(&self.cancelled);
        *cancelled = true;
        if self.output.exists() {
            match std::fs::remove_file(&self.output) {
                Ok(()) => debug!("중단된 압축 출력 삭제: {}", self.output.display()),
                Err(e) => warn!("출력 삭제 실패: {}: {}", self.output.display(), e),
            }
        }
    }
}

/// 감지 → 읽기 → 인코딩 → 쓰기. 취소되면 쓰지 않는다.
fn encode_file<E: FormatEncoder>(
    encoder: &E,
    input: &Path,
    output: &Path,
    cancelled: &CancelFlag,
) -> Result<(), CoreError> {
    let backend = encoder.backend();

    // 디스패치 실패는 출력 파일을 만들기 전에 반환
    let source_format = format::detect_format(input)?;
    debug!(
        "{} 디스패치: {} ({:?}) → {}",
        backend,
        input.display(),
        source_format,
        output.display()
    );
    if *lock_flag(cancelled) {
        debug!("{} 시작 전 취소: {}", backend, input.display());
        return Ok(());
    }

    let source = std::fs::read(input)?;
    let encoded = encoder.encode(source_format, &source)?;

    let cancelled = lock_flag(cancelled);
    if *cancelled {
        debug!("{} 인코딩 후 취소, 출력 생략: {}", backend, output.display());
        return Ok(());
    }
    std::fs::write(output, encoded)?;
    Ok(())
}

#[async_trait]
impl<E: FormatEncoder> ImageCompressor for EncodingAdapter<E> {
    fn backend(&self) -> BackendKind {
        self.encoder.backend()
    }

    async fn compress(
        &self,
        input_path: &Path,
        output_dir: &Path,
        file_name: &str,
    ) -> Result<CompressionReport, CoreError> {
        let backend = self.backend();
        let output_path = self.output_path(output_dir, file_name);
        let guard = OutputGuard::new(output_path.clone());

        let encoder = Arc::clone(&self.encoder);
        let cancelled = Arc::clone(&guard.cancelled);
        let input = input_path.to_path_buf();
        let output = output_path.clone();

        let start = Instant::now();
        tokio::task::spawn_blocking(move || {
            encode_file(&*encoder, &input, &output, &cancelled)
        })
        .await
        .map_err(|e| CoreError::Internal(format!("인코딩 작업 조인 실패: {e}")))??;
        let elapsed = start.elapsed();

        info!("{} 압축 소요 시간: {}", backend, format_elapsed(elapsed));

        let input_bytes = tokio::fs::metadata(input_path).await?.len();
        let output_bytes = tokio::fs::metadata(&output_path).await?.len();

        let report = CompressionReport::from_measurement(
            file_name,
            backend,
            input_bytes,
            output_bytes,
            elapsed,
        )?;
        guard.disarm();
        Ok(report)
    }
}
