//! 이미지 압축 포트.
//!
//! 구현: `imgbench-codec` crate (image, color_quant, mozjpeg, imagequant)

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::models::report::{BackendKind, CompressionReport};

/// 이미지 파일 압축 인터페이스
///
/// 구현체는 인코딩 파라미터가 고정되어 있으며,
/// 결과를 `<output_dir>/<backend 디렉토리>/<file_name>`에 쓴다.
#[async_trait]
pub trait ImageCompressor: Send + Sync {
    /// 이 어댑터가 감싸는 백엔드
    fn backend(&self) -> BackendKind;

    /// 입력 이미지를 압축해 출력 파일을 쓰고 리포트 반환.
    ///
    /// - 감지된 포맷에 인코더가 없으면 출력 파일을 만들기 전에 `CodecUnsupported`
    /// - 입력 읽기/출력 쓰기 실패 시 `Io`
    async fn compress(
        &self,
        input_path: &Path,
        output_dir: &Path,
        file_name: &str,
    ) -> Result<CompressionReport, CoreError>;

    /// 이 어댑터의 출력 파일 경로
    fn output_path(&self, output_dir: &Path, file_name: &str) -> PathBuf {
        output_dir
            .join(self.backend().output_dir_name())
            .join(file_name)
    }
}
