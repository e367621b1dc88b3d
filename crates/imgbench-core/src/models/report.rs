//! 압축 리포트 모델.
//!
//! 어댑터 1회 호출의 크기/시간 통계와 파일 단위 비교 결과.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;
use crate::metrics::{format_byte_size, format_elapsed, percent_change};

/// 압축 백엔드 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// image-rs 스택 (sharp 대응)
    SharpEquivalent,
    /// mozjpeg + libimagequant 스택 (imagemin 대응)
    ImageminEquivalent,
}

impl BackendKind {
    /// 비교 순서대로 나열한 전체 백엔드
    pub const ALL: [BackendKind; 2] = [
        BackendKind::SharpEquivalent,
        BackendKind::ImageminEquivalent,
    ];

    /// 출력 루트 아래 백엔드 전용 하위 디렉토리 이름
    pub fn output_dir_name(&self) -> &'static str {
        match self {
            Self::SharpEquivalent => "sharp-equivalent-backend",
            Self::ImageminEquivalent => "imagemin-equivalent-backend",
        }
    }

    /// 표 행 헤더용 짧은 라벨
    pub fn label(&self) -> &'static str {
        match self {
            Self::SharpEquivalent => "sharp",
            Self::ImageminEquivalent => "imagemin",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 파일 1개 × 백엔드 1개 압축 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    /// 처리한 파일 이름
    pub file_name: String,
    /// 압축을 수행한 백엔드
    pub backend: BackendKind,
    /// 입력 크기 (사람이 읽는 형식)
    pub input_size: String,
    /// 출력 크기 (사람이 읽는 형식)
    pub output_size: String,
    /// 입력 대비 크기 변화율 (`"42.10%"`)
    pub size_diff: String,
    /// 인코딩 소요 시간 (`"1.23s"`)
    pub time_taken: String,
    /// 측정 시점 입력 바이트 수
    pub input_bytes: u64,
    /// 측정 시점 출력 바이트 수
    pub output_bytes: u64,
    /// 인코딩 소요 시간 (밀리초)
    pub elapsed_ms: u64,
}

impl CompressionReport {
    /// stat으로 얻은 원시 바이트 수와 측정 시간으로 리포트 생성
    ///
    /// 변화율은 포맷된 문자열이 아닌 원시 바이트 수로 계산한다.
    pub fn from_measurement(
        file_name: impl Into<String>,
        backend: BackendKind,
        input_bytes: u64,
        output_bytes: u64,
        elapsed: Duration,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            file_name: file_name.into(),
            backend,
            input_size: format_byte_size(input_bytes),
            output_size: format_byte_size(output_bytes),
            size_diff: percent_change(input_bytes, output_bytes)?,
            time_taken: format_elapsed(elapsed),
            input_bytes,
            output_bytes,
            elapsed_ms: elapsed.as_millis() as u64,
        })
    }

    /// 출력이 입력보다 작아졌는지 여부
    pub fn is_reduction(&self) -> bool {
        self.output_bytes < self.input_bytes
    }
}

/// 파일 1개에 대한 두 백엔드 비교 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// 비교 대상 파일 이름
    pub file_name: String,
    /// 백엔드별 리포트 (`[primary, secondary]` 순서)
    pub reports: [CompressionReport; 2],
}

impl ComparisonResult {
    /// 특정 백엔드의 리포트 조회
    pub fn report_for(&self, backend: BackendKind) -> Option<&CompressionReport> {
        self.reports.iter().find(|r| r.backend == backend)
    }
}

/// 격리 모드에서 파일 단위 성공/실패
#[derive(Debug)]
pub struct FileOutcome {
    /// 파일 이름
    pub file_name: String,
    /// 비교 결과 또는 해당 파일의 에러
    pub result: Result<ComparisonResult, CoreError>,
}
