//! 벤치마크 설정 구조체.
//!
//! 입력/출력 디렉토리, 대상 파일 목록, 실패 정책, 백엔드별 인코딩 파라미터.
//! 모든 필드에 기본값이 있어 부분 JSON 파일만으로도 로드할 수 있다.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::CoreError;

/// 최상위 벤치마크 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// 입력 이미지 디렉토리
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// 출력 루트 디렉토리 (백엔드별 하위 디렉토리 생성)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// 처리할 파일 이름 (출력 순서 = 이 순서)
    #[serde(default = "default_file_names")]
    pub file_names: Vec<String>,
    /// 배치 실패 정책
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// 파일 단위 타임아웃 (초, None = 무제한)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// sharp 대응 백엔드 파라미터
    #[serde(default)]
    pub sharp: SharpBackendConfig,
    /// imagemin 대응 백엔드 파라미터
    #[serde(default)]
    pub imagemin: ImageminBackendConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            file_names: default_file_names(),
            failure_policy: FailurePolicy::default(),
            timeout_secs: None,
            sharp: SharpBackendConfig::default(),
            imagemin: ImageminBackendConfig::default(),
        }
    }
}

impl BenchConfig {
    /// 입력 파일 전체 경로
    pub fn input_path(&self, file_name: &str) -> PathBuf {
        self.input_dir.join(file_name)
    }

    /// 설정값 범위 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.file_names.is_empty() {
            return Err(CoreError::validation("file_names", "처리할 파일이 없습니다"));
        }
        if let Some(name) = self.file_names.iter().find(|n| n.trim().is_empty()) {
            return Err(CoreError::validation(
                "file_names",
                format!("빈 파일 이름: {name:?}"),
            ));
        }
        // 같은 이름이 두 번 있으면 두 작업이 같은 출력 파일을 쓴다
        let mut seen = HashSet::new();
        if let Some(name) = self.file_names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(CoreError::validation(
                "file_names",
                format!("중복된 파일 이름: {name}"),
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err(CoreError::validation(
                "timeout_secs",
                "0초 타임아웃은 허용되지 않습니다",
            ));
        }
        self.sharp.validate()?;
        self.imagemin.validate()?;
        Ok(())
    }
}

// ============================================================
// 실패 정책
// ============================================================

/// 배치 실패 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// 첫 실패에서 배치 전체 중단 (부분 결과 없음)
    #[default]
    FailFast,
    /// 파일 단위로 성공/실패를 따로 수집
    Isolate,
}

// ============================================================
// 백엔드 설정
// ============================================================

/// sharp 대응 백엔드 (image-rs + NeuQuant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharpBackendConfig {
    /// JPEG 품질 (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// PNG 팔레트 색상 수 (2-256)
    #[serde(default = "default_palette_colors")]
    pub palette_colors: u16,
    /// 양자화 노력 수준 (1-10, 높을수록 느리고 정확)
    #[serde(default = "default_effort")]
    pub effort: u8,
}

impl Default for SharpBackendConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            palette_colors: default_palette_colors(),
            effort: default_effort(),
        }
    }
}

impl SharpBackendConfig {
    fn validate(&self) -> Result<(), CoreError> {
        check_range("sharp.jpeg_quality", self.jpeg_quality as u32, 1, 100)?;
        check_range("sharp.palette_colors", self.palette_colors as u32, 2, 256)?;
        check_range("sharp.effort", self.effort as u32, 1, 10)
    }

    /// NeuQuant 샘플링 계수 (1 = 전체 픽셀, 30 = 최고속)
    ///
    /// effort 10 → 1, effort 1 → 28
    pub fn sample_factor(&self) -> i32 {
        let effort = self.effort.clamp(1, 10) as i32;
        1 + (10 - effort) * 3
    }
}

/// imagemin 대응 백엔드 (mozjpeg + libimagequant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageminBackendConfig {
    /// mozjpeg 품질 (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// pngquant 최소 품질 (0-100)
    #[serde(default = "default_png_quality_min")]
    pub png_quality_min: u8,
    /// pngquant 최대 품질 (0-100)
    #[serde(default = "default_png_quality_max")]
    pub png_quality_max: u8,
    /// libimagequant 속도 (1-10, 1 = 최고 품질)
    #[serde(default = "default_speed")]
    pub speed: u8,
}

impl Default for ImageminBackendConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            png_quality_min: default_png_quality_min(),
            png_quality_max: default_png_quality_max(),
            speed: default_speed(),
        }
    }
}

impl ImageminBackendConfig {
    fn validate(&self) -> Result<(), CoreError> {
        check_range("imagemin.jpeg_quality", self.jpeg_quality as u32, 1, 100)?;
        check_range("imagemin.png_quality_max", self.png_quality_max as u32, 0, 100)?;
        if self.png_quality_min > self.png_quality_max {
            return Err(CoreError::validation(
                "imagemin.png_quality_min",
                format!(
                    "최소 품질({})이 최대 품질({})보다 큽니다",
                    self.png_quality_min, self.png_quality_max
                ),
            ));
        }
        check_range("imagemin.speed", self.speed as u32, 1, 10)
    }
}

fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), CoreError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::validation(
            field,
            format!("{value}은(는) {min}..={max} 범위를 벗어납니다"),
        ))
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("./image-inputs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./image-outputs")
}

fn default_file_names() -> Vec<String> {
    vec![
        "image-3mb.jpg".to_string(),
        "image-5mb.jpg".to_string(),
        "image-19mb.png".to_string(),
        "image-24mb.png".to_string(),
    ]
}

fn default_jpeg_quality() -> u8 {
    85
}

fn default_palette_colors() -> u16 {
    256
}

fn default_effort() -> u8 {
    10
}

fn default_png_quality_min() -> u8 {
    70
}

fn default_png_quality_max() -> u8 {
    90
}

fn default_speed() -> u8 {
    4
}
