//! 소스 이미지 포맷 감지.
//!
//! 확장자가 아닌 파일 시그니처로 포맷을 판별하고,
//! 인코더가 없는 포맷은 출력 파일을 만들기 전에 거부한다.

use image::{ImageError, ImageFormat, ImageReader};
use imgbench_core::error::CoreError;
use imgbench_core::models::report::BackendKind;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// 인코딩 경로가 있는 소스 포맷
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// 손실 사진 포맷
    Jpeg,
    /// 팔레트/무손실 포맷
    Png,
}

impl SourceFormat {
    /// image 크레이트 포맷 태그에서 변환. 인코더가 없으면 `CodecUnsupported`.
    pub fn from_image_format(format: Option<ImageFormat>) -> Result<Self, CoreError> {
        match format {
            Some(ImageFormat::Jpeg) => Ok(Self::Jpeg),
            Some(ImageFormat::Png) => Ok(Self::Png),
            Some(other) => Err(CoreError::CodecUnsupported(format!(
                "{other:?} 포맷에 설정된 인코더가 없습니다"
            ))),
            None => Err(CoreError::CodecUnsupported(
                "이미지 포맷을 감지할 수 없습니다".to_string(),
            )),
        }
    }

    /// 디코딩에 쓸 image 크레이트 포맷
    pub fn image_format(&self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }
}

/// 파일 시그니처로 포맷 감지
///
/// `ImageReader::open`은 확장자로 포맷을 미리 채우므로 쓰지 않는다.
pub fn detect_format(path: &Path) -> Result<SourceFormat, CoreError> {
    let file = BufReader::new(File::open(path)?);
    let reader = ImageReader::new(file).with_guessed_format()?;
    let detected = reader.format();
    debug!("포맷 감지: {} → {:?}", path.display(), detected);
    SourceFormat::from_image_format(detected)
}

/// image 크레이트 에러를 코어 에러로 변환
pub(crate) fn map_image_error(backend: BackendKind, err: ImageError) -> CoreError {
    match err {
        ImageError::Unsupported(e) => CoreError::CodecUnsupported(e.to_string()),
        ImageError::IoError(e) => CoreError::Io(e),
        other => CoreError::Encode {
            backend: backend.label().to_string(),
            message: other.to_string(),
        },
    }
}
