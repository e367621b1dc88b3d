//! imagemin 대응 백엔드 (네이티브 라이브러리 스택).
//!
//! imagemin 플러그인이 감싸는 라이브러리를 직접 사용한다.
//! - JPEG: mozjpeg
//! - PNG: libimagequant (pngquant 엔진) 후 인덱스 PNG
//!
//! pngquant와 같이 최소 품질을 만족하지 못하면 원본 바이트를 그대로 쓴다.

use image::DynamicImage;
use imgbench_core::config::ImageminBackendConfig;
use imgbench_core::error::CoreError;
use imgbench_core::models::report::BackendKind;
use std::panic::AssertUnwindSafe;
use tracing::{debug, warn};

use crate::adapter::FormatEncoder;
use crate::format::{map_image_error, SourceFormat};
use crate::palette::IndexedImage;

const BACKEND: BackendKind = BackendKind::ImageminEquivalent;

/// mozjpeg + libimagequant 인코더
#[derive(Debug, Clone)]
pub struct NativeEncoder {
    config: ImageminBackendConfig,
}

impl NativeEncoder {
    /// 새 인코더 생성
    pub fn new(config: ImageminBackendConfig) -> Self {
        Self { config }
    }

    fn encode_error<M: std::fmt::Display>(message: M) -> CoreError {
        CoreError::Encode {
            backend: BACKEND.label().to_string(),
            message: message.to_string(),
        }
    }

    fn encode_jpeg(&self, image: &DynamicImage) -> Result<Vec<u8>, CoreError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let quality = self.config.jpeg_quality as f32;

        // mozjpeg는 libjpeg 에러를 panic으로 전달한다
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| -> std::io::Result<Vec<u8>> {
            let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
            comp.set_size(width as usize, height as usize);
            comp.set_quality(quality);
            let mut comp = comp.start_compress(Vec::new())?;
            comp.write_scanlines(rgb.as_raw())?;
            comp.finish()
        }));

        match result {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(e)) => Err(Self::encode_error(format!("mozjpeg 기록 실패: {e}"))),
            Err(_) => Err(Self::encode_error("mozjpeg 내부 에러 (panic)")),
        }
    }

    fn encode_png(&self, image: &DynamicImage, source: &[u8]) -> Result<Vec<u8>, CoreError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels: Vec<imagequant::RGBA> = rgba
            .pixels()
            .map(|p| imagequant::RGBA::new(p[0], p[1], p[2], p[3]))
            .collect();

        let mut liq = imagequant::new();
        liq.set_speed(self.config.speed as i32)
            .map_err(Self::encode_error)?;
        liq.set_quality(self.config.png_quality_min, self.config.png_quality_max)
            .map_err(Self::encode_error)?;

        let mut img = liq
            .new_image(&pixels[..], width as usize, height as usize, 0.0)
            .map_err(Self::encode_error)?;

        let mut quantized = match liq.quantize(&mut img) {
            Ok(res) => res,
            Err(imagequant::Error::QualityTooLow) => {
                warn!(
                    "libimagequant 최소 품질({}) 미달, 원본 유지",
                    self.config.png_quality_min
                );
                return Ok(source.to_vec());
            }
            Err(e) => return Err(Self::encode_error(e)),
        };
        quantized
            .set_dithering_level(1.0)
            .map_err(Self::encode_error)?;

        let (palette, indices) = quantized.remapped(&mut img).map_err(Self::encode_error)?;
        let palette_rgba = palette.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect();

        let indexed = IndexedImage {
            width,
            height,
            palette_rgba,
            indices,
        };
        indexed
            .encode_png()
            .map_err(|e| Self::encode_error(format!("PNG 기록 실패: {e}")))
    }
}

impl FormatEncoder for NativeEncoder {
    fn backend(&self) -> BackendKind {
        BACKEND
    }

    fn encode(&self, format: SourceFormat, source: &[u8]) -> Result<Vec<u8>, CoreError> {
        let image = image::load_from_memory_with_format(source, format.image_format())
            .map_err(|e| map_image_error(BACKEND, e))?;

        let encoded = match format {
            SourceFormat::Jpeg => self.encode_jpeg(&image)?,
            SourceFormat::Png => self.encode_png(&image, source)?,
        };

        debug!(
            "native {:?} 인코딩: {}x{} → {} bytes (원본 {} bytes)",
            format,
            image.width(),
            image.height(),
            encoded.len(),
            source.len()
        );
        Ok(encoded)
    }
}
