//! sharp 대응 백엔드 (순수 Rust image-rs 스택).
//!
//! - JPEG: `image` 내장 JPEG 인코더
//! - PNG: NeuQuant 팔레트 양자화(`color_quant`) 후 인덱스 PNG (사용된 색만 기록)

use color_quant::NeuQuant;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use imgbench_core::config::SharpBackendConfig;
use imgbench_core::error::CoreError;
use imgbench_core::models::report::BackendKind;
use tracing::debug;

use crate::adapter::FormatEncoder;
use crate::format::{map_image_error, SourceFormat};
use crate::palette::IndexedImage;

const BACKEND: BackendKind = BackendKind::SharpEquivalent;

/// image-rs 기반 인코더
#[derive(Debug, Clone)]
pub struct ImageRsEncoder {
    config: SharpBackendConfig,
}

impl ImageRsEncoder {
    /// 새 인코더 생성
    pub fn new(config: SharpBackendConfig) -> Self {
        Self { config }
    }

    fn encode_jpeg(&self, image: &DynamicImage) -> Result<Vec<u8>, CoreError> {
        let rgb = image.to_rgb8();
        let mut out = Vec::new();
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut out, self.config.jpeg_quality);
            encoder
                .encode_image(&rgb)
                .map_err(|e| map_image_error(BACKEND, e))?;
        }
        Ok(out)
    }

    fn encode_png(&self, image: &DynamicImage) -> Result<Vec<u8>, CoreError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let raw = rgba.as_raw();

        let quantizer = NeuQuant::new(
            self.config.sample_factor(),
            self.config.palette_colors as usize,
            raw,
        );
        let indices: Vec<u8> = raw
            .chunks_exact(4)
            .map(|px| quantizer.index_of(px) as u8)
            .collect();

        let indexed = IndexedImage {
            width,
            height,
            palette_rgba: quantizer.color_map_rgba(),
            indices,
        }
        .without_unused_colors();
        indexed.encode_png().map_err(|e| CoreError::Encode {
            backend: BACKEND.label().to_string(),
            message: format!("PNG 기록 실패: {e}"),
        })
    }
}

impl FormatEncoder for ImageRsEncoder {
    fn backend(&self) -> BackendKind {
        BACKEND
    }

    fn encode(&self, format: SourceFormat, source: &[u8]) -> Result<Vec<u8>, CoreError> {
        let image = image::load_from_memory_with_format(source, format.image_format())
            .map_err(|e| map_image_error(BACKEND, e))?;

        let encoded = match format {
            SourceFormat::Jpeg => self.encode_jpeg(&image)?,
            SourceFormat::Png => self.encode_png(&image)?,
        };

        debug!(
            "image-rs {:?} 인코딩: {}x{} → {} bytes (원본 {} bytes)",
            format,
            image.width(),
            image.height(),
            encoded.len(),
            source.len()
        );
        Ok(encoded)
    }
}
