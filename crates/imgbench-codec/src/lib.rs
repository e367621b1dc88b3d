//! # imgbench-codec
//!
//! 이미지 압축 어댑터 크레이트.
//! 콘텐츠 기반 포맷 감지, 포맷별 인코딩 디스패치, 그리고
//! `ImageCompressor` 포트를 구현하는 두 백엔드를 제공한다.
//!
//! - [`image_rs`] — sharp 대응: image-rs JPEG + NeuQuant 팔레트 PNG
//! - [`native`] — imagemin 대응: mozjpeg + libimagequant 팔레트 PNG

pub mod adapter;
pub mod format;
pub mod image_rs;
pub mod native;
mod palette;

pub use adapter::{EncodingAdapter, FormatEncoder};
pub use format::SourceFormat;
pub use image_rs::ImageRsEncoder;
pub use native::NativeEncoder;

use imgbench_core::config::BenchConfig;
use imgbench_core::ports::compressor::ImageCompressor;
use std::sync::Arc;

/// 설정값으로 두 백엔드 어댑터 생성 (`[sharp, imagemin]` 순서)
pub fn build_adapters(config: &BenchConfig) -> [Arc<dyn ImageCompressor>; 2] {
    [
        Arc::new(EncodingAdapter::new(ImageRsEncoder::new(config.sharp.clone()))),
        Arc::new(EncodingAdapter::new(NativeEncoder::new(config.imagemin.clone()))),
    ]
}
