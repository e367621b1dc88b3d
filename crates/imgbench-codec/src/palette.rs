//! 인덱스 PNG 기록.
//!
//! 양자화 결과(RGBA 팔레트 + 픽셀 인덱스)를 `png` 크레이트로
//! 8비트 인덱스 컬러 PNG로 쓴다. 두 백엔드가 공유한다.

use png::{BitDepth, ColorType, Compression, Encoder, EncodingError};

/// 팔레트 양자화 결과
pub(crate) struct IndexedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA 팔레트 (색상당 4바이트, 최대 256색)
    pub palette_rgba: Vec<u8>,
    /// 픽셀별 팔레트 인덱스 (width * height)
    pub indices: Vec<u8>,
}

impl IndexedImage {
    /// 픽셀이 참조하지 않는 팔레트 항목 제거 (사용 순서 유지)
    pub fn without_unused_colors(self) -> Self {
        let color_count = self.palette_rgba.len() / 4;
        let mut remap = vec![None; color_count];
        let mut palette_rgba = Vec::new();
        let mut next = 0u8;

        let indices = self
            .indices
            .iter()
            .map(|&index| {
                let slot = &mut remap[index as usize];
                *slot.get_or_insert_with(|| {
                    let start = index as usize * 4;
                    palette_rgba.extend_from_slice(&self.palette_rgba[start..start + 4]);
                    let assigned = next;
                    next = next.wrapping_add(1);
                    assigned
                })
            })
            .collect();

        Self {
            width: self.width,
            height: self.height,
            palette_rgba,
            indices,
        }
    }

    /// 최대 압축으로 인덱스 PNG 인코딩
    pub fn encode_png(&self) -> Result<Vec<u8>, EncodingError> {
        let mut rgb = Vec::with_capacity(self.palette_rgba.len() / 4 * 3);
        let mut alpha = Vec::with_capacity(self.palette_rgba.len() / 4);
        for color in self.palette_rgba.chunks_exact(4) {
            rgb.extend_from_slice(&color[..3]);
            alpha.push(color[3]);
        }

        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(ColorType::Indexed);
            encoder.set_depth(BitDepth::Eight);
            encoder.set_compression(Compression::Best);
            encoder.set_palette(rgb);
            // 완전 불투명이면 tRNS 청크 생략
            if alpha.iter().any(|&a| a != u8::MAX) {
                encoder.set_trns(alpha);
            }

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.indices)?;
            writer.finish()?;
        }
        Ok(out)
    }
}
