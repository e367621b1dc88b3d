//! 배치 파이프라인 통합 테스트.
//!
//! 실제 두 백엔드 어댑터 → 배치 비교기 → 결과 표 cross-crate 연동.

use assert_matches::assert_matches;
use image::{DynamicImage, ImageFormat, RgbImage};
use imgbench_app::comparator::BatchComparator;
use imgbench_app::report_table;
use imgbench_codec::{build_adapters, EncodingAdapter, FormatEncoder, SourceFormat};
use imgbench_core::config::{BenchConfig, FailurePolicy};
use imgbench_core::error::CoreError;
use imgbench_core::models::report::BackendKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// 크기별로 구분 가능한 테스트 이미지
fn make_image(w: u32, h: u32, seed: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
        image::Rgb([
            (x as u8).wrapping_mul(3).wrapping_add(seed),
            (y as u8).wrapping_mul(5),
            ((x + y) as u8).wrapping_add(seed),
        ])
    }))
}

fn write_inputs(dir: &Path, files: &[(&str, u32, u32, ImageFormat)]) {
    std::fs::create_dir_all(dir).unwrap();
    for (i, (name, w, h, format)) in files.iter().enumerate() {
        let img = make_image(*w, *h, i as u8 * 40);
        // GIF 인코더는 RGBA 입력 사용
        let img = match format {
            ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
            _ => img,
        };
        img.save_with_format(dir.join(name), *format).unwrap();
    }
}

const MIXED: [(&str, u32, u32, ImageFormat); 4] = [
    ("photo-a.jpg", 200, 150, ImageFormat::Jpeg),
    ("photo-b.jpg", 120, 90, ImageFormat::Jpeg),
    ("chart-a.png", 96, 64, ImageFormat::Png),
    ("chart-b.png", 64, 48, ImageFormat::Png),
];

fn config_for(temp: &TempDir, files: &[&str]) -> BenchConfig {
    BenchConfig {
        input_dir: temp.path().join("image-inputs"),
        output_dir: temp.path().join("image-outputs"),
        file_names: files.iter().map(|f| f.to_string()).collect(),
        ..BenchConfig::default()
    }
}

/// 혼합 포맷 4개 → 입력 순서대로 4개 결과, 각 2개 리포트
#[tokio::test]
async fn mixed_batch_produces_ordered_results() {
    let temp = TempDir::new().unwrap();
    let config = config_for(&temp, &MIXED.map(|(name, ..)| name));
    write_inputs(&config.input_dir, &MIXED);

    let comparator = BatchComparator::new(config.clone(), build_adapters(&config));
    let results = comparator.run().await.unwrap();

    assert_eq!(results.len(), 4);
    for (result, (name, ..)) in results.iter().zip(MIXED.iter()) {
        assert_eq!(result.file_name, *name);
        assert_eq!(result.reports.len(), 2);
        assert!(result.report_for(BackendKind::SharpEquivalent).is_some());
        assert!(result.report_for(BackendKind::ImageminEquivalent).is_some());
    }

    let table = report_table::render_table(&results[0]);
    assert!(table.contains("photo-a.jpg"));
}

/// 리포트 바이트 수 = 실제 디스크 크기, 출력은 비어있지 않음
#[tokio::test]
async fn report_sizes_match_disk() {
    let temp = TempDir::new().unwrap();
    let config = config_for(&temp, &MIXED.map(|(name, ..)| name));
    write_inputs(&config.input_dir, &MIXED);

    let comparator = BatchComparator::new(config.clone(), build_adapters(&config));
    let results = comparator.run().await.unwrap();

    for result in &results {
        let input_len = std::fs::metadata(config.input_path(&result.file_name))
            .unwrap()
            .len();
        for report in &result.reports {
            let output_path = config
                .output_dir
                .join(report.backend.output_dir_name())
                .join(&report.file_name);
            let output_len = std::fs::metadata(&output_path).unwrap().len();

            assert!(output_len > 0);
            assert_eq!(report.input_bytes, input_len);
            assert_eq!(report.output_bytes, output_len);
        }
    }
}

/// 동시 처리 중에도 파일별 출력이 섞이지 않음 (해상도로 확인)
#[tokio::test]
async fn concurrent_outputs_do_not_cross_write() {
    let temp = TempDir::new().unwrap();
    let config = config_for(&temp, &MIXED.map(|(name, ..)| name));
    write_inputs(&config.input_dir, &MIXED);

    let comparator = BatchComparator::new(config.clone(), build_adapters(&config));
    comparator.run().await.unwrap();

    for (name, w, h, _) in MIXED {
        for backend in BackendKind::ALL {
            let path = config
                .output_dir
                .join(backend.output_dir_name())
                .join(name);
            let decoded = image::open(&path).unwrap();
            assert_eq!(
                (decoded.width(), decoded.height()),
                (w, h),
                "{} 출력 해상도 불일치 ({})",
                name,
                backend
            );
        }
    }
}

/// 지원하지 않는 포맷 → CodecUnsupported, 출력 파일 없음
#[tokio::test]
async fn unsupported_format_fails_fast() {
    let temp = TempDir::new().unwrap();
    let config = config_for(&temp, &["photo-a.jpg", "icon.gif"]);
    write_inputs(
        &config.input_dir,
        &[
            ("photo-a.jpg", 64, 64, ImageFormat::Jpeg),
            ("icon.gif", 16, 16, ImageFormat::Gif),
        ],
    );

    let comparator = BatchComparator::new(config.clone(), build_adapters(&config));
    let result = comparator.run().await;

    assert_matches!(result, Err(CoreError::CodecUnsupported(_)));
    for backend in BackendKind::ALL {
        assert!(!config
            .output_dir
            .join(backend.output_dir_name())
            .join("icon.gif")
            .exists());
    }
}

/// 격리 모드: 누락 파일만 실패, 나머지는 성공
#[tokio::test]
async fn isolated_batch_reports_missing_file() {
    let temp = TempDir::new().unwrap();
    let mut config = config_for(&temp, &["photo-a.jpg", "missing.png", "chart-a.png"]);
    config.failure_policy = FailurePolicy::Isolate;
    write_inputs(
        &config.input_dir,
        &[
            ("photo-a.jpg", 64, 64, ImageFormat::Jpeg),
            ("chart-a.png", 32, 32, ImageFormat::Png),
        ],
    );

    let comparator = BatchComparator::new(config.clone(), build_adapters(&config));
    let outcomes = comparator.run_isolated().await.unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].result.is_ok());
    assert_matches!(outcomes[1].result, Err(CoreError::Io(_)));
    assert!(outcomes[2].result.is_ok());

    let text = report_table::render_outcomes(&outcomes);
    assert!(text.contains("missing.png"));
}

/// 인코딩이 타임아웃보다 오래 걸리는 인코더
struct StalledEncoder(BackendKind);

impl FormatEncoder for StalledEncoder {
    fn backend(&self) -> BackendKind {
        self.0
    }

    fn encode(&self, _format: SourceFormat, source: &[u8]) -> Result<Vec<u8>, CoreError> {
        std::thread::sleep(Duration::from_millis(2_500));
        Ok(source.to_vec())
    }
}

/// 타임아웃된 파일은 인코딩이 뒤늦게 끝나도 출력이 남지 않음
#[tokio::test]
async fn timed_out_file_leaves_no_output() {
    let temp = TempDir::new().unwrap();
    let mut config = config_for(&temp, &["photo-a.jpg"]);
    config.failure_policy = FailurePolicy::Isolate;
    config.timeout_secs = Some(1);
    write_inputs(&config.input_dir, &[("photo-a.jpg", 32, 32, ImageFormat::Jpeg)]);

    let comparator = BatchComparator::new(
        config.clone(),
        [
            Arc::new(EncodingAdapter::new(StalledEncoder(BackendKind::SharpEquivalent))),
            Arc::new(EncodingAdapter::new(StalledEncoder(BackendKind::ImageminEquivalent))),
        ],
    );
    let outcomes = comparator.run_isolated().await.unwrap();
    assert_matches!(outcomes[0].result, Err(CoreError::Timeout { .. }));

    tokio::time::sleep(Duration::from_secs(3)).await;
    for backend in BackendKind::ALL {
        assert!(!config
            .output_dir
            .join(backend.output_dir_name())
            .join("photo-a.jpg")
            .exists());
    }
}

