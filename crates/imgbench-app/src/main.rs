//! # imgbench
//!
//! 이미지 압축 백엔드 비교 벤치마크 진입점.
//! 설정 로드, 어댑터 와이어링, 배치 실행, 결과 출력.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use imgbench_app::comparator::{BatchComparator, BatchOutcome};
use imgbench_app::report_table;
use imgbench_codec::build_adapters;
use imgbench_core::config::{BenchConfig, FailurePolicy};
use imgbench_core::config_loader::ConfigLoader;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 이미지 압축 백엔드 비교 벤치마크
///
/// 각 파일을 두 백엔드로 동시에 압축하고 크기/시간 통계를 출력한다.
#[derive(Parser, Debug)]
#[command(name = "imgbench")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON 설정 파일 경로 (기본: 내장 기본값)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 입력 이미지 디렉토리
    #[arg(long, short = 'i')]
    input_dir: Option<PathBuf>,

    /// 출력 루트 디렉토리
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// 처리할 파일 이름 (반복 지정 가능, 지정 시 설정 목록 대체)
    #[arg(long = "file", short = 'f')]
    files: Vec<String>,

    /// 파일 단위로 실패를 격리 (기본: 첫 실패에서 중단)
    #[arg(long)]
    isolate: bool,

    /// 파일 단위 타임아웃 (초)
    #[arg(long)]
    timeout: Option<u64>,

    /// 표 대신 JSON 출력
    #[arg(long)]
    json: bool,

    /// 최종 설정을 JSON 파일로 저장하고 종료 (실행 없음)
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

/// CLI 인자로 설정 오버라이드
fn apply_overrides(config: &mut BenchConfig, args: &Args) {
    if let Some(ref dir) = args.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(ref dir) = args.output_dir {
        config.output_dir = dir.clone();
    }
    if !args.files.is_empty() {
        config.file_names = args.files.clone();
    }
    if args.isolate {
        config.failure_policy = FailurePolicy::Isolate;
    }
    if args.timeout.is_some() {
        config.timeout_secs = args.timeout;
    }
}

/// `--write-config` 지정 시 설정 저장. 저장했으면 `true`.
fn export_config(config: &BenchConfig, args: &Args) -> Result<bool> {
    let Some(ref path) = args.write_config else {
        return Ok(false);
    };
    ConfigLoader::save_to_file(path, config)
        .with_context(|| format!("설정 저장 실패: {}", path.display()))?;
    info!("설정 저장 완료: {}", path.display());
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 표/JSON은 stdout, 로그는 stderr
    let log_filter = format!(
        "imgbench={},imgbench_app={},imgbench_core={},imgbench_codec={}",
        args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config =
        ConfigLoader::load(args.config.as_deref()).context("설정 로드 실패")?;
    apply_overrides(&mut config, &args);
    config.validate().context("설정 검증 실패")?;

    if export_config(&config, &args)? {
        return Ok(());
    }

    let adapters = build_adapters(&config);
    let comparator = BatchComparator::new(config, adapters);

    let config = comparator.config();
    info!(
        "입력: {}, 출력: {}, 파일 {}개",
        config.input_dir.display(),
        config.output_dir.display(),
        config.file_names.len()
    );

    match comparator.run_configured().await? {
        BatchOutcome::Complete(results) => {
            if args.json {
                println!("{}", report_table::render_json(&results)?);
            } else {
                for result in &results {
                    println!("{}", report_table::render_table(result));
                }
            }
            Ok(())
        }
        BatchOutcome::Isolated(outcomes) => {
            if args.json {
                println!("{}", report_table::render_outcomes_json(&outcomes)?);
            } else {
                println!("{}", report_table::render_outcomes(&outcomes));
            }
            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            if failed > 0 {
                return Err(anyhow!("{}개 파일 비교 실패", failed));
            }
            Ok(())
        }
    }
}
