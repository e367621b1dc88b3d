//! 비교 결과 콘솔 출력.
//!
//! 파일마다 한 개의 표를 그린다. 열 순서:
//! `(backend) | fileName | inputSize | outputSize | sizeDiff | timeTaken`

use imgbench_core::error::CoreError;
use imgbench_core::models::report::{ComparisonResult, CompressionReport, FileOutcome};
use serde::Serialize;

/// 표 헤더
const HEADERS: [&str; 6] = [
    "(backend)",
    "fileName",
    "inputSize",
    "outputSize",
    "sizeDiff",
    "timeTaken",
];

fn row(report: &CompressionReport) -> [String; 6] {
    [
        report.backend.label().to_string(),
        report.file_name.clone(),
        report.input_size.clone(),
        report.output_size.clone(),
        report.size_diff.clone(),
        report.time_taken.clone(),
    ]
}

fn border(widths: &[usize; 6], left: char, mid: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        line.push_str(&"─".repeat(width + 2));
        line.push(if i + 1 == widths.len() { right } else { mid });
    }
    line
}

fn cells(values: &[String; 6], widths: &[usize; 6]) -> String {
    let mut line = String::from("│");
    for (value, width) in values.iter().zip(widths) {
        let pad = width - value.chars().count();
        line.push(' ');
        line.push_str(value);
        line.push_str(&" ".repeat(pad + 1));
        line.push('│');
    }
    line
}

/// 파일 1개의 비교 표 렌더링
pub fn render_table(result: &ComparisonResult) -> String {
    let header = HEADERS.map(String::from);
    let rows: Vec<[String; 6]> = result.reports.iter().map(row).collect();

    let mut widths = [0usize; 6];
    for values in std::iter::once(&header).chain(rows.iter()) {
        for (width, value) in widths.iter_mut().zip(values) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut lines = vec![
        border(&widths, '┌', '┬', '┐'),
        cells(&header, &widths),
        border(&widths, '├', '┼', '┤'),
    ];
    lines.extend(rows.iter().map(|values| cells(values, &widths)));
    lines.push(border(&widths, '└', '┴', '┘'));
    lines.join("\n")
}

/// 격리 모드 결과 렌더링 (실패 파일은 에러 한 줄)
pub fn render_outcomes(outcomes: &[FileOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(result) => render_table(result),
            Err(e) => format!("✗ {}: {}", outcome.file_name, e),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// JSON 출력용 파일별 결과
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeView<'a> {
    file_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a ComparisonResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// 전체 결과 JSON
pub fn render_json(results: &[ComparisonResult]) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// 격리 모드 결과 JSON (실패 파일은 `error` 필드)
pub fn render_outcomes_json(outcomes: &[FileOutcome]) -> Result<String, CoreError> {
    let views: Vec<OutcomeView<'_>> = outcomes
        .iter()
        .map(|outcome| OutcomeView {
            file_name: &outcome.file_name,
            result: outcome.result.as_ref().ok(),
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&views)?)
}
