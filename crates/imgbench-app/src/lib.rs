//! # imgbench-app
//!
//! 배치 비교 오케스트레이션과 콘솔 출력.
//! 바이너리(`imgbench`)와 통합 테스트가 함께 사용한다.

pub mod comparator;
pub mod report_table;
