//! imgbench 도메인 모델.
//!
//! 파일/백엔드 단위 압축 리포트와 파일 단위 비교 결과를 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod report;
