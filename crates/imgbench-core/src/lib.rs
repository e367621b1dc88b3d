//! # imgbench-core
//!
//! imgbench 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 압축 리포트/비교 결과 (serde Serialize/Deserialize)
//! - [`ports`] — 압축 어댑터 포트 인터페이스 (async_trait)
//! - [`metrics`] — 바이트 크기/변화율/소요 시간 포매터
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 벤치마크 설정 구조체
//! - [`config_loader`] — 설정 파일 로드 (JSON)

pub mod config;
pub mod config_loader;
pub mod error;
pub mod metrics;
pub mod models;
pub mod ports;
