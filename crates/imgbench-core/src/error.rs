//! imgbench 핵심 에러 타입.
//!
//! 코덱 어댑터와 배치 비교기는 모두 `CoreError`를 그대로 반환하고,
//! 바이너리에서만 `anyhow`로 감싼다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 포맷 디스패치, 파일 I/O, 인코딩, 설정 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 감지된 포맷에 대응하는 인코더가 없음
    #[error("지원하지 않는 코덱: {0}")]
    CodecUnsupported(String),

    /// I/O 에러 (입력 읽기, 출력 쓰기, stat 실패)
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 잘못된 입력값 (예: 0바이트 기준값으로 변화율 계산)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 파일 단위 타임아웃
    #[error("{file_name} 압축 타임아웃: {timeout_secs}초 초과")]
    Timeout {
        /// 타임아웃된 파일 이름
        file_name: String,
        /// 적용된 타임아웃 (초)
        timeout_secs: u64,
    },

    /// 인코더 실패 (디코딩 포함)
    #[error("{backend} 인코딩 실패: {message}")]
    Encode {
        /// 실패한 백엔드 라벨
        backend: String,
        /// 실패 사유
        message: String,
    },

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 내부 에러 (작업 조인 실패 등 예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 필드 검증 에러 생성 헬퍼
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.jpg");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
        assert!(err.to_string().contains("missing.jpg"));
    }

    #[test]
    fn timeout_message_names_file() {
        let err = CoreError::Timeout {
            file_name: "image-3mb.jpg".to_string(),
            timeout_secs: 30,
        };
        let msg = err.to_string();
        assert!(msg.contains("image-3mb.jpg"));
        assert!(msg.contains("30"));
    }
}
