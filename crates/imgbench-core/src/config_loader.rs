//! 설정 파일 로드.
//!
//! JSON 설정 파일을 읽어 `BenchConfig`로 변환한다.
//! 경로가 없으면 기본 설정을 사용한다.

use crate::config::BenchConfig;
use crate::error::CoreError;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// 설정 로더
pub struct ConfigLoader;

impl ConfigLoader {
    /// 경로가 주어지면 파일에서, 아니면 기본값으로 설정 로드 후 검증
    pub fn load(path: Option<&Path>) -> Result<BenchConfig, CoreError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                debug!("설정 파일 미지정, 기본 설정 사용");
                BenchConfig::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// 파일에서 설정 로드
    pub fn load_from_file(path: &Path) -> Result<BenchConfig, CoreError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("설정 파일 읽기 실패: {}: {}", path.display(), e))
        })?;

        let config: BenchConfig = serde_json::from_str(&content).map_err(|e| {
            CoreError::Config(format!("설정 파일 파싱 실패: {}: {}", path.display(), e))
        })?;

        info!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 파일에 설정 저장 (템플릿 생성용)
    pub fn save_to_file(path: &Path, config: &BenchConfig) -> Result<(), CoreError> {
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| CoreError::Config(format!("설정 직렬화 실패: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            CoreError::Config(format!("설정 파일 저장 실패: {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use tempfile::TempDir;

    #[test]
    fn load_without_path_uses_defaults() {
        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn save_and_reload_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("imgbench.json");

        let mut config = BenchConfig::default();
        config.file_names = vec!["one.jpg".to_string()];
        config.failure_policy = FailurePolicy::Isolate;
        config.timeout_secs = Some(45);
        ConfigLoader::save_to_file(&config_path, &config).unwrap();

        let loaded = ConfigLoader::load(Some(&config_path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::load(Some(&temp_dir.path().join("nope.json")));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.json");
        fs::write(&config_path, "{ not json").unwrap();

        let result = ConfigLoader::load(Some(&config_path));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.json");
        fs::write(&config_path, r#"{ "file_names": [] }"#).unwrap();

        let result = ConfigLoader::load(Some(&config_path));
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }
}
