//! 사람이 읽는 크기/변화율/시간 포매터.
//!
//! 리포트 문자열 형식은 콘솔 출력 계약의 일부이므로 여기서만 만든다.

use std::time::Duration;

use crate::error::CoreError;

const ONE_KB: u64 = 1024;
const ONE_MB: u64 = ONE_KB * ONE_KB;
const ONE_GB: u64 = ONE_KB * ONE_KB * ONE_KB;

/// 바이트 수를 가장 큰 단위(bytes/KB/MB/GB)로 변환
///
/// - `0` → `"0 bytes"`
/// - `1` → `"1.00 byte"`
/// - 그 외 → 소수점 둘째 자리 (`"1.50 KB"`)
///
/// 반올림으로 단위 경계를 넘어도 상위 단위로 올리지 않는다
/// (1023.999 KB는 `"1024.00 KB"`).
pub fn format_byte_size(bytes: u64) -> String {
    match bytes {
        0 => "0 bytes".to_string(),
        1 => "1.00 byte".to_string(),
        b if b >= ONE_GB => format!("{:.2} GB", b as f64 / ONE_GB as f64),
        b if b >= ONE_MB => format!("{:.2} MB", b as f64 / ONE_MB as f64),
        b if b >= ONE_KB => format!("{:.2} KB", b as f64 / ONE_KB as f64),
        b => format!("{:.2} bytes", b as f64),
    }
}

/// 두 크기 간 변화율 (`|before - after| / before * 100`)
///
/// 증가/감소 방향은 표시하지 않는다. `before`가 0이면 `InvalidInput`.
pub fn percent_change(before: u64, after: u64) -> Result<String, CoreError> {
    if before == 0 {
        return Err(CoreError::InvalidInput(
            "변화율 기준 크기가 0바이트입니다".to_string(),
        ));
    }
    let diff = before.abs_diff(after) as f64;
    Ok(format!("{:.2}%", diff / before as f64 * 100.0))
}

/// 경과 시간을 초 단위 문자열로 (`"1.23s"`)
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn byte_size_special_cases() {
        assert_eq!(format_byte_size(0), "0 bytes");
        assert_eq!(format_byte_size(1), "1.00 byte");
        assert_eq!(format_byte_size(2), "2.00 bytes");
        assert_eq!(format_byte_size(1023), "1023.00 bytes");
    }

    #[test]
    fn byte_size_unit_boundaries() {
        assert_eq!(format_byte_size(1024), "1.00 KB");
        assert_eq!(format_byte_size(1536), "1.50 KB");
        assert_eq!(format_byte_size(1_048_576), "1.00 MB");
        assert_eq!(format_byte_size(1_073_741_824), "1.00 GB");
        assert_eq!(format_byte_size(5 * 1_073_741_824), "5.00 GB");
    }

    #[test]
    fn byte_size_no_promotion_across_boundary() {
        // 1 MB - 1 byte → 1024.00 KB (MB로 올리지 않음)
        assert_eq!(format_byte_size(ONE_MB - 1), "1024.00 KB");
    }

    #[test]
    fn percent_change_is_symmetric() {
        assert_eq!(percent_change(100, 50).unwrap(), "50.00%");
        assert_eq!(percent_change(100, 100).unwrap(), "0.00%");
        assert_eq!(percent_change(100, 150).unwrap(), "50.00%");
        assert_eq!(percent_change(3, 1).unwrap(), "66.67%");
    }

    #[test]
    fn percent_change_zero_base_rejected() {
        assert_matches!(percent_change(0, 10), Err(CoreError::InvalidInput(_)));
        assert_matches!(percent_change(0, 0), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn elapsed_two_decimals() {
        assert_eq!(format_elapsed(Duration::from_millis(1234)), "1.23s");
        assert_eq!(format_elapsed(Duration::ZERO), "0.00s");
        assert_eq!(format_elapsed(Duration::from_secs(12)), "12.00s");
    }
}
