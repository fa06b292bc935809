//! 小数位舍入

/// 四舍五入到指定小数位（远离零方向处理 .5）
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(17.1000000001, 2), 17.1);
        assert_eq!(round_to(2.675, 1), 2.7);
        assert_eq!(round_to(-1.234, 2), -1.23);
        assert_eq!(round_to(1234.5, 0), 1235.0);
    }
}
