//! 自定义断言宏
//!
//! 提供针对 API 错误响应的断言。

/// 断言请求以指定状态码失败
#[macro_export]
macro_rules! assert_api_status {
    ($result:expr, $status:expr) => {
        match $result {
            Ok(v) => panic!("请求应失败（期望 {}），实际成功: {:?}", $status, v),
            Err(e) => {
                let failure = e
                    .downcast_ref::<$crate::helpers::ApiFailure>()
                    .unwrap_or_else(|| panic!("非 API 错误: {}", e));
                assert_eq!(failure.status, $status, "响应体: {}", failure.body);
            }
        }
    };
}
