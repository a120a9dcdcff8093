//! 请求分类

use http::HeaderMap;

/// next/link 预取路由时附带的请求头
pub const PREFETCH_HEADER: &str = "x-middleware-preflight";

/// 分类结果，两个布尔值独立计算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestClass {
    /// 页面访问
    pub page: bool,
    /// API 调用
    pub api: bool,
}

impl RequestClass {
    /// 是否需要追踪（页面或 API）
    pub fn is_tracked(&self) -> bool {
        self.page || self.api
    }
}

/// 路径中带 `.` 的视为静态文件
pub fn is_public_file(path: &str) -> bool {
    path.contains('.')
}

pub fn is_prefetch(headers: &HeaderMap) -> bool {
    headers
        .get(PREFETCH_HEADER)
        .is_some_and(|v| !v.as_bytes().is_empty())
}

pub fn classify(path: &str, headers: &HeaderMap) -> RequestClass {
    let candidate = !is_public_file(path) && !is_prefetch(headers);
    RequestClass {
        page: candidate && !path.starts_with("/api"),
        api: candidate && path.starts_with("/api/"),
    }
}
