//! 访客 ID

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// 保存访客 ID 的 Cookie 名称
pub const VISITOR_COOKIE_NAME: &str = "userId";

/// 解析出的访客 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorId {
    pub value: String,
    /// 本次请求新生成，需要下发 Cookie
    pub is_new: bool,
}

/// 从 Cookie 读取访客 ID，没有则生成新的
pub fn resolve(jar: &CookieJar) -> VisitorId {
    match jar.get(VISITOR_COOKIE_NAME).map(Cookie::value) {
        Some(value) if !value.is_empty() => VisitorId {
            value: value.to_string(),
            is_new: false,
        },
        _ => VisitorId {
            value: generate(),
            is_new: true,
        },
    }
}

/// 生成新的访客 ID（UUID v4）
pub fn generate() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 下发访客 ID 的 Cookie
pub fn visitor_cookie(id: &str) -> Cookie<'static> {
    Cookie::build((VISITOR_COOKIE_NAME, id.to_string()))
        .path("/")
        .build()
}
