//! 统计服务请求体定义

use std::collections::BTreeMap;

use serde::Serialize;

/// identify 附带的访客属性（来自查询参数）
pub type Traits = BTreeMap<String, String>;

/// 统计调用类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsKind {
    Identify,
    Page,
    Track,
}

impl AnalyticsKind {
    /// 拼接在 endpoint 之后的路径段
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identify => "identify",
            Self::Page => "page",
            Self::Track => "track",
        }
    }
}

/// POST {endpoint}/page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePayload {
    pub anonymous_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_key: Option<String>,
    /// 规范化后的页面名，例如 `:people`
    pub name: String,
}

/// POST {endpoint}/track
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPayload {
    pub anonymous_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_key: Option<String>,
    pub event: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IdentifyContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// POST {endpoint}/identify
///
/// 客户端 IP 同时出现在 `context.ip` 和 `traits.ip`，下游两处都可能在用
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyPayload {
    pub anonymous_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_key: Option<String>,
    pub context: IdentifyContext,
    pub traits: Traits,
}
