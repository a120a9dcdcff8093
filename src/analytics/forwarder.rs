//! 统计转发器
//!
//! 三个入口 `identify` / `record_page_view` / `record_event` 都是同步函数：
//! 构造 payload 后立即 `tokio::spawn` 发送，调用方不等待结果。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::types::{
    AnalyticsKind, IdentifyContext, IdentifyPayload, PagePayload, Traits, TrackPayload,
};
use crate::http_client::build_client;
use crate::model::config::{AnalyticsConfig, TlsBackend};

/// 事件名缺失时使用的默认值
pub const UNKNOWN_EVENT: &str = "unknown event";

/// 页面路径规范化：所有 `/` 替换为 `:`
pub fn normalize_path(path: &str) -> String {
    path.replace('/', ":")
}

#[derive(Debug, Default)]
struct Counters {
    dispatched: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// 投递统计快照
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DeliveryStats {
    /// 已派发（spawn）的调用数
    pub dispatched: u64,
    /// 统计服务返回 2xx 的调用数
    pub delivered: u64,
    /// 网络错误或非 2xx 的调用数
    pub failed: u64,
}

/// 统计转发器
///
/// 至多一次投递：不重试、不排队、不批量
pub struct AnalyticsForwarder {
    client: reqwest::Client,
    endpoint: String,
    write_key: Option<String>,
    enabled: bool,
    counters: Arc<Counters>,
}

impl AnalyticsForwarder {
    /// 根据配置创建转发器
    pub fn new(config: &AnalyticsConfig, tls_backend: TlsBackend) -> anyhow::Result<Self> {
        let client = build_client(
            config.proxy_url.as_deref(),
            config.timeout_secs,
            tls_backend,
        )?;
        Ok(Self::with_client(client, config))
    }

    pub(crate) fn with_client(client: reqwest::Client, config: &AnalyticsConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            write_key: config.write_key.clone(),
            enabled: config.enabled,
            counters: Arc::new(Counters::default()),
        }
    }

    /// 识别访客
    ///
    /// `traits` 为请求的全部查询参数，客户端 IP 同时写入 context 和 traits。
    /// IP 未知时 traits 中不保留 `ip`（包括查询参数带来的）
    pub fn identify(&self, visitor_id: &str, mut traits: Traits, client_ip: Option<&str>) {
        match client_ip {
            Some(ip) => {
                traits.insert("ip".to_string(), ip.to_string());
            }
            None => {
                traits.remove("ip");
            }
        }
        let payload = IdentifyPayload {
            anonymous_id: visitor_id.to_string(),
            write_key: self.write_key.clone(),
            context: IdentifyContext {
                ip: client_ip.map(str::to_string),
            },
            traits,
        };
        self.dispatch(AnalyticsKind::Identify, &payload);
    }

    /// 记录页面访问
    pub fn record_page_view(&self, visitor_id: &str, path: &str) {
        let payload = PagePayload {
            anonymous_id: visitor_id.to_string(),
            write_key: self.write_key.clone(),
            name: normalize_path(path),
        };
        self.dispatch(AnalyticsKind::Page, &payload);
    }

    /// 记录自定义事件，事件名为空时使用 [`UNKNOWN_EVENT`]
    pub fn record_event(&self, visitor_id: &str, event: Option<&str>) {
        let event = event.filter(|e| !e.is_empty()).unwrap_or(UNKNOWN_EVENT);
        let payload = TrackPayload {
            anonymous_id: visitor_id.to_string(),
            write_key: self.write_key.clone(),
            event: event.to_string(),
        };
        self.dispatch(AnalyticsKind::Track, &payload);
    }

    /// 获取投递统计
    pub fn stats(&self) -> DeliveryStats {
        DeliveryStats {
            dispatched: self.counters.dispatched.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    fn url_for(&self, kind: AnalyticsKind) -> String {
        format!("{}/{}", self.endpoint, kind.as_str())
    }

    /// 序列化并派发（fire-and-forget）
    fn dispatch<T: Serialize>(&self, kind: AnalyticsKind, payload: &T) {
        if !self.enabled {
            tracing::debug!("统计转发已禁用，丢弃 {} 调用", kind.as_str());
            return;
        }

        let body = match serde_json::to_vec(payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("序列化 {} payload 失败: {}", kind.as_str(), e);
                return;
            }
        };

        self.counters.dispatched.fetch_add(1, Ordering::Relaxed);
        tokio::spawn(deliver(
            self.client.clone(),
            self.url_for(kind),
            kind,
            body,
            self.counters.clone(),
        ));
    }
}

/// 后台投递，错误只记录日志
async fn deliver(
    client: reqwest::Client,
    url: String,
    kind: AnalyticsKind,
    body: Vec<u8>,
    counters: Arc<Counters>,
) {
    let result = client
        .post(&url)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => {
            counters.delivered.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("统计 {} 调用已送达", kind.as_str());
        }
        Ok(resp) => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                "无法送达统计服务: {} 调用返回 HTTP {}",
                kind.as_str(),
                resp.status()
            );
        }
        Err(e) => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("无法连接统计服务: {} 调用失败: {}", kind.as_str(), e);
        }
    }
}
