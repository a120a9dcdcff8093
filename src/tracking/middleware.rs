//! 访客追踪中间件实现

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::classifier::classify;
use super::identity::{self, visitor_cookie};
use crate::analytics::{AnalyticsForwarder, Traits};
use crate::common::client_ip;

/// 触发自定义事件的查询参数
const EVENT_PARAM: &str = "e";

/// 追踪中间件共享状态
#[derive(Clone)]
pub struct TrackingState {
    pub forwarder: Arc<AnalyticsForwarder>,
}

impl TrackingState {
    pub fn new(forwarder: Arc<AnalyticsForwarder>) -> Self {
        Self { forwarder }
    }
}

/// 访客追踪中间件
///
/// 统计调用在进入后续处理器之前派发，不等待其完成
pub async fn track_visitor(
    State(state): State<TrackingState>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let class = classify(&path, request.headers());
    if !class.is_tracked() {
        return next.run(request).await;
    }

    let visitor = identity::resolve(&jar);
    let pairs = query_pairs(request.uri());
    let ip = client_ip(&request);
    tracing::debug!(visitor_id = %visitor.value, ip = ?ip, "识别访客");

    state
        .forwarder
        .identify(&visitor.value, traits_from(&pairs), ip.as_deref());

    if class.page {
        tracing::info!(visitor_id = %visitor.value, path = %path, "页面访问");
        state.forwarder.record_page_view(&visitor.value, &path);
    }

    if class.api {
        if let Some(event) = first_value(&pairs, EVENT_PARAM).filter(|e| !e.is_empty()) {
            tracing::info!(visitor_id = %visitor.value, event = %event, "自定义事件");
            state.forwarder.record_event(&visitor.value, Some(event));
        }
    }

    let response = next.run(request).await;

    if visitor.is_new {
        (jar.add(visitor_cookie(&visitor.value)), response).into_response()
    } else {
        response
    }
}

/// 按出现顺序解析查询参数；解析失败时视为空
fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            tracing::debug!("查询参数解析失败，忽略: {}", e);
            Vec::new()
        }
    }
}

/// 访客属性：重复键取最后一个
fn traits_from(pairs: &[(String, String)]) -> Traits {
    pairs.iter().cloned().collect()
}

/// 事件名：重复键取第一个
fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
