//! 测试用的本地统计服务

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use serde_json::Value;

use super::forwarder::{AnalyticsForwarder, DeliveryStats};
use crate::model::config::AnalyticsConfig;

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// 收到的一次调用
#[derive(Debug, Clone)]
pub struct Captured {
    pub kind: String,
    pub body: Value,
}

type Shared = (Arc<Mutex<Vec<Captured>>>, StatusCode);

/// 绑定在 127.0.0.1 随机端口上的统计服务
pub struct MockSegment {
    pub endpoint: String,
    received: Arc<Mutex<Vec<Captured>>>,
}

impl MockSegment {
    /// 启动服务，所有调用都返回 `status`
    pub async fn start(status: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/v1/{kind}", post(capture))
            .with_state((received.clone(), status));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{}/v1", addr),
            received,
        }
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.received.lock().unwrap().clone()
    }

    /// 等待至少收到 `count` 次调用
    pub async fn wait_for(&self, count: usize) -> Vec<Captured> {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            let calls = self.captured();
            if calls.len() >= count {
                return calls;
            }
            if tokio::time::Instant::now() > deadline {
                panic!("等待 {} 次统计调用超时，实际收到 {:?}", count, calls);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn capture(
    State((received, status)): State<Shared>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    received.lock().unwrap().push(Captured { kind, body });
    status
}

/// 指向 `endpoint` 的转发器，不走系统代理
pub fn test_forwarder(endpoint: &str, write_key: Option<&str>) -> AnalyticsForwarder {
    let config = AnalyticsConfig {
        endpoint: endpoint.to_string(),
        write_key: write_key.map(str::to_string),
        timeout_secs: 5,
        ..AnalyticsConfig::default()
    };
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .unwrap();
    AnalyticsForwarder::with_client(client, &config)
}

/// 等待统计满足条件
pub async fn wait_for_stats(
    forwarder: &AnalyticsForwarder,
    done: impl Fn(DeliveryStats) -> bool,
) -> DeliveryStats {
    let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
    loop {
        let stats = forwarder.stats();
        if done(stats) {
            return stats;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("等待投递统计超时: {:?}", stats);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
