//! 站点路由配置

use std::collections::HashSet;
use std::sync::Arc;

use axum::{Router, middleware, response::Redirect, routing::get};
use tower_http::trace::TraceLayer;

use super::handlers::{fallback, health, home, people, staff_list};
use crate::analytics::AnalyticsForwarder;
use crate::model::config::{Config, RedirectRule};
use crate::tracking::{TrackingState, track_visitor};

/// 站点页面路径，重定向规则不能与之冲突
const SITE_ROUTES: &[&str] = &["/", "/people", "/api/staff", "/healthz"];

/// 站点共享状态
#[derive(Clone)]
pub struct SiteState {
    pub forwarder: Arc<AnalyticsForwarder>,
    /// 图片缓存时长（秒）
    pub image_cache_ttl_secs: u64,
}

/// 创建站点路由
///
/// # 端点
/// - `GET /` - 首页
/// - `GET /people` - 工作人员介绍
/// - `GET /api/staff` - 工作人员列表（JSON）
/// - `GET /healthz` - 健康检查，附带统计投递计数（不追踪）
/// - 重定向规则（不追踪）
/// - 其余路径：内嵌静态资源或 404
pub fn create_site_router(
    config: &Config,
    forwarder: Arc<AnalyticsForwarder>,
) -> anyhow::Result<Router> {
    let state = SiteState {
        forwarder: forwarder.clone(),
        image_cache_ttl_secs: config.image_cache_ttl_secs,
    };

    let tracked = Router::new()
        .route("/", get(home))
        .route("/people", get(people))
        .route("/api/staff", get(staff_list))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(
            TrackingState::new(forwarder),
            track_visitor,
        ))
        .with_state(state.clone());

    let untracked = Router::new()
        .route("/healthz", get(health))
        .with_state(state);

    Ok(redirect_router(&config.redirects)?
        .merge(untracked)
        .merge(tracked)
        .layer(TraceLayer::new_for_http()))
}

/// 根据规则生成重定向路由
fn redirect_router(rules: &[RedirectRule]) -> anyhow::Result<Router> {
    let mut seen = HashSet::new();
    let mut router = Router::new();

    for rule in rules {
        validate_source(&rule.source)?;
        if !seen.insert(rule.source.as_str()) {
            anyhow::bail!("重复的重定向规则: {}", rule.source);
        }

        let destination = rule.destination.clone();
        let permanent = rule.permanent;
        router = router.route(
            &rule.source,
            get(move || async move {
                if permanent {
                    Redirect::permanent(&destination)
                } else {
                    Redirect::temporary(&destination)
                }
            }),
        );
        tracing::debug!(
            "重定向规则: {} -> {} ({})",
            rule.source,
            rule.destination,
            if permanent { 308 } else { 307 }
        );
    }

    Ok(router)
}

fn validate_source(source: &str) -> anyhow::Result<()> {
    if !source.starts_with('/') {
        anyhow::bail!("重定向路径必须以 / 开头: {}", source);
    }
    if source.contains(['{', '}', '*']) {
        anyhow::bail!("重定向路径不支持通配符或参数: {}", source);
    }
    if SITE_ROUTES.contains(&source) {
        anyhow::bail!("重定向路径与站点页面冲突: {}", source);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::mock::{MockSegment, test_forwarder};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn setup(status: StatusCode) -> (MockSegment, Arc<AnalyticsForwarder>, Router) {
        let mock = MockSegment::start(status).await;
        let forwarder = Arc::new(test_forwarder(&mock.endpoint, Some("wk")));
        let app = create_site_router(&Config::default(), forwarder.clone()).unwrap();
        (mock, forwarder, app)
    }

    #[tokio::test]
    async fn test_people_end_to_end() {
        let (mock, forwarder, app) = setup(StatusCode::OK).await;

        let response = app.oneshot(get_request("/people")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .expect("应该下发 userId Cookie")
            .to_string();
        assert!(cookie.starts_with("userId="));
        assert_eq!(forwarder.stats().dispatched, 2);

        let calls = mock.wait_for(2).await;
        let identify = calls.iter().find(|c| c.kind == "identify").unwrap();
        let page = calls.iter().find(|c| c.kind == "page").unwrap();
        assert_eq!(identify.body["traits"], json!({}));
        assert_eq!(page.body["name"], ":people");
        assert_eq!(page.body["writeKey"], "wk");
        assert_eq!(identify.body["anonymousId"], page.body["anonymousId"]);
    }

    #[tokio::test]
    async fn test_staff_api() {
        let (mock, _forwarder, app) = setup(StatusCode::OK).await;

        let response = app.oneshot(get_request("/api/staff")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), crate::site::staff::STAFF.len());
        assert_eq!(list[0]["name"], "Prasoon Kharel");

        // API 请求只有 identify
        let calls = mock.wait_for(1).await;
        assert_eq!(calls[0].kind, "identify");
    }

    #[tokio::test]
    async fn test_default_redirects() {
        let (_mock, forwarder, app) = setup(StatusCode::OK).await;

        let response = app.clone().oneshot(get_request("/apply")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://forms.gle/pr8dBF4z6F2RtNc29"
        );

        let response = app.oneshot(get_request("/smile")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://smile.amazon.com/ch/87-3383622"
        );

        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(forwarder.stats().dispatched, 0);
    }

    #[tokio::test]
    async fn test_permanent_redirect() {
        let forwarder = Arc::new(test_forwarder("http://127.0.0.1:1/v1", None));
        let mut config = Config::default();
        config.redirects = vec![RedirectRule {
            source: "/donate".to_string(),
            destination: "https://example.org/donate".to_string(),
            permanent: true,
        }];
        let app = create_site_router(&config, forwarder).unwrap();

        let response = app.oneshot(get_request("/donate")).await.unwrap();
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    }

    #[tokio::test]
    async fn test_static_asset_cache_and_no_tracking() {
        let (_mock, forwarder, app) = setup(StatusCode::OK).await;

        let response = app.oneshot(get_request("/favicon.svg")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=2592000"
        );
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(forwarder.stats().dispatched, 0);
    }

    #[tokio::test]
    async fn test_missing_asset_is_404_without_tracking() {
        let (_mock, forwarder, app) = setup(StatusCode::OK).await;

        let response = app.oneshot(get_request("/people/nobody.jpg")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(forwarder.stats().dispatched, 0);
    }

    #[tokio::test]
    async fn test_unknown_page_is_404_but_tracked() {
        let (mock, forwarder, app) = setup(StatusCode::OK).await;

        let response = app.oneshot(get_request("/about")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .expect("未知页面也应该下发 userId Cookie");
        assert!(cookie.starts_with("userId="));
        assert_eq!(forwarder.stats().dispatched, 2);

        let calls = mock.wait_for(2).await;
        assert!(calls.iter().any(|c| c.kind == "identify"));
        let page = calls.iter().find(|c| c.kind == "page").unwrap();
        assert_eq!(page.body["name"], ":about");
    }

    #[tokio::test]
    async fn test_health_is_not_tracked() {
        let (_mock, forwarder, app) = setup(StatusCode::OK).await;

        let response = app.oneshot(get_request("/healthz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["analytics"]["dispatched"], 0);
        assert_eq!(forwarder.stats().dispatched, 0);
    }

    #[test]
    fn test_invalid_redirect_rules() {
        let rule = |source: &str| RedirectRule {
            source: source.to_string(),
            destination: "https://example.org".to_string(),
            permanent: false,
        };

        assert!(redirect_router(&[rule("apply")]).is_err());
        assert!(redirect_router(&[rule("/go/{id}")]).is_err());
        assert!(redirect_router(&[rule("/people")]).is_err());
        assert!(redirect_router(&[rule("/a"), rule("/a")]).is_err());
        assert!(redirect_router(&[rule("/a"), rule("/b")]).is_ok());
    }
}
