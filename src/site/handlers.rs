//! 站点页面处理器

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
};

use super::assets;
use super::router::SiteState;
use super::staff::{STAFF, StaffMember};

const SITE_TITLE: &str = "Debate Camp";

/// GET /
pub async fn home() -> Html<String> {
    let body = format!(
        "<section class=\"hero\">\
         <h1>{title}</h1>\
         <p>Free debate instruction from South Dakota's competitive debaters.</p>\
         <p><a href=\"/apply\">Apply now</a> · <a href=\"/people\">Meet the staff</a> · \
         <a href=\"/smile\">Support us</a></p>\
         </section>",
        title = SITE_TITLE
    );
    Html(layout(SITE_TITLE, &body))
}

/// GET /people
pub async fn people() -> Html<String> {
    let cards: String = STAFF.iter().map(staff_card).collect();
    let body = format!("<h1>Our Staff</h1><div class=\"staff\">{}</div>", cards);
    Html(layout(&format!("Staff · {}", SITE_TITLE), &body))
}

/// GET /api/staff
pub async fn staff_list() -> Json<&'static [StaffMember]> {
    Json(STAFF)
}

/// GET /healthz
pub async fn health(State(state): State<SiteState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "analytics": state.forwarder.stats(),
    }))
}

/// 未匹配路由：先查内嵌资源，再返回 404 页面
pub async fn fallback(State(state): State<SiteState>, uri: Uri) -> Response {
    if let Some(response) = assets::serve(uri.path(), state.image_cache_ttl_secs) {
        return response;
    }

    tracing::debug!("未找到页面: {}", uri.path());
    let body = "<h1>404</h1><p>This page could not be found. <a href=\"/\">Go home</a></p>";
    (
        StatusCode::NOT_FOUND,
        Html(layout(&format!("Not Found · {}", SITE_TITLE), body)),
    )
        .into_response()
}

fn staff_card(member: &StaffMember) -> String {
    format!(
        "<article class=\"person\"><img src=\"{image}\" alt=\"{name}\"><h2>{name}</h2><p>{bio}</p></article>",
        image = escape_html(member.image),
        name = escape_html(member.name),
        bio = escape_html(member.bio),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <link rel=\"icon\" href=\"/favicon.svg\">\
         <title>{}</title></head><body><main>{}</main></body></html>",
        escape_html(title),
        body
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
