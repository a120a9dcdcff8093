//! 内嵌静态资源

use axum::{
    body::Body,
    http::{Response, StatusCode, header},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "public/"]
struct PublicAssets;

/// 非图片资源的缓存策略
const REVALIDATE: &str = "public, max-age=0, must-revalidate";

/// 图片按配置缓存，其余资源每次校验
pub fn cache_control(mime: &mime_guess::Mime, image_ttl_secs: u64) -> String {
    if mime.type_().as_str() == "image" {
        format!("public, max-age={}", image_ttl_secs)
    } else {
        REVALIDATE.to_string()
    }
}

/// 按路径查找内嵌资源，找不到返回 None
pub fn serve(path: &str, image_ttl_secs: u64) -> Option<Response<Body>> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }

    let file = PublicAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control(&mime, image_ttl_secs))
        .body(Body::from(file.data.into_owned()))
        .ok()
}
