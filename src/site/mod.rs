//! 站点模块
//!
//! 首页、工作人员介绍、重定向规则和内嵌静态资源

mod assets;
mod handlers;
mod router;
pub mod staff;

pub use router::create_site_router;
