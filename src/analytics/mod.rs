//! 访客统计转发模块
//!
//! 把 identify / page / track 信号以 JSON 形式 POST 到 Segment 兼容的统计服务。
//! 每次调用独立 spawn，失败只记日志，不影响站点请求。

pub mod forwarder;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use forwarder::AnalyticsForwarder;
pub use types::Traits;
