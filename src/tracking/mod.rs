//! 访客追踪中间件
//!
//! 在所有路由之前运行：判断请求类型、分配访客 ID、派发统计调用，
//! 然后把请求交给后续处理器。统计调用的结果不影响响应。

pub mod classifier;
pub mod identity;
mod middleware;

pub use middleware::{TrackingState, track_visitor};
