//! debate-site
//!
//! 辩论营官网：静态页面 + 访客追踪中间件（转发到 Segment 兼容的统计服务）

mod analytics;
mod common;
mod http_client;
mod model;
mod site;
mod tracking;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use analytics::AnalyticsForwarder;
use model::config::{Config, WRITE_KEY_ENV};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "debate-site", version, about = "Debate camp website")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = Config::default_config_path())]
    config: String,

    /// 覆盖监听地址
    #[arg(long)]
    host: Option<String>,

    /// 覆盖监听端口
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debate_site=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    config.apply_write_key(std::env::var(WRITE_KEY_ENV).ok());
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    if let Some(path) = config.config_path().filter(|p| p.exists()) {
        tracing::info!("已加载配置文件: {}", path.display());
    } else {
        tracing::info!("配置文件不存在，使用默认配置");
    }

    if !config.analytics.enabled {
        tracing::info!("统计转发已禁用");
    } else if config.analytics.write_key.is_none() {
        tracing::warn!("未配置 {}，统计请求将不带写入密钥", WRITE_KEY_ENV);
    } else {
        tracing::info!("统计转发目标: {}", config.analytics.endpoint);
    }

    let forwarder = Arc::new(
        AnalyticsForwarder::new(&config.analytics, config.tls_backend)
            .context("创建统计转发器失败")?,
    );
    let app = site::create_site_router(&config, forwarder)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("监听 {} 失败", addr))?;
    tracing::info!("站点已启动: http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("服务异常退出")?;

    tracing::info!("站点已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听退出信号失败: {}", e);
    }
}
