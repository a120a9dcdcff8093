use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 写入密钥的环境变量名（部署密钥，不写死在配置文件中）
pub const WRITE_KEY_ENV: &str = "SEGMENT_WRITE_KEY";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TlsBackend {
    Rustls,
    NativeTls,
}

impl Default for TlsBackend {
    fn default() -> Self {
        Self::Rustls
    }
}

/// 访客统计转发配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    /// 是否启用统计转发
    #[serde(default = "default_analytics_enabled")]
    pub enabled: bool,

    /// 统计服务 API 根地址（/page、/track、/identify 拼接在其后）
    #[serde(default = "default_analytics_endpoint")]
    pub endpoint: String,

    /// 写入密钥（可选，环境变量 SEGMENT_WRITE_KEY 优先）
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_key: Option<String>,

    /// 出站请求超时（秒）
    #[serde(default = "default_analytics_timeout_secs")]
    pub timeout_secs: u64,

    /// HTTP 代理地址（可选）
    /// 支持格式: http://host:port, https://host:port, socks5://host:port
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

fn default_analytics_enabled() -> bool {
    true
}

fn default_analytics_endpoint() -> String {
    "https://api.segment.io/v1".to_string()
}

fn default_analytics_timeout_secs() -> u64 {
    10
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_analytics_enabled(),
            endpoint: default_analytics_endpoint(),
            write_key: None,
            timeout_secs: default_analytics_timeout_secs(),
            proxy_url: None,
        }
    }
}

/// 重定向规则
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRule {
    /// 站内路径，例如 `/apply`
    pub source: String,
    /// 目标地址
    pub destination: String,
    /// true 返回 308，false 返回 307
    #[serde(default)]
    pub permanent: bool,
}

/// 站点配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_tls_backend")]
    pub tls_backend: TlsBackend,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// 图片资源缓存时长（秒），默认一个月
    #[serde(default = "default_image_cache_ttl_secs")]
    pub image_cache_ttl_secs: u64,

    #[serde(default = "default_redirects")]
    pub redirects: Vec<RedirectRule>,

    /// 配置文件路径（运行时元数据，不写入 JSON）
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_tls_backend() -> TlsBackend {
    TlsBackend::Rustls
}

fn default_image_cache_ttl_secs() -> u64 {
    60 * 60 * 24 * 30
}

fn default_redirects() -> Vec<RedirectRule> {
    vec![
        RedirectRule {
            source: "/apply".to_string(),
            destination: "https://forms.gle/pr8dBF4z6F2RtNc29".to_string(),
            permanent: false,
        },
        RedirectRule {
            source: "/smile".to_string(),
            destination: "https://smile.amazon.com/ch/87-3383622".to_string(),
            permanent: false,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls_backend: default_tls_backend(),
            analytics: AnalyticsConfig::default(),
            image_cache_ttl_secs: default_image_cache_ttl_secs(),
            redirects: default_redirects(),
            config_path: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // 配置文件不存在，返回默认配置
            let mut config = Self::default();
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// 用环境变量覆盖写入密钥
    ///
    /// 空字符串视为未设置
    pub fn apply_write_key(&mut self, env_value: Option<String>) {
        if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
            self.analytics.write_key = Some(key);
        }
    }

    /// 获取配置文件路径（如果有）
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
