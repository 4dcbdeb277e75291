use crate::error::Result;
use crate::models::OpexInputs;
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub opex: OpexConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// OPEX 默认假设 (请求中未给出的项使用这里的值)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpexConfig {
    pub eflh_hours: Option<f64>,
    pub energy_rate: Option<f64>,
    pub analysis_years: Option<u32>,
    pub currency: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            opex: OpexConfig {
                eflh_hours: Some(2500.0),
                energy_rate: Some(0.12),
                analysis_years: Some(10),
                currency: Some("€".to_string()),
            },
        }
    }
}

impl OpexConfig {
    pub fn defaults(&self) -> OpexInputs {
        OpexInputs {
            eflh_hours: self.eflh_hours,
            energy_rate: self.energy_rate,
            capex_a: None,
            capex_b: None,
            analysis_years: self.analysis_years,
            currency: self.currency.clone(),
        }
    }
}

impl AppConfig {
    /// 分层加载：内置默认值 < chiller-compare.{toml,yaml,json} < CHILLER__* 环境变量
    pub fn load() -> Result<Self> {
        Self::load_from("chiller-compare")
    }

    pub fn load_from(file_stem: &str) -> Result<Self> {
        let defaults = AppConfig::default();
        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("opex.eflh_hours", defaults.opex.eflh_hours)?
            .set_default("opex.energy_rate", defaults.opex.energy_rate)?
            .set_default("opex.analysis_years", defaults.opex.analysis_years.map(i64::from))?
            .set_default("opex.currency", defaults.opex.currency)?
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix("CHILLER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: AppConfig = settings.try_deserialize()?;
        config.opex.defaults().validate()?;
        Ok(config)
    }

    /// 从环境变量加载配置 (SERVER_HOST / SERVER_PORT)
    pub fn from_env() -> Self {
        let mut config = Self::load().unwrap_or_else(|e| {
            tracing::warn!("failed to load configuration, using defaults: {}", e);
            Self::default()
        });
        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.server.port = port;
        }
        config
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
