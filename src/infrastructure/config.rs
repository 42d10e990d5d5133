use crate::application::fallback_generator::MAX_WINDOW_MONTHS;
use crate::application::growth_estimator::JitterBounds;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub youtube: Option<YouTubeSettings>,
    pub instagram: Option<InstagramSettings>,
    #[serde(default)]
    pub collector: CollectorSettings,
    #[serde(default)]
    pub estimator: EstimatorSettings,
    #[serde(default)]
    pub fallback: FallbackSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct YouTubeSettings {
    pub api_key: String,
    pub channel_id: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InstagramSettings {
    pub access_token: String,
    pub base_url: Option<String>,
    pub account_created_at: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CollectorSettings {
    pub page_timeout_secs: Option<u64>,
}

impl CollectorSettings {
    pub fn page_timeout(&self) -> Option<Duration> {
        self.page_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EstimatorSettings {
    #[serde(default = "default_jitter_min")]
    pub jitter_min: f64,
    #[serde(default = "default_jitter_max")]
    pub jitter_max: f64,
    pub seed: Option<u64>,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            jitter_min: default_jitter_min(),
            jitter_max: default_jitter_max(),
            seed: None,
        }
    }
}

fn default_jitter_min() -> f64 {
    JitterBounds::default().min()
}

fn default_jitter_max() -> f64 {
    JitterBounds::default().max()
}

impl EstimatorSettings {
    pub fn jitter_bounds(&self) -> anyhow::Result<JitterBounds> {
        JitterBounds::new(self.jitter_min, self.jitter_max)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FallbackSettings {
    #[serde(default = "default_window_months")]
    pub window_months: u32,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            window_months: default_window_months(),
        }
    }
}

fn default_window_months() -> u32 {
    12
}

/// `config/analytics.*` overridden by `ANALYTICS__SECTION__KEY` variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/analytics").required(false))
        .add_source(config::Environment::with_prefix("ANALYTICS").separator("__"))
        .build()?;

    parse_app_config(settings)
}

fn parse_app_config(settings: config::Config) -> anyhow::Result<AppConfig> {
    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.estimator.jitter_bounds()?;
    if app_config.fallback.window_months == 0 {
        anyhow::bail!("fallback.window_months must be at least 1");
    }
    if app_config.fallback.window_months > MAX_WINDOW_MONTHS {
        anyhow::bail!(
            "fallback.window_months must be at most {}, got {}",
            MAX_WINDOW_MONTHS,
            app_config.fallback.window_months
        );
    }
    Ok(app_config)
}
