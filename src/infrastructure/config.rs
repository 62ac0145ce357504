use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub server: ServerSettings,
    pub session: SessionSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    /// Session file; an empty path keeps the session in memory only
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub redirect_delay_ms: u64,
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

fn with_defaults() -> anyhow::Result<Builder> {
    Ok(config::Config::builder()
        .set_default("api.base_url", DEFAULT_API_URL)?
        .set_default("api.timeout_secs", 10_i64)?
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("session.path", ".parking-session.json")?
        .set_default("auth.redirect_delay_ms", 800_i64)?)
}

/// Defaults, then `config/dashboard.*` if present, then `PARKING__*`
/// environment variables. A plain `API_URL` overrides the backend URL.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let mut builder = with_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("PARKING")
                .prefix_separator("__")
                .separator("__"),
        );

    if let Ok(url) = std::env::var("API_URL") {
        builder = builder.set_override("api.base_url", url)?;
    }

    Ok(builder.build()?.try_deserialize()?)
}
