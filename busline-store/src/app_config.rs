use busline_core::NameOrder;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub ticket: TicketConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 { 5 }
fn default_acquire_timeout() -> u64 { 3 }
fn default_true() -> bool { true }

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

/// Overrides for the ticket's look. Unset fields keep the renderer's defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TicketConfig {
    pub title: Option<String>,
    pub footer: Option<Vec<String>>,
    pub currency_symbol: Option<String>,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub passenger_order: NameOrder,
    pub qr_source_size: Option<u32>,
    pub qr_display_size: Option<f32>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `BUSLINE__DATABASE__URL=postgres://...` sets `database.url`
            .add_source(config::Environment::with_prefix("BUSLINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse(
            r#"
            [server]
            port = 8080

            [database]
            url = "postgres://localhost/busline"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout_seconds, 3);
        assert!(config.database.run_migrations);
        assert_eq!(config.cors.allowed_origin, "http://localhost:3000");
        assert!(config.ticket.title.is_none());
        assert_eq!(config.ticket.passenger_order, NameOrder::CaseSensitive);
    }

    #[test]
    fn test_ticket_overrides() {
        let config = parse(
            r#"
            [server]
            port = 8080

            [database]
            url = "postgres://localhost/busline"

            [ticket]
            title = "Night Coach Ticket"
            footer = ["Safe travels"]
            currency_symbol = "INR"
            utc_offset_minutes = 330
            passenger_order = "case_insensitive"
            qr_display_size = 100.0
            "#,
        )
        .unwrap();

        assert_eq!(config.ticket.title.as_deref(), Some("Night Coach Ticket"));
        assert_eq!(config.ticket.footer, Some(vec!["Safe travels".to_string()]));
        assert_eq!(config.ticket.currency_symbol.as_deref(), Some("INR"));
        assert_eq!(config.ticket.utc_offset_minutes, 330);
        assert_eq!(config.ticket.passenger_order, NameOrder::CaseInsensitive);
        assert_eq!(config.ticket.qr_display_size, Some(100.0));
        assert!(config.ticket.qr_source_size.is_none());
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        let result = parse(
            r#"
            [server]
            port = 8080

            [database]
            max_connections = 2
            "#,
        );
        assert!(result.is_err());
    }
}
