//! config/app_config.rs
//! Configuración del proceso, leída de variables de entorno (y `.env` vía dotenv).

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;

use crate::services::{janitor_service::JanitorSettings, slack_client::DEFAULT_API_BASE};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIME_ZONE: &str = "America/Los_Angeles";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_token: String,
    pub port: u16,
    pub vc_url: String,
    pub vc_call_id: String,
    pub time_zone: Tz,
    pub api_base: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env`, pero con una función de búsqueda (útil en tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| get(key).ok_or_else(|| anyhow!("No se definió {}", key));

        let port = match get("PORT") {
            Some(p) => p
                .parse::<u16>()
                .with_context(|| format!("PORT inválido: '{}'", p))?,
            None => {
                log::info!("PORT no definido, usando {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let tz_name = get("JANITOR_TIME_ZONE").unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string());
        let time_zone = tz_name
            .parse::<Tz>()
            .map_err(|e| anyhow!("Zona horaria inválida '{}': {}", tz_name, e))?;

        Ok(AppConfig {
            slack_token: required("SLACK_BOT_TOKEN")?,
            port,
            vc_url: required("VC_URL")?,
            vc_call_id: required("VC_CALL_ID")?,
            time_zone,
            api_base: get("SLACK_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    pub fn janitor_settings(&self) -> JanitorSettings {
        JanitorSettings {
            vc_url: self.vc_url.clone(),
            vc_call_id: self.vc_call_id.clone(),
        }
    }
}
