//! models/response_model.rs
//! Formas de respuesta comunes de la API de Slack.
//!
//! Slack responde HTTP 200 aunque la operación falle; el resultado real va en `ok`.
//! Estas estructuras no interpretan `ok`, eso le toca a quien llama.

use serde::Deserialize;

use crate::models::channel_model::Channel;

/// Para métodos que no devuelven entidades (setTopic, archive, postMessage, calls.end).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenericResult {
    #[serde(default)]
    pub ok: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
}

/// conversations.create / conversations.invite
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChannelResult {
    #[serde(default)]
    pub ok: bool,
    pub channel: Option<Channel>,
    pub error: Option<String>,
    pub detail: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// Página de un listado. Los items llegan como "channels" o "members" según el método.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PaginatedResult<T> {
    #[serde(default)]
    pub ok: bool,
    #[serde(alias = "channels", alias = "members", default = "Vec::new")]
    pub items: Vec<T>,
    pub response_metadata: Option<ResponseMetadata>,
    pub error: Option<String>,
    pub detail: Option<String>,
    pub warning: Option<String>,
}

impl<T> PaginatedResult<T> {
    /// Cursor de la siguiente página; `None` si ya no hay más.
    pub fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .map(|m| m.next_cursor.as_str())
            .filter(|c| !c.is_empty())
    }
}
