//! errors.rs
//! Errores del cliente de Slack y de los flujos del janitor.

use thiserror::Error;

/// Fallos a nivel transporte/protocolo. No incluye `ok: false`, eso no es un
/// error del cliente sino de la operación.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Error ejecutando request: {0}")]
    Transport(String),

    #[error("Respuesta no-2xx (status {status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Error leyendo respuesta: {0}")]
    Read(String),

    #[error("Error decodificando respuesta: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Body crudo, para poder loguearlo
        raw: String,
    },

    #[error("Error serializando request: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errores fatales para una corrida de los flujos.
#[derive(Debug, Error)]
pub enum JanitorError {
    #[error(transparent)]
    Slack(#[from] SlackError),

    #[error("{method} respondió ok=false: {error}")]
    LogicalFailure { method: &'static str, error: String },

    #[error("No se encontró el canal #{0}")]
    ChannelNotFound(String),

    #[error("Hora inválida: {0}")]
    InvalidTime(String),
}

impl JanitorError {
    pub fn logical(method: &'static str, error: Option<&str>) -> Self {
        JanitorError::LogicalFailure {
            method,
            error: error.unwrap_or("unknown_error").to_string(),
        }
    }
}
