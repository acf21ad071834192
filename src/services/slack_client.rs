//! services/slack_client.rs
//! Cliente delgado sobre la Web API de Slack: arma el request, inyecta el token,
//! decodifica el JSON y clasifica los fallos.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    errors::SlackError,
    models::operation_model::{Operation, Verb},
};

pub const DEFAULT_API_BASE: &str = "https://slack.com/api/";
const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Request ya armado, listo para el transporte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub verb: Verb,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Respuesta con el body ya leído completo. Si la lectura falló, `body` trae el error.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: Result<Bytes, String>,
}

/// Punto de inyección del transporte HTTP (en tests se reemplaza por un mock).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// `Err` solo para fallos de conexión/DNS/etc.
    async fn send(&self, req: WireRequest) -> Result<WireResponse, String>;
}

/// Transporte real sobre reqwest.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, req: WireRequest) -> Result<WireResponse, String> {
        let mut builder = match req.verb {
            Verb::Get => self.http_client.get(&req.url),
            Verb::Post => self.http_client.post(&req.url),
        };
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        // bytes() consume la respuesta completa, también en los no-2xx
        let body = resp.bytes().await.map_err(|e| e.to_string());

        Ok(WireResponse { status, body })
    }
}

/// Valor decodificado + texto crudo de la respuesta.
#[derive(Debug, Clone)]
pub struct ApiReply<R> {
    pub body: R,
    pub raw: String,
}

#[derive(Clone)]
pub struct SlackClient {
    transport: Arc<dyn HttpTransport>,
    token: String,
    api_base: String,
}

impl SlackClient {
    pub fn with_base(
        transport: Arc<dyn HttpTransport>,
        token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let mut api_base = api_base.into();
        if !api_base.ends_with('/') {
            api_base.push('/');
        }
        Self {
            transport,
            token: token.into(),
            api_base,
        }
    }

    /// Ejecuta la operación y decodifica la respuesta en un `R` nuevo.
    /// No interpreta `ok`: solo detecta fallos de transporte/protocolo.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        op: Operation,
    ) -> Result<ApiReply<R>, SlackError> {
        let wire_req = self.build_request(&op)?;
        log::info!(
            "(execute) {} {} ({})",
            wire_req.verb.as_str(),
            wire_req.url,
            op.method()
        );

        let resp = self.transport.send(wire_req).await.map_err(|e| {
            log::error!("(execute) Fallo de transporte en {}: {}", op.method(), e);
            SlackError::Transport(e)
        })?;

        if !(200..300).contains(&resp.status) {
            let body = resp
                .body
                .as_ref()
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default();
            log::error!(
                "(execute) {} respondió status={} body='{}'",
                op.method(),
                resp.status,
                body
            );
            return Err(SlackError::HttpStatus {
                status: resp.status,
                body,
            });
        }

        let bytes = resp.body.map_err(SlackError::Read)?;
        let raw = String::from_utf8_lossy(&bytes).into_owned();
        log::debug!("(execute) Respuesta cruda de {}:\n{}", op.method(), raw);

        match serde_json::from_slice::<R>(&bytes) {
            Ok(body) => Ok(ApiReply { body, raw }),
            Err(source) => {
                log::error!(
                    "(execute) No se pudo decodificar la respuesta de {}: {}",
                    op.method(),
                    source
                );
                Err(SlackError::Decode { source, raw })
            }
        }
    }

    fn build_request(&self, op: &Operation) -> Result<WireRequest, SlackError> {
        let body = match op.verb() {
            Verb::Post => op.body().map_err(SlackError::Encode)?,
            Verb::Get => None,
        };
        Ok(WireRequest {
            verb: op.verb(),
            url: op.url(&self.api_base),
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", self.token)),
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
            ],
            body,
        })
    }
}
