//! models/message_model.rs

use serde::{Deserialize, Serialize};

/// Bloque estructurado de un mensaje. Solo usamos el de tipo "call".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Call { call_id: String },
}

/// chat.postMessage. Responde con `GenericResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
}
