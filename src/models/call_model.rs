//! models/call_model.rs
//! Llamadas de video (`calls.add`).

use serde::{Deserialize, Serialize};

/// Se usa tanto para el request de `calls.add` como dentro de `CallResult`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Solo lo asigna el servidor, nunca se envía.
    #[serde(default, skip_serializing)]
    pub id: String,

    pub external_unique_id: String,
    pub join_url: String,

    /// Unix timestamp (segundos)
    #[serde(rename = "date_start", skip_serializing_if = "Option::is_none", default)]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub desktop_app_join_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub external_display_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallResult {
    #[serde(default)]
    pub ok: bool,
    pub call: Option<Call>,
    pub error: Option<String>,
    pub warning: Option<String>,
}
