//! models/mod.rs
//! Módulo raíz para los tipos que viajan hacia/desde la API de Slack.

pub mod call_model;
pub mod channel_model;
pub mod message_model;
pub mod operation_model;
pub mod response_model;
pub mod user_model;
