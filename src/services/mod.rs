//! services/mod.rs
//! Capas de negocio: cliente de Slack, paginación y flujos del janitor.

pub mod janitor_service;
pub mod pagination_service;
pub mod slack_client;
