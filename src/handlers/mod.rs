//! handlers/mod.rs
//! Endpoints HTTP que disparan los flujos del janitor.

pub mod janitor_handler;
