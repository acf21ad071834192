//! tests/mod.rs
//! Pruebas de servicio y de endpoints, contra un transporte HTTP simulado.

mod handler_tests;
mod slack_client_tests;
