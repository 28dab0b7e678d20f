//! Client for a card and digital-wallet payment gateway.
//!
//! Requests are merged with the merchant defaults, signed, validated and
//! dispatched through a [`GatewayClient`](domain::ports::GatewayClient);
//! status responses are checked for authenticity and classified.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
