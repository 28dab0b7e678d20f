//! Application layer containing the request orchestration.
//!
//! This module defines the `PaymentMethod` capability and `GatewayMethod`,
//! the single routine behind every method variant: merge defaults, sign,
//! validate, dispatch, interpret the status.

pub mod method;
