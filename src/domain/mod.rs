//! Gateway protocol types: request parameters, signatures, schemas and the
//! ports the payment methods depend on.

pub mod command;
pub mod parameters;
pub mod ports;
pub mod signature;
pub mod status;
pub mod validation;
