//! Adapters for the domain ports: the HTTP transport, an in-memory
//! recording gateway and the default field tables.

pub mod http;
pub mod in_memory;
pub mod mask;
pub mod rules;
