//! Inbound adapters translating external requests into catalog use cases
//! while keeping framework details at the edge.

pub mod http;
