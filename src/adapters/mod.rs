// Adapters layer: concrete implementations for external systems (hosting API, local disk).

pub mod http;
pub mod storage;
