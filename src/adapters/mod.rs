// Adapters layer: concrete implementations for the curriculum source and artifact storage.

pub mod http;
pub mod storage;
