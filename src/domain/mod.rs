// Domain layer: source records, graph entities and ports (interfaces).

pub mod model;
pub mod ports;
pub mod source;
