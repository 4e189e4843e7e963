// Domain layer: payload models and provider ports. Adapters implement the ports.

pub mod model;
pub mod ports;
