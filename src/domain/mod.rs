// Domain layer: models and ports. Nothing here talks to the network or disk.

pub mod model;
pub mod ports;
