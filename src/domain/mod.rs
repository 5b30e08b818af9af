// Domain layer: report model and ports (interfaces).

pub mod model;
pub mod ports;
