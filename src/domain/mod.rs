// Domain layer: core models and ports (interfaces). No filesystem or process access here.

pub mod model;
pub mod ports;
