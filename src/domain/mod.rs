// Domain layer: report model and ports (file storage, rewrite passes).

pub mod model;
pub mod ports;
