// Domain layer: the slug/story model and the ports the handler depends on.

pub mod model;
pub mod ports;
