// Domain layer: plain data and the traits the host side implements.

pub mod model;
pub mod ports;
