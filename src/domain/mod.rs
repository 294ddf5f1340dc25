// Domain layer: records and the ports the archiver depends on.

pub mod model;
pub mod ports;
