// Domain layer: models and the ports the locator is composed from.

pub mod model;
pub mod ports;
