// Domain layer: enquiry models and the ports the mail path talks through.

pub mod model;
pub mod ports;
