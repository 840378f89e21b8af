// Domain layer: name models, Messages API wire types and ports. No transport code here.

pub mod messages;
pub mod model;
pub mod ports;
