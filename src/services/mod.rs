pub mod cart_service;
pub mod configurator_service;

pub use cart_service::*;
pub use configurator_service::*;
