pub mod errors;
pub mod objective;
pub mod space;
pub mod strategy;

pub use errors::*;
pub use objective::*;
pub use space::*;
pub use strategy::*;
