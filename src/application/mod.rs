// Application layer - use cases over the customer directory.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
