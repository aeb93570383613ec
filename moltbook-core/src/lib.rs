pub mod error;
pub mod error_utils;
pub mod store;
pub mod types;

pub use error::*;
pub use error_utils::*;
pub use store::*;
pub use types::*;
