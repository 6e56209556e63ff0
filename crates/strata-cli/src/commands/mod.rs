//! Command implementations.

pub mod configs;
pub mod extract;

pub use self::configs::execute_configs;
pub use self::extract::execute_extract;
