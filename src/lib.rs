pub mod cache;
pub mod config;
pub mod db;
pub mod di;
pub mod domain;
pub mod error;
pub mod identity;
pub mod logging;

pub use error::BlogError;
pub use identity::{IdentityRole, IdentityUser};
