//! Identity records shared by the blog's user and role stores.

pub mod role;
pub mod user;

pub use role::IdentityRole;
pub use user::IdentityUser;
