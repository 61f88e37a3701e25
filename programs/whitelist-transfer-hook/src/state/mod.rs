pub mod config;
pub mod whitelisted_user;

pub use config::*;
pub use whitelisted_user::*;
