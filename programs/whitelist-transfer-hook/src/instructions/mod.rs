pub mod expiry_operations;
pub mod init_config;
pub mod init_extra_account_meta;
pub mod init_mint;
pub mod transfer_hook;
pub mod whitelist_operations;

pub use expiry_operations::*;
pub use init_config::*;
pub use init_extra_account_meta::*;
pub use init_mint::*;
pub use transfer_hook::*;
pub use whitelist_operations::*;
