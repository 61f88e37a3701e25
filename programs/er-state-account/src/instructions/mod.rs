pub mod close_user;
pub mod delegate;
pub mod init_user;
pub mod randomize;
pub mod undelegate;
pub mod update_commit;
pub mod update_user;

pub use close_user::*;
pub use delegate::*;
pub use init_user::*;
pub use randomize::*;
pub use undelegate::*;
pub use update_commit::*;
pub use update_user::*;
