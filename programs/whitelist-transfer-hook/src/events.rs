use anchor_lang::prelude::*;

/// Event emitted when an admin creates its Config account
/// Fields:
/// - admin: The admin recorded in the config
/// - config: The address of the Config PDA
#[event]
pub struct ConfigInitialized {
    pub admin: Pubkey,
    pub config: Pubkey,
}

/// Event emitted when a user is added to the whitelist
/// Fields:
/// - user: The user's address
/// - added_by: The admin who added the user
#[event]
pub struct UserAddedToWhitelist {
    pub user: Pubkey,
    pub added_by: Pubkey,
}

/// Event emitted when a user is removed from the whitelist
/// Fields:
/// - user: The user's address
/// - removed_by: The admin who removed the user
#[event]
pub struct UserRemovedFromWhitelist {
    pub user: Pubkey,
    pub removed_by: Pubkey,
}

/// Event emitted when an admin sets the time a whitelist entry stops working
/// Fields:
/// - user: The user's address
/// - expires_at: Unix timestamp after which transfers are rejected
/// - scheduled_by: The admin who set the expiry
#[event]
pub struct WhitelistExpiryScheduled {
    pub user: Pubkey,
    pub expires_at: i64,
    pub scheduled_by: Pubkey,
}

/// Event emitted when an expired whitelist entry is closed
#[event]
pub struct UserExpired {
    pub user: Pubkey,
    pub expired_at: i64,
    pub cranked_by: Pubkey,
}

/// Event emitted when a Token-2022 mint is created with this program as its transfer hook
#[event]
pub struct TransferHookMintCreated {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub decimals: u8,
}

/// Event emitted when the ExtraAccountMetaList for a mint is written
#[event]
pub struct TransferHookInitialized {
    pub mint: Pubkey,
    pub extra_account_meta_list: Pubkey,
}
