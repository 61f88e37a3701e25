use anchor_lang::prelude::*;

/// Event emitted when a user account is created on the base layer
/// Fields:
/// - user: The owner of the account
/// - user_account: The address of the UserAccount PDA
#[event]
pub struct UserAccountInitialized {
    pub user: Pubkey,
    pub user_account: Pubkey,
}

/// Event emitted when the owner writes new data on the base layer
#[event]
pub struct UserDataUpdated {
    pub user: Pubkey,
    pub data: u64,
}

/// Event emitted when write authority is handed to a rollup validator
/// Fields:
/// - user: The owner of the account
/// - validator: The validator now holding the account
#[event]
pub struct UserAccountDelegated {
    pub user: Pubkey,
    pub validator: Pubkey,
}

/// Event emitted inside the rollup when a commit to the base layer is scheduled
#[event]
pub struct UserDataCommitted {
    pub user: Pubkey,
    pub data: u64,
}

/// Event emitted inside the rollup when the final commit and undelegation are scheduled
/// Fields:
/// - user: The owner of the account
/// - validator: The validator releasing the account
/// - data: The value carried back to the base layer
#[event]
pub struct UserAccountUndelegated {
    pub user: Pubkey,
    pub validator: Pubkey,
    pub data: u64,
}

#[event]
pub struct UserAccountClosed {
    pub user: Pubkey,
}

/// Event emitted when randomness is requested from the VRF oracle
#[event]
pub struct RandomnessRequested {
    pub user: Pubkey,
    pub client_seed: u8,
}

/// Event emitted when the VRF oracle fulfils a request
#[event]
pub struct RandomnessConsumed {
    pub user: Pubkey,
    pub data: u64,
}
