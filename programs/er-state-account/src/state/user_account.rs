use anchor_lang::prelude::*;

use crate::{constants::RANDOMNESS_TIMEOUT_SLOTS, errors::ErStateError};

/// Who currently holds write authority over a `UserAccount`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum DelegationState {
    /// Writable on the base layer by its owner
    Owned,
    /// Handed to an ephemeral rollup validator
    Delegated { validator: Pubkey },
}

/// UserAccount state account - per-user payload that can move between the base layer
/// and an ephemeral rollup
#[account]
#[derive(InitSpace)]
pub struct UserAccount {
    // The address of the user who owns this account
    pub user: Pubkey,

    // Opaque payload written by the owner, the rollup or the VRF callback
    pub data: u64,

    // Current holder of write authority
    pub delegation: DelegationState,

    // Set while a randomness request is waiting for the oracle callback
    pub randomness_pending: bool,

    // Slot of the latest randomness request
    pub randomness_requested_slot: u64,

    // The bump used to derive the PDA for this account
    // Stored so we don't need to recalculate it later
    pub bump: u8,
}

impl UserAccount {
    pub fn new(user: Pubkey, bump: u8) -> Self {
        Self {
            user,
            data: 0,
            delegation: DelegationState::Owned,
            randomness_pending: false,
            randomness_requested_slot: 0,
            bump,
        }
    }

    /// On the base layer a delegated account belongs to the delegation program.
    /// Report that as a state error instead of a generic owner mismatch.
    pub fn check_base_owner(owner: &Pubkey) -> Result<()> {
        require_keys_neq!(
            *owner,
            ephemeral_rollups_sdk::id(),
            ErStateError::InvalidState
        );
        require_keys_eq!(
            *owner,
            crate::ID,
            anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
        );
        Ok(())
    }

    /// Deserialize a raw account owned by `user`
    pub fn from_raw(owner: &Pubkey, mut data: &[u8], user: &Pubkey) -> Result<Self> {
        Self::check_base_owner(owner)?;

        let account = Self::try_deserialize(&mut data)?;
        require_keys_eq!(account.user, *user, ErStateError::Unauthorized);
        Ok(account)
    }

    pub fn load(info: &AccountInfo, user: &Pubkey) -> Result<Self> {
        let data = info.try_borrow_data()?;
        Self::from_raw(info.owner, &data, user)
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        self.try_serialize(&mut writer)
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self.delegation, DelegationState::Delegated { .. })
    }

    pub fn ensure_owned(&self) -> Result<()> {
        require!(!self.is_delegated(), ErStateError::InvalidState);
        Ok(())
    }

    /// Returns the validator currently holding the account
    pub fn ensure_delegated(&self) -> Result<Pubkey> {
        match self.delegation {
            DelegationState::Delegated { validator } => Ok(validator),
            DelegationState::Owned => err!(ErStateError::InvalidState),
        }
    }

    /// Base-layer write. Only legal while the owner holds the account.
    pub fn set_data(&mut self, new_data: u64) -> Result<()> {
        self.ensure_owned()?;
        self.data = new_data;
        Ok(())
    }

    /// A request younger than `RANDOMNESS_TIMEOUT_SLOTS` may still be answered
    pub fn has_live_randomness_request(&self, current_slot: u64) -> bool {
        self.randomness_pending
            && current_slot
                < self
                    .randomness_requested_slot
                    .saturating_add(RANDOMNESS_TIMEOUT_SLOTS)
    }

    /// Caller must have checked the account is owned by this program on the
    /// base layer. That ownership overrides a `Delegated` flag left behind by
    /// an undelegation that did not run through this program.
    pub fn mark_delegated(&mut self, validator: Pubkey, current_slot: u64) -> Result<()> {
        require!(
            !self.has_live_randomness_request(current_slot),
            ErStateError::RandomnessPending
        );
        self.randomness_pending = false;
        self.delegation = DelegationState::Delegated { validator };
        Ok(())
    }

    /// Rollup write that is about to be committed back to the base layer
    pub fn commit_data(&mut self, new_data: u64) -> Result<()> {
        self.ensure_delegated()?;
        self.data = new_data;
        Ok(())
    }

    /// Returns the validator that released the account
    pub fn mark_undelegated(&mut self) -> Result<Pubkey> {
        let validator = self.ensure_delegated()?;
        self.delegation = DelegationState::Owned;
        Ok(validator)
    }

    pub fn ensure_closable(&self) -> Result<()> {
        self.ensure_owned()
    }

    pub fn begin_randomness(&mut self, current_slot: u64) -> Result<()> {
        self.ensure_owned()?;
        require!(
            !self.has_live_randomness_request(current_slot),
            ErStateError::RandomnessPending
        );
        self.randomness_pending = true;
        self.randomness_requested_slot = current_slot;
        Ok(())
    }

    /// Applies the oracle's value. Rejects callbacks nobody asked for.
    pub fn consume_randomness(&mut self, random_value: u64) -> Result<()> {
        require!(self.randomness_pending, ErStateError::NoPendingRandomness);
        self.data = random_value;
        self.randomness_pending = false;
        Ok(())
    }
}
