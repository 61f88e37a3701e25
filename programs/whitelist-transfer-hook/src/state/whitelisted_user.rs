use anchor_lang::prelude::*;

use crate::errors::WhitelistError;

/// WhitelistedUser state account - while it exists and has not expired, the user may transfer
#[account]
#[derive(InitSpace)]
pub struct WhitelistedUser {
    // The user allowed to send tokens
    pub user: Pubkey,

    // Unix timestamp from which the entry no longer authorizes transfers
    pub expires_at: Option<i64>,

    // The bump used to derive the PDA for this account
    // Stored so we don't need to recalculate it later
    pub bump: u8,
}

impl WhitelistedUser {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Verify that a raw account is a live whitelist record for `authority`.
    ///
    /// Closed records are reassigned to the System Program and carry no data,
    /// so they fail the owner check the same way a never-created record does.
    /// An expired record is rejected even before anyone closes it.
    pub fn check_record(
        record_owner: &Pubkey,
        mut data: &[u8],
        authority: &Pubkey,
        now: i64,
    ) -> Result<()> {
        require_keys_eq!(*record_owner, crate::ID, WhitelistError::NotWhitelisted);

        let record = WhitelistedUser::try_deserialize(&mut data)
            .map_err(|_| error!(WhitelistError::NotWhitelisted))?;

        require_keys_eq!(record.user, *authority, WhitelistError::NotWhitelisted);
        require!(!record.is_expired(now), WhitelistError::NotWhitelisted);
        Ok(())
    }
}
