use anchor_lang::prelude::*;

/// Config state account - records the admin allowed to edit the whitelist
#[account]
#[derive(InitSpace)]
pub struct Config {
    // The admin allowed to add and remove whitelisted users
    pub admin: Pubkey,

    // The bump used to derive the PDA for this account
    // Stored so we don't need to recalculate it later
    pub bump: u8,
}
