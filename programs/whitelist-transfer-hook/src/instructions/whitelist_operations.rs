use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, WHITELISTED_USER_SEED},
    errors::WhitelistError,
    events::{UserAddedToWhitelist, UserRemovedFromWhitelist},
    state::{Config, WhitelistedUser},
};

/// Add a user to the whitelist.
/// Requires the signer to be the admin recorded in `Config`.
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct AddToWhitelist<'info> {
    /// The admin, also pays for account creation
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The `Config` account naming the admin
    /// # PDA Seeds
    /// - `CONFIG_SEED`
    /// - The recorded admin's address
    #[account(
        seeds = [CONFIG_SEED, config.admin.as_ref()],
        bump = config.bump,
        constraint = config.admin == admin.key() @ WhitelistError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    /// The `WhitelistedUser` account being created
    /// # PDA Seeds
    /// - `WHITELISTED_USER_SEED`
    /// - Address being whitelisted
    #[account(
        init,
        payer = admin,
        space = 8 + WhitelistedUser::INIT_SPACE,
        seeds = [WHITELISTED_USER_SEED, user.as_ref()],
        bump
    )]
    pub whitelisted_user: Account<'info, WhitelistedUser>,

    /// The system program
    pub system_program: Program<'info, System>,
}

impl<'info> AddToWhitelist<'info> {
    /// Add an address to the whitelist
    /// # Arguments
    /// * `user` - The public key of the address to add to the whitelist
    /// # Returns
    /// * `Result<()>` - Ok if the address is successfully whitelisted, Err otherwise
    pub fn add_to_whitelist(&mut self, user: Pubkey, bumps: &AddToWhitelistBumps) -> Result<()> {
        self.whitelisted_user.set_inner(WhitelistedUser {
            user,
            expires_at: None,
            bump: bumps.whitelisted_user,
        });

        msg!("Added to whitelist. User: {}", user);

        emit!(UserAddedToWhitelist {
            user,
            added_by: self.admin.key(),
        });

        Ok(())
    }
}

/// Remove a user from the whitelist.
/// Requires the signer to be the admin recorded in `Config`.
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct RemoveFromWhitelist<'info> {
    /// The admin, receives the lamports from closing the record
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The `Config` account naming the admin
    /// # PDA Seeds
    /// - `CONFIG_SEED`
    /// - The recorded admin's address
    #[account(
        seeds = [CONFIG_SEED, config.admin.as_ref()],
        bump = config.bump,
        constraint = config.admin == admin.key() @ WhitelistError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    /// The `WhitelistedUser` account being closed
    /// # PDA Seeds
    /// - `WHITELISTED_USER_SEED`
    /// - Address being removed from the whitelist
    #[account(
        mut,
        close = admin,
        seeds = [WHITELISTED_USER_SEED, user.as_ref()],
        bump = whitelisted_user.bump,
    )]
    pub whitelisted_user: Account<'info, WhitelistedUser>,
}

impl<'info> RemoveFromWhitelist<'info> {
    /// Remove an address from the whitelist
    /// # Arguments
    /// * `user` - The public key of the address to remove from the whitelist
    /// # Returns
    /// * `Result<()>` - Ok if the address is successfully removed, Err otherwise
    pub fn remove_from_whitelist(&self, user: Pubkey) -> Result<()> {
        msg!("Removed from whitelist. User: {}", user);

        emit!(UserRemovedFromWhitelist {
            user,
            removed_by: self.admin.key(),
        });

        Ok(())
    }
}
