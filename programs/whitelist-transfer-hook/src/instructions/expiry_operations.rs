use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, WHITELISTED_USER_SEED},
    errors::WhitelistError,
    events::{UserExpired, WhitelistExpiryScheduled},
    state::{Config, WhitelistedUser},
};

/// Set the time at which a whitelist entry stops authorizing transfers.
/// Requires the signer to be the admin recorded in `Config`.
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct ScheduleExpiry<'info> {
    pub admin: Signer<'info>,

    /// The `Config` account naming the admin
    #[account(
        seeds = [CONFIG_SEED, config.admin.as_ref()],
        bump = config.bump,
        constraint = config.admin == admin.key() @ WhitelistError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    /// The entry receiving the expiry
    /// # PDA Seeds
    /// - `WHITELISTED_USER_SEED`
    /// - The whitelisted address
    #[account(
        mut,
        seeds = [WHITELISTED_USER_SEED, user.as_ref()],
        bump = whitelisted_user.bump,
    )]
    pub whitelisted_user: Account<'info, WhitelistedUser>,
}

impl<'info> ScheduleExpiry<'info> {
    /// Overwrites any earlier expiry. A timestamp in the past takes effect immediately.
    pub fn schedule_expiry(&mut self, user: Pubkey, expires_at: i64) -> Result<()> {
        self.whitelisted_user.expires_at = Some(expires_at);

        msg!("Scheduled expiry. User: {}, at: {}", user, expires_at);

        emit!(WhitelistExpiryScheduled {
            user,
            expires_at,
            scheduled_by: self.admin.key(),
        });

        Ok(())
    }
}

/// Close a whitelist entry whose expiry has passed.
/// Anyone may send it, the rent goes back to the admin.
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct ExpireUser<'info> {
    /// Pays the transaction fee
    pub cranker: Signer<'info>,

    /// The `Config` account naming the admin
    #[account(
        seeds = [CONFIG_SEED, config.admin.as_ref()],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Receives the lamports from closing the record
    #[account(mut, address = config.admin @ WhitelistError::Unauthorized)]
    pub admin: SystemAccount<'info>,

    /// The expired entry being closed
    #[account(
        mut,
        close = admin,
        seeds = [WHITELISTED_USER_SEED, user.as_ref()],
        bump = whitelisted_user.bump,
    )]
    pub whitelisted_user: Account<'info, WhitelistedUser>,
}

impl<'info> ExpireUser<'info> {
    /// # Errors
    /// * `WhitelistError::NotExpired` - If no expiry is set or it lies in the future
    pub fn expire_user(&mut self, user: Pubkey) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        require!(
            self.whitelisted_user.is_expired(now),
            WhitelistError::NotExpired
        );

        msg!("Expired user. User: {}", user);

        emit!(UserExpired {
            user,
            expired_at: now,
            cranked_by: self.cranker.key(),
        });

        Ok(())
    }
}
