use anchor_lang::prelude::*;

use crate::{constants::USER_SEED, events::UserAccountInitialized, state::UserAccount};

/// Create the `UserAccount` PDA for the signer on the base layer
#[derive(Accounts)]
pub struct InitUser<'info> {
    /// Owner of the new account, also pays for its creation
    #[account(mut)]
    pub user: Signer<'info>,

    /// The `UserAccount` being created
    /// # PDA Seeds
    /// - `USER_SEED`
    /// - The user's address
    #[account(
        init,
        payer = user,
        space = 8 + UserAccount::INIT_SPACE,
        seeds = [USER_SEED, user.key().as_ref()],
        bump
    )]
    pub user_account: Account<'info, UserAccount>,

    /// The system program
    pub system_program: Program<'info, System>,
}

impl<'info> InitUser<'info> {
    /// Initialize the account in the `Owned` state with zeroed data.
    /// Re-initializing an existing address is rejected by the `init` constraint.
    pub fn initialize(&mut self, bumps: &InitUserBumps) -> Result<()> {
        self.user_account
            .set_inner(UserAccount::new(self.user.key(), bumps.user_account));

        emit!(UserAccountInitialized {
            user: self.user.key(),
            user_account: self.user_account.key(),
        });

        Ok(())
    }
}
