use anchor_lang::prelude::*;

use crate::{constants::USER_SEED, events::UserDataUpdated, state::UserAccount};

/// Write new data to an account the owner still holds on the base layer
#[derive(Accounts)]
pub struct UpdateUser<'info> {
    pub user: Signer<'info>,

    /// CHECK: Loaded by `UserAccount::load`, which maps an account held by the
    /// delegation program to `InvalidState`
    #[account(
        mut,
        seeds = [USER_SEED, user.key().as_ref()],
        bump,
    )]
    pub user_account: UncheckedAccount<'info>,
}

impl<'info> UpdateUser<'info> {
    /// # Errors
    /// * `ErStateError::InvalidState` - If the account is delegated to a rollup
    /// * `ErStateError::Unauthorized` - If the signer does not own the account
    pub fn update(&mut self, new_data: u64) -> Result<()> {
        let mut account = UserAccount::load(&self.user_account, self.user.key)?;
        account.set_data(new_data)?;
        account.store(&self.user_account)?;

        emit!(UserDataUpdated {
            user: self.user.key(),
            data: new_data,
        });

        Ok(())
    }
}
