use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::{anchor::commit, ephem::commit_accounts};

use crate::{
    constants::USER_SEED, errors::ErStateError, events::UserDataCommitted, state::UserAccount,
};

/// Update the account inside the rollup and schedule a commit to the base layer.
/// Sent to the ephemeral rollup endpoint, not the base layer.
#[commit]
#[derive(Accounts)]
pub struct UpdateCommit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [USER_SEED, user.key().as_ref()],
        bump = user_account.bump,
        has_one = user @ ErStateError::Unauthorized,
    )]
    pub user_account: Account<'info, UserAccount>,
}

impl<'info> UpdateCommit<'info> {
    /// Returns once the commit is scheduled. Completion is observed through the
    /// commitment signature of this transaction.
    /// # Errors
    /// * `ErStateError::InvalidState` - If the account is not delegated
    pub fn update_commit(&mut self, new_data: u64) -> Result<()> {
        self.user_account.commit_data(new_data)?;

        // Serialize before the commit so the snapshot carries the new data
        self.user_account.exit(&crate::ID)?;

        commit_accounts(
            &self.user,
            vec![&self.user_account.to_account_info()],
            &self.magic_context,
            &self.magic_program,
        )?;

        emit!(UserDataCommitted {
            user: self.user.key(),
            data: new_data,
        });

        Ok(())
    }
}
