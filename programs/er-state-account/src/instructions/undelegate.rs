use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::{anchor::commit, ephem::commit_and_undelegate_accounts};

use crate::{
    constants::USER_SEED, errors::ErStateError, events::UserAccountUndelegated,
    state::UserAccount,
};

/// Commit the final rollup state and return the account to the base layer.
/// Sent to the ephemeral rollup endpoint.
#[commit]
#[derive(Accounts)]
pub struct Undelegate<'info> {
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

impl<'info> Undelegate<'info> {
    /// Always performs a final commit, so a preceding `update_commit` is not required.
    /// # Errors
    /// * `ErStateError::InvalidState` - If the account is not delegated
    pub fn undelegate(&mut self) -> Result<()> {
        let validator = self.user_account.mark_undelegated()?;

        // The base layer receives the account already flagged as owned
        self.user_account.exit(&crate::ID)?;

        commit_and_undelegate_accounts(
            &self.user,
            vec![&self.user_account.to_account_info()],
            &self.magic_context,
            &self.magic_program,
        )?;

        emit!(UserAccountUndelegated {
            user: self.user.key(),
            validator,
            data: self.user_account.data,
        });

        Ok(())
    }
}
