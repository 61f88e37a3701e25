use anchor_lang::{prelude::*, system_program};

use crate::{constants::USER_SEED, events::UserAccountClosed, state::UserAccount};

/// Close the `UserAccount` and refund its rent to the owner
#[derive(Accounts)]
pub struct CloseUser<'info> {
    /// Owner of the account, receives the lamports
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: Loaded by `UserAccount::load`, which maps an account held by the
    /// delegation program to `InvalidState`
    #[account(
        mut,
        seeds = [USER_SEED, user.key().as_ref()],
        bump,
    )]
    pub user_account: UncheckedAccount<'info>,

    /// The system program
    pub system_program: Program<'info, System>,
}

impl<'info> CloseUser<'info> {
    /// # Errors
    /// * `ErStateError::InvalidState` - If the account is still delegated
    /// * `ErStateError::Unauthorized` - If the signer does not own the account
    pub fn close(&mut self) -> Result<()> {
        UserAccount::load(&self.user_account, self.user.key)?.ensure_closable()?;

        let info = self.user_account.to_account_info();
        let refund = info.lamports();
        let user_lamports = self
            .user
            .lamports()
            .checked_add(refund)
            .ok_or(ProgramError::ArithmeticOverflow)?;

        **self.user.to_account_info().try_borrow_mut_lamports()? = user_lamports;
        **info.try_borrow_mut_lamports()? = 0;
        info.assign(&system_program::ID);
        info.realloc(0, false)?;

        emit!(UserAccountClosed {
            user: self.user.key(),
        });

        Ok(())
    }
}
