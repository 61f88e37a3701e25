use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::{anchor::delegate, cpi::DelegateConfig};

use crate::{constants::USER_SEED, events::UserAccountDelegated, state::UserAccount};

/// Hand write authority over the `UserAccount` to an ephemeral rollup validator
#[delegate]
#[derive(Accounts)]
pub struct Delegate<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: Marked with `del` so the SDK generates `delegate_user_account` and the
    /// delegation program accounts. Loaded by `UserAccount::load`.
    #[account(
        mut,
        del,
        seeds = [USER_SEED, user.key().as_ref()],
        bump,
    )]
    pub user_account: UncheckedAccount<'info>,

    /// CHECK: Only its address is used, as the validator allowed to run the delegated account
    pub validator: UncheckedAccount<'info>,

    /// The system program
    pub system_program: Program<'info, System>,
}

impl<'info> Delegate<'info> {
    /// Record the validator in the account, then delegate it.
    /// An account still owned by this program is not delegated, whatever its flag says.
    /// # Errors
    /// * `ErStateError::InvalidState` - If the account is already delegated
    /// * `ErStateError::RandomnessPending` - If an oracle callback may still arrive
    pub fn delegate(&mut self) -> Result<()> {
        let validator = self.validator.key();
        let current_slot = Clock::get()?.slot;

        let mut account = UserAccount::load(&self.user_account, self.user.key)?;
        if account.is_delegated() {
            msg!("Clearing stale delegation flag");
        }
        account.mark_delegated(validator, current_slot)?;

        // The delegation program snapshots the raw account data, so the new
        // state must be written out before the CPI
        account.store(&self.user_account)?;

        let pda_seeds: &[&[u8]] = &[USER_SEED, self.user.key.as_ref()];

        self.delegate_user_account(
            &self.user,
            pda_seeds,
            DelegateConfig {
                validator: Some(validator),
                ..DelegateConfig::default()
            },
        )?;

        emit!(UserAccountDelegated {
            user: self.user.key(),
            validator,
        });

        Ok(())
    }
}
