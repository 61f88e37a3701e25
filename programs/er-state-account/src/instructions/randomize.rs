use anchor_lang::{prelude::*, Discriminator};
use ephemeral_vrf_sdk::{
    anchor::vrf,
    consts::{DEFAULT_QUEUE, VRF_PROGRAM_IDENTITY},
    instructions::{create_request_randomness_ix, RequestRandomnessParams},
    rnd::random_u64,
    types::SerializableAccountMeta,
};

use crate::{
    constants::USER_SEED,
    events::{RandomnessConsumed, RandomnessRequested},
    instruction,
    state::UserAccount,
};

/// Ask the VRF oracle to overwrite the account data with a random value.
/// The value lands later through `consume_randomness`.
#[vrf]
#[derive(Accounts)]
pub struct Randomize<'info> {
    /// Owner of the account, pays the oracle request
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

    /// CHECK: The oracle queue, pinned to the default queue address
    #[account(mut, address = DEFAULT_QUEUE)]
    pub oracle_queue: AccountInfo<'info>,
}

impl<'info> Randomize<'info> {
    /// # Arguments
    /// * `client_seed` - Caller entropy, repeated to fill the 32 byte seed
    /// # Errors
    /// * `ErStateError::InvalidState` - If the account is delegated
    /// * `ErStateError::RandomnessPending` - If an earlier request has not timed out
    pub fn randomize(&mut self, client_seed: u8) -> Result<()> {
        let current_slot = Clock::get()?.slot;

        let mut account = UserAccount::load(&self.user_account, self.user.key)?;
        account.begin_randomness(current_slot)?;
        account.store(&self.user_account)?;

        let ix = create_request_randomness_ix(RequestRandomnessParams {
            payer: self.user.key(),
            oracle_queue: self.oracle_queue.key(),
            callback_program_id: crate::ID,
            callback_discriminator: instruction::ConsumeRandomness::DISCRIMINATOR.to_vec(),
            caller_seed: [client_seed; 32],
            accounts_metas: Some(vec![SerializableAccountMeta {
                pubkey: self.user_account.key(),
                is_signer: false,
                is_writable: true,
            }]),
            ..Default::default()
        });

        self.invoke_signed_vrf(&self.user.to_account_info(), &ix)?;

        emit!(RandomnessRequested {
            user: self.user.key(),
            client_seed,
        });

        Ok(())
    }
}

/// Oracle callback carrying the randomness
#[derive(Accounts)]
pub struct ConsumeRandomness<'info> {
    /// The VRF program identity PDA, only a signer when the VRF program itself CPIs in
    #[account(address = VRF_PROGRAM_IDENTITY)]
    pub vrf_program_identity: Signer<'info>,

    #[account(
        mut,
        seeds = [USER_SEED, user_account.user.as_ref()],
        bump = user_account.bump,
    )]
    pub user_account: Account<'info, UserAccount>,
}

impl<'info> ConsumeRandomness<'info> {
    /// # Errors
    /// * `ErStateError::NoPendingRandomness` - If no request is outstanding
    pub fn consume_randomness(&mut self, randomness: [u8; 32]) -> Result<()> {
        let random_value = random_u64(&randomness);
        self.user_account.consume_randomness(random_value)?;

        msg!("Randomness consumed: {}", random_value);

        emit!(RandomnessConsumed {
            user: self.user_account.user,
            data: random_value,
        });

        Ok(())
    }
}
