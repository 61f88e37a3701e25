#![allow(unexpected_cfgs)]
#![allow(deprecated)]

use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::anchor::ephemeral;

mod constants;
mod errors;
mod events;
mod instructions;
mod state;


use instructions::*;

declare_id!("EQkMxVqHWsEPHD44yAicQZ55Av8AGbfLdgsuZPJmUBqm");

#[ephemeral]
#[program]
pub mod er_state_account {
    use super::*;

    /// Create the caller's `UserAccount` on the base layer
    pub fn initialize(ctx: Context<InitUser>) -> Result<()> {
        ctx.accounts.initialize(&ctx.bumps)
    }

    /// Overwrite the account data on the base layer
    /// Signer must own the account and the account must not be delegated
    pub fn update(ctx: Context<UpdateUser>, new_data: u64) -> Result<()> {
        ctx.accounts.update(new_data)
    }

    /// Delegate the account to the given ephemeral rollup validator
    /// Signer must own the account
    pub fn delegate(ctx: Context<Delegate>) -> Result<()> {
        ctx.accounts.delegate()
    }

    /// Update the account inside the rollup and schedule a commit to the base layer
    /// Signer must own the account and the account must be delegated
    pub fn update_commit(ctx: Context<UpdateCommit>, new_data: u64) -> Result<()> {
        ctx.accounts.update_commit(new_data)
    }

    /// Commit the final state and return the account to the base layer
    /// Signer must own the account and the account must be delegated
    pub fn undelegate(ctx: Context<Undelegate>) -> Result<()> {
        ctx.accounts.undelegate()
    }

    /// Close the account and refund rent to the owner
    /// The account must not be delegated
    pub fn close(ctx: Context<CloseUser>) -> Result<()> {
        ctx.accounts.close()
    }

    /// Request a random value for the account data from the VRF oracle
    ///
    /// Returns before the value is written. Poll the account until
    /// `randomness_pending` clears to observe the result.
    pub fn randomize(ctx: Context<Randomize>, client_seed: u8) -> Result<()> {
        ctx.accounts.randomize(client_seed)
    }

    /// VRF oracle callback
    /// Signer must be the VRF program identity
    pub fn consume_randomness(ctx: Context<ConsumeRandomness>, randomness: [u8; 32]) -> Result<()> {
        ctx.accounts.consume_randomness(randomness)
    }
}
