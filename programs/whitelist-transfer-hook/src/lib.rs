#![allow(unexpected_cfgs)]
#![allow(deprecated)]

use anchor_lang::prelude::*;
use spl_discriminator::SplDiscriminate;
use spl_transfer_hook_interface::instruction::ExecuteInstruction;

mod constants;
mod errors;
mod events;
mod instructions;
mod state;

#[cfg(test)]
mod tests;

use instructions::*;

declare_id!("EfvcbUrqid3P54BhoFLrJhAdJxe2vxKhGG9sDRvCsWHh");

#[program]
pub mod whitelist_transfer_hook {
    use super::*;

    /// Record the signer as the admin of the whitelist
    /// Signer must be the program upgrade authority
    pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
        ctx.accounts.init_config(&ctx.bumps)
    }

    /// Allow `user` to send tokens of gated mints
    /// Signer must be the configured admin
    pub fn add_to_whitelist(ctx: Context<AddToWhitelist>, user: Pubkey) -> Result<()> {
        ctx.accounts.add_to_whitelist(user, &ctx.bumps)
    }

    /// Revoke `user`'s permission and refund the record's rent to the admin
    /// Signer must be the configured admin
    pub fn remove_from_whitelist(ctx: Context<RemoveFromWhitelist>, user: Pubkey) -> Result<()> {
        ctx.accounts.remove_from_whitelist(user)
    }

    /// Set the unix timestamp at which `user` stops being whitelisted
    /// Signer must be the configured admin
    pub fn schedule_expiry(
        ctx: Context<ScheduleExpiry>,
        user: Pubkey,
        expires_at: i64,
    ) -> Result<()> {
        ctx.accounts.schedule_expiry(user, expires_at)
    }

    /// Close an expired whitelist entry, refunding its rent to the admin
    /// Callable by anyone once the expiry has passed
    pub fn expire_user(ctx: Context<ExpireUser>, user: Pubkey) -> Result<()> {
        ctx.accounts.expire_user(user)
    }

    /// Create a Token-2022 mint gated by this program
    /// Signer must be the configured admin
    pub fn init_mint(ctx: Context<InitMint>, decimals: u8) -> Result<()> {
        ctx.accounts.init_mint(decimals)
    }

    /// Create the ExtraAccountMetaList for a mint
    /// Signer must be the mint authority
    pub fn initialize_transfer_hook(ctx: Context<InitializeTransferHook>) -> Result<()> {
        ctx.accounts.initialize_transfer_hook(&ctx.bumps)
    }

    /// Transfer hook `Execute` entrypoint, invoked by Token-2022 on every transfer
    #[instruction(discriminator = ExecuteInstruction::SPL_DISCRIMINATOR_SLICE)]
    pub fn transfer_hook(ctx: Context<TransferHook>, amount: u64) -> Result<()> {
        ctx.accounts.transfer_hook(amount)
    }
}
