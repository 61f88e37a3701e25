use anchor_lang::prelude::*;

use crate::{
    constants::CONFIG_SEED, errors::WhitelistError, events::ConfigInitialized, state::Config,
};

/// Create the Config account that records who administers the whitelist
/// Requires the signer to be the program upgrade authority
#[derive(Accounts)]
pub struct InitConfig<'info> {
    /// The admin, must be the program upgrade authority. Also pays for account creation.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The `Config` account being created
    /// # PDA Seeds
    /// - `CONFIG_SEED`
    /// - The admin's address
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [CONFIG_SEED, admin.key().as_ref()],
        bump
    )]
    pub config: Account<'info, Config>,

    /// The system program
    pub system_program: Program<'info, System>,

    /// The whitelist transfer hook program
    #[account(address = crate::ID)]
    pub program: Program<'info, crate::program::WhitelistTransferHook>,

    /// The ProgramData account of the whitelist transfer hook program
    #[account(
        constraint =
            program_data.upgrade_authority_address == Some(admin.key()) @ WhitelistError::Unauthorized
    )]
    pub program_data: Account<'info, ProgramData>,
}

impl<'info> InitConfig<'info> {
    /// # Errors
    /// * `WhitelistError::Unauthorized` - If the signer is not the upgrade authority
    /// * `WhitelistError::ProgramMismatch` - If `program_data` belongs to another program
    pub fn init_config(&mut self, bumps: &InitConfigBumps) -> Result<()> {
        // Verify the program upgrade authority
        if let Some(program_data_address) = self.program.programdata_address()? {
            require_keys_eq!(
                program_data_address,
                self.program_data.key(),
                WhitelistError::ProgramMismatch
            );
        } else {
            return Err(WhitelistError::ProgramMismatch.into());
        }

        self.config.set_inner(Config {
            admin: self.admin.key(),
            bump: bumps.config,
        });

        msg!("Initialized config. Admin: {}", self.admin.key());

        emit!(ConfigInitialized {
            admin: self.admin.key(),
            config: self.config.key(),
        });

        Ok(())
    }
}
