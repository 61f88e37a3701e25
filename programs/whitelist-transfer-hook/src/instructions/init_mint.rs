use anchor_lang::{
    prelude::*,
    solana_program::{program::invoke, system_instruction},
};
use anchor_spl::token_2022::Token2022;
use spl_token_2022::{
    extension::{self, ExtensionType},
    instruction::initialize_mint2,
    pod::PodMint,
};

use crate::{
    constants::CONFIG_SEED, errors::WhitelistError, events::TransferHookMintCreated,
    state::Config,
};

/// Create a Token-2022 mint whose transfer hook is this program.
/// The admin becomes both the mint authority and the hook authority.
#[derive(Accounts)]
pub struct InitMint<'info> {
    /// The admin, pays for the mint account
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The `Config` account naming the admin
    /// # PDA Seeds
    /// - `CONFIG_SEED`
    /// - The recorded admin's address
    #[account(
        seeds = [CONFIG_SEED, config.admin.as_ref()],
        bump = config.bump,
        constraint = config.admin == admin.key() @ WhitelistError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    /// The new mint keypair
    #[account(mut)]
    pub mint: Signer<'info>,

    /// The system program
    pub system_program: Program<'info, System>,

    /// The Token-2022 program
    pub token_program: Program<'info, Token2022>,
}

impl<'info> InitMint<'info> {
    pub fn init_mint(&mut self, decimals: u8) -> Result<()> {
        // Step 1: Size the account for the TransferHook extension
        let space = ExtensionType::try_calculate_account_len::<PodMint>(&[
            ExtensionType::TransferHook,
        ])?;
        let rent = Rent::get()?;

        // Step 2: Create the mint account
        invoke(
            &system_instruction::allocate(&self.mint.key(), space as u64),
            &[self.mint.to_account_info()],
        )?;

        // A pre-funded address only needs the difference
        invoke(
            &system_instruction::transfer(
                &self.admin.key(),
                &self.mint.key(),
                rent.minimum_balance(space)
                    .saturating_sub(self.mint.lamports()),
            ),
            &[
                self.admin.to_account_info(),
                self.mint.to_account_info(),
                self.system_program.to_account_info(),
            ],
        )?;

        invoke(
            &system_instruction::assign(&self.mint.key(), &self.token_program.key()),
            &[
                self.mint.to_account_info(),
                self.system_program.to_account_info(),
            ],
        )?;

        // Step 3: The extension must be initialized before the mint itself
        let init_transfer_hook_ix = extension::transfer_hook::instruction::initialize(
            &self.token_program.key(),
            &self.mint.key(),
            Some(self.admin.key()),
            Some(crate::ID),
        )?;
        invoke(&init_transfer_hook_ix, &[self.mint.to_account_info()])?;

        let init_mint_ix = initialize_mint2(
            &self.token_program.key(),
            &self.mint.key(),
            &self.admin.key(),
            None,
            decimals,
        )?;
        invoke(&init_mint_ix, &[self.mint.to_account_info()])?;

        msg!(
            "Mint {} created with transfer hook {}",
            self.mint.key(),
            crate::ID
        );

        emit!(TransferHookMintCreated {
            mint: self.mint.key(),
            authority: self.admin.key(),
            decimals,
        });

        Ok(())
    }
}
