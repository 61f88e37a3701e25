use anchor_lang::{
    prelude::*,
    solana_program::program_option::COption,
    system_program::{create_account, CreateAccount},
};
use anchor_spl::{token_2022::Token2022, token_interface::Mint};
use spl_tlv_account_resolution::{
    account::ExtraAccountMeta, seeds::Seed, state::ExtraAccountMetaList,
};
use spl_token_2022::{
    extension::{transfer_hook, PodStateWithExtensions},
    pod::PodMint,
};
use spl_transfer_hook_interface::instruction::ExecuteInstruction;

use crate::{
    constants::{EXECUTE_OWNER_INDEX, EXTRA_ACCOUNT_METAS_SEED, WHITELISTED_USER_SEED},
    errors::WhitelistError,
    events::TransferHookInitialized,
};

/// Write the ExtraAccountMetaList Token-2022 reads before invoking the hook.
/// Signer must be the mint authority.
#[derive(Accounts)]
pub struct InitializeTransferHook<'info> {
    /// The mint authority, pays for the list account
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The ExtraAccountMetaList account being created
    /// # PDA Seeds
    /// - `EXTRA_ACCOUNT_METAS_SEED`
    /// - The mint's address
    ///
    /// CHECK: Seeds constraint validates PDA address. Created and written manually.
    #[account(
        mut,
        seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    /// The mint whose transfers this program gates
    #[account(
        mint::token_program = token_program,
        constraint = mint.mint_authority == COption::Some(payer.key()) @ WhitelistError::Unauthorized,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// The Token-2022 program
    pub token_program: Program<'info, Token2022>,

    /// The system program
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeTransferHook<'info> {
    pub fn initialize_transfer_hook(&mut self, bumps: &InitializeTransferHookBumps) -> Result<()> {
        {
            let mint_info = self.mint.to_account_info();
            let mint_data = mint_info.try_borrow_data()?;
            let hook_program = hook_program_id(&mint_data)?;
            require_keys_eq!(
                hook_program,
                crate::ID,
                WhitelistError::TransferHookProgramMismatch
            );
        }

        require!(
            self.extra_account_meta_list.data_is_empty(),
            WhitelistError::AlreadyExists
        );

        let extra_account_metas = extra_account_metas()?;
        let account_size = ExtraAccountMetaList::size_of(extra_account_metas.len())
            .map_err(|_| error!(WhitelistError::ExtraAccountMetaError))?;
        let lamports = Rent::get()?.minimum_balance(account_size);

        let mint_key = self.mint.key();
        let signer_seeds: &[&[&[u8]]] = &[&[
            EXTRA_ACCOUNT_METAS_SEED,
            mint_key.as_ref(),
            &[bumps.extra_account_meta_list],
        ]];

        create_account(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                CreateAccount {
                    from: self.payer.to_account_info(),
                    to: self.extra_account_meta_list.to_account_info(),
                },
                signer_seeds,
            ),
            lamports,
            account_size as u64,
            &crate::ID,
        )?;

        let mut data = self.extra_account_meta_list.try_borrow_mut_data()?;
        ExtraAccountMetaList::init::<ExecuteInstruction>(&mut data, &extra_account_metas)
            .map_err(|_| error!(WhitelistError::ExtraAccountMetaError))?;

        msg!("Transfer hook initialized for mint {}", mint_key);

        emit!(TransferHookInitialized {
            mint: mint_key,
            extra_account_meta_list: self.extra_account_meta_list.key(),
        });

        Ok(())
    }
}

/// Accounts Token-2022 appends to every `Execute` call for a gated mint.
///
/// The whitelist record is resolved at transfer time from the source
/// authority's address, so one list serves every sender.
pub fn extra_account_metas() -> Result<Vec<ExtraAccountMeta>> {
    Ok(vec![ExtraAccountMeta::new_with_seeds(
        &[
            Seed::Literal {
                bytes: WHITELISTED_USER_SEED.to_vec(),
            },
            Seed::AccountKey {
                index: EXECUTE_OWNER_INDEX,
            },
        ],
        false,
        false,
    )
    .map_err(|_| error!(WhitelistError::ExtraAccountMetaError))?])
}

/// Read the hook program a Token-2022 mint points at
pub fn hook_program_id(mint_data: &[u8]) -> Result<Pubkey> {
    let mint = PodStateWithExtensions::<PodMint>::unpack(mint_data)?;
    transfer_hook::get_program_id(&mint).ok_or_else(|| error!(WhitelistError::MissingTransferHook))
}
