use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount};
use spl_token_2022::{
    extension::{
        transfer_hook::TransferHookAccount, BaseStateWithExtensions, PodStateWithExtensions,
    },
    pod::PodAccount,
};

use crate::{
    constants::{EXTRA_ACCOUNT_METAS_SEED, WHITELISTED_USER_SEED},
    errors::WhitelistError,
    state::WhitelistedUser,
};

/// Accounts of the transfer hook `Execute` instruction, in interface order.
/// Token-2022 appends the entries declared in the ExtraAccountMetaList.
#[derive(Accounts)]
pub struct TransferHook<'info> {
    /// Source token account
    #[account(token::mint = mint)]
    pub source_token: InterfaceAccount<'info, TokenAccount>,

    /// The gated mint
    pub mint: InterfaceAccount<'info, Mint>,

    /// Destination token account
    #[account(token::mint = mint)]
    pub destination_token: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Source authority, either the owner or a delegate. Only its address is used.
    pub owner: UncheckedAccount<'info>,

    /// CHECK: Seeds constraint validates PDA address. Read by Token-2022, not by this program.
    #[account(
        seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    /// The source authority's whitelist record, resolved from the ExtraAccountMetaList
    /// # PDA Seeds
    /// - `WHITELISTED_USER_SEED`
    /// - The source authority's address
    ///
    /// CHECK: Seeds constraint validates PDA address. May not exist, see `WhitelistedUser::check_record`.
    #[account(
        seeds = [WHITELISTED_USER_SEED, owner.key().as_ref()],
        bump
    )]
    pub whitelisted_user: UncheckedAccount<'info>,
}

impl<'info> TransferHook<'info> {
    /// Veto the transfer unless the source authority is whitelisted
    pub fn transfer_hook(&self, amount: u64) -> Result<()> {
        {
            let source_info = self.source_token.to_account_info();
            let source_data = source_info.try_borrow_data()?;
            check_is_transferring(&source_data)?;
        }

        let now = Clock::get()?.unix_timestamp;
        let record_data = self.whitelisted_user.try_borrow_data()?;
        WhitelistedUser::check_record(
            self.whitelisted_user.owner,
            &record_data,
            &self.owner.key(),
            now,
        )?;

        msg!(
            "Transfer of {} approved for whitelisted user {}",
            amount,
            self.owner.key()
        );

        Ok(())
    }
}

/// Token-2022 raises `transferring` on the source account only for the
/// duration of the hook CPI. Anything else is a direct call.
pub fn check_is_transferring(token_account_data: &[u8]) -> Result<()> {
    let account = PodStateWithExtensions::<PodAccount>::unpack(token_account_data)?;
    let extension = account
        .get_extension::<TransferHookAccount>()
        .map_err(|_| error!(WhitelistError::NotTransferring))?;

    require!(
        bool::from(extension.transferring),
        WhitelistError::NotTransferring
    );
    Ok(())
}
