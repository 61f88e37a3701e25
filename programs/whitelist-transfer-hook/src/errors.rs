use anchor_lang::prelude::*;

#[error_code]
pub enum WhitelistError {
    #[msg("Signer is not the configured admin")]
    Unauthorized,
    #[msg("Account already exists")]
    AlreadyExists,
    #[msg("Source authority is not whitelisted")]
    NotWhitelisted,
    #[msg("Hook invoked outside of a token transfer")]
    NotTransferring,
    #[msg("Mint does not have the transfer hook extension enabled")]
    MissingTransferHook,
    #[msg("Mint transfer hook points at a different program")]
    TransferHookProgramMismatch,
    #[msg("Failed to build the extra account meta list")]
    ExtraAccountMetaError,
    #[msg("ProgramData account does not belong to this program")]
    ProgramMismatch,
    #[msg("Whitelist entry has not expired yet")]
    NotExpired,
}
