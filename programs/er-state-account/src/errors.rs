use anchor_lang::prelude::*;

#[error_code]
pub enum ErStateError {
    #[msg("Signer does not own this user account")]
    Unauthorized,
    #[msg("Operation not allowed in the current delegation state")]
    InvalidState,
    #[msg("No randomness request is pending for this account")]
    NoPendingRandomness,
    #[msg("A randomness request is still waiting for the oracle")]
    RandomnessPending,
}
