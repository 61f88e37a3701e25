// PDA SEEDS

/// Seed for the UserAccount PDA
pub const USER_SEED: &[u8] = b"user";

// RANDOMNESS

/// Slots after which an unanswered randomness request no longer blocks
/// a new request or a delegation
pub const RANDOMNESS_TIMEOUT_SLOTS: u64 = 150;
