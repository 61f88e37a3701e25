// PDA SEEDS

/// Seed for the Config PDA
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed for a WhitelistedUser PDA
pub const WHITELISTED_USER_SEED: &[u8] = b"whitelisted_user";

/// Seed for the per-mint ExtraAccountMetaList PDA read by Token-2022 on every transfer
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

/// Index of the source authority in the transfer hook `Execute` account list
pub const EXECUTE_OWNER_INDEX: u8 = 3;
