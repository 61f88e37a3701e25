use {
    crate::{
        constants::{CONFIG_SEED, EXTRA_ACCOUNT_METAS_SEED, WHITELISTED_USER_SEED},
        errors::WhitelistError,
    },
    anchor_lang::{
        prelude::{msg, Clock, Pubkey},
        InstructionData, ToAccountMetas,
    },
    anchor_spl::associated_token::{
        get_associated_token_address_with_program_id,
        spl_associated_token_account::instruction::create_associated_token_account,
    },
    litesvm::{types::TransactionResult, LiteSVM},
    solana_account::Account,
    solana_instruction::{error::InstructionError, AccountMeta, Instruction},
    solana_keypair::Keypair,
    solana_message::Message,
    solana_native_token::LAMPORTS_PER_SOL,
    solana_sdk_ids::{bpf_loader_upgradeable, system_program::ID as SYSTEM_PROGRAM_ID},
    solana_signer::Signer,
    solana_transaction::Transaction,
    solana_transaction_error::TransactionError,
    spl_token_2022::{
        extension::PodStateWithExtensions, pod::PodAccount, ID as TOKEN_2022_PROGRAM_ID,
    },
};

static PROGRAM_ID: Pubkey = crate::ID;

const PROGRAM_PATH: &str = "../../target/deploy/whitelist_transfer_hook.so";
const DECIMALS: u8 = 6;
const MINTED: u64 = 1_000_000_000;

/// Deploy the program through the upgradeable loader so `init_config` can
/// read its ProgramData account
fn deploy_upgradeable(svm: &mut LiteSVM, upgrade_authority: &Pubkey) -> Pubkey {
    let elf = std::fs::read(PROGRAM_PATH).expect("Failed to read program");
    let (program_data, _) =
        Pubkey::find_program_address(&[PROGRAM_ID.as_ref()], &bpf_loader_upgradeable::ID);

    // UpgradeableLoaderState::ProgramData { slot: 0, upgrade_authority_address: Some(..) }
    let mut program_data_bytes = Vec::with_capacity(45 + elf.len());
    program_data_bytes.extend_from_slice(&3u32.to_le_bytes());
    program_data_bytes.extend_from_slice(&0u64.to_le_bytes());
    program_data_bytes.push(1);
    program_data_bytes.extend_from_slice(upgrade_authority.as_ref());
    program_data_bytes.extend_from_slice(&elf);

    // UpgradeableLoaderState::Program { programdata_address }
    let mut program_bytes = Vec::with_capacity(36);
    program_bytes.extend_from_slice(&2u32.to_le_bytes());
    program_bytes.extend_from_slice(program_data.as_ref());

    let program_data_lamports = svm.minimum_balance_for_rent_exemption(program_data_bytes.len());
    svm.set_account(
        program_data,
        Account {
            lamports: program_data_lamports,
            data: program_data_bytes,
            owner: bpf_loader_upgradeable::ID,
            executable: false,
            rent_epoch: 0,
        },
    )
    .expect("Failed to set ProgramData account");

    let program_lamports = svm.minimum_balance_for_rent_exemption(program_bytes.len());
    svm.set_account(
        PROGRAM_ID,
        Account {
            lamports: program_lamports,
            data: program_bytes,
            owner: bpf_loader_upgradeable::ID,
            executable: true,
            rent_epoch: 0,
        },
    )
    .expect("Failed to set program account");

    program_data
}

fn setup() -> (LiteSVM, Keypair, Pubkey) {
    let mut svm = LiteSVM::new();
    let admin = Keypair::new();

    svm.airdrop(&admin.pubkey(), 10 * LAMPORTS_PER_SOL)
        .expect("Failed to airdrop SOL to admin");

    let program_data = deploy_upgradeable(&mut svm, &admin.pubkey());
    msg!("ProgramData: {}", program_data);

    (svm, admin, program_data)
}

fn funded_keypair(svm: &mut LiteSVM) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), 10 * LAMPORTS_PER_SOL)
        .expect("Failed to airdrop SOL");
    keypair
}

fn config_pda(admin: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CONFIG_SEED, admin.as_ref()], &PROGRAM_ID).0
}

fn whitelisted_user_pda(user: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[WHITELISTED_USER_SEED, user.as_ref()], &PROGRAM_ID).0
}

fn extra_account_meta_list_pda(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()], &PROGRAM_ID).0
}

fn send(
    svm: &mut LiteSVM,
    instructions: &[Instruction],
    payer: &Keypair,
    signers: &[&Keypair],
) -> TransactionResult {
    let message = Message::new(instructions, Some(&payer.pubkey()));
    let transaction = Transaction::new(signers, message, svm.latest_blockhash());
    let result = svm.send_transaction(transaction);
    // Identical transfers later in a test must not collide on signature
    svm.expire_blockhash();
    result
}

fn custom_error(result: TransactionResult) -> u32 {
    match result {
        Err(failed) => match failed.err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
            other => panic!("expected a custom program error, got {other:?}"),
        },
        Ok(_) => panic!("expected the transaction to fail"),
    }
}

fn init_config_ix(admin: &Pubkey, program_data: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: crate::accounts::InitConfig {
            admin: *admin,
            config: config_pda(admin),
            system_program: SYSTEM_PROGRAM_ID,
            program: PROGRAM_ID,
            program_data: *program_data,
        }
        .to_account_metas(None),
        data: crate::instruction::InitConfig {}.data(),
    }
}

fn add_to_whitelist_ix(admin: &Pubkey, config: &Pubkey, user: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: crate::accounts::AddToWhitelist {
            admin: *admin,
            config: *config,
            whitelisted_user: whitelisted_user_pda(user),
            system_program: SYSTEM_PROGRAM_ID,
        }
        .to_account_metas(None),
        data: crate::instruction::AddToWhitelist { user: *user }.data(),
    }
}

struct HookTestContext {
    svm: LiteSVM,
    admin: Keypair,
    program_data: Pubkey,
    config: Pubkey,
    mint: Pubkey,
    sender: Keypair,
    sender_ata: Pubkey,
    receiver_ata: Pubkey,
}

impl HookTestContext {
    fn new() -> Self {
        let (mut svm, admin, program_data) = setup();

        send(
            &mut svm,
            &[init_config_ix(&admin.pubkey(), &program_data)],
            &admin,
            &[&admin],
        )
        .expect("init_config failed");
        let config = config_pda(&admin.pubkey());
        msg!("Config: {}", config);

        // Gated mint
        let mint = Keypair::new();
        let init_mint_ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: crate::accounts::InitMint {
                admin: admin.pubkey(),
                config,
                mint: mint.pubkey(),
                system_program: SYSTEM_PROGRAM_ID,
                token_program: TOKEN_2022_PROGRAM_ID,
            }
            .to_account_metas(None),
            data: crate::instruction::InitMint { decimals: DECIMALS }.data(),
        };
        let init_hook_ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: crate::accounts::InitializeTransferHook {
                payer: admin.pubkey(),
                extra_account_meta_list: extra_account_meta_list_pda(&mint.pubkey()),
                mint: mint.pubkey(),
                token_program: TOKEN_2022_PROGRAM_ID,
                system_program: SYSTEM_PROGRAM_ID,
            }
            .to_account_metas(None),
            data: crate::instruction::InitializeTransferHook {}.data(),
        };
        send(
            &mut svm,
            &[init_mint_ix, init_hook_ix],
            &admin,
            &[&admin, &mint],
        )
        .expect("mint setup failed");
        let mint = mint.pubkey();
        msg!("Mint: {}", mint);

        // Token accounts and initial supply
        let sender = funded_keypair(&mut svm);
        let receiver = Pubkey::new_unique();
        let sender_ata = get_associated_token_address_with_program_id(
            &sender.pubkey(),
            &mint,
            &TOKEN_2022_PROGRAM_ID,
        );
        let receiver_ata =
            get_associated_token_address_with_program_id(&receiver, &mint, &TOKEN_2022_PROGRAM_ID);

        let create_sender_ata = create_associated_token_account(
            &admin.pubkey(),
            &sender.pubkey(),
            &mint,
            &TOKEN_2022_PROGRAM_ID,
        );
        let create_receiver_ata = create_associated_token_account(
            &admin.pubkey(),
            &receiver,
            &mint,
            &TOKEN_2022_PROGRAM_ID,
        );
        let mint_to_ix = spl_token_2022::instruction::mint_to(
            &TOKEN_2022_PROGRAM_ID,
            &mint,
            &sender_ata,
            &admin.pubkey(),
            &[],
            MINTED,
        )
        .unwrap();
        send(
            &mut svm,
            &[create_sender_ata, create_receiver_ata, mint_to_ix],
            &admin,
            &[&admin],
        )
        .expect("token account setup failed");

        Self {
            svm,
            admin,
            program_data,
            config,
            mint,
            sender,
            sender_ata,
            receiver_ata,
        }
    }

    fn execute_add(&mut self, user: &Pubkey) -> TransactionResult {
        let ix = add_to_whitelist_ix(&self.admin.pubkey(), &self.config, user);
        send(&mut self.svm, &[ix], &self.admin, &[&self.admin])
    }

    fn execute_remove(&mut self, user: &Pubkey) -> TransactionResult {
        let ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: crate::accounts::RemoveFromWhitelist {
                admin: self.admin.pubkey(),
                config: self.config,
                whitelisted_user: whitelisted_user_pda(user),
            }
            .to_account_metas(None),
            data: crate::instruction::RemoveFromWhitelist { user: *user }.data(),
        };
        send(&mut self.svm, &[ix], &self.admin, &[&self.admin])
    }

    fn execute_schedule_expiry(
        &mut self,
        signer: &Keypair,
        user: &Pubkey,
        expires_at: i64,
    ) -> TransactionResult {
        let ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: crate::accounts::ScheduleExpiry {
                admin: signer.pubkey(),
                config: self.config,
                whitelisted_user: whitelisted_user_pda(user),
            }
            .to_account_metas(None),
            data: crate::instruction::ScheduleExpiry {
                user: *user,
                expires_at,
            }
            .data(),
        };
        send(&mut self.svm, &[ix], signer, &[signer])
    }

    fn execute_expire(&mut self, cranker: &Keypair, user: &Pubkey) -> TransactionResult {
        let ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: crate::accounts::ExpireUser {
                cranker: cranker.pubkey(),
                config: self.config,
                admin: self.admin.pubkey(),
                whitelisted_user: whitelisted_user_pda(user),
            }
            .to_account_metas(None),
            data: crate::instruction::ExpireUser { user: *user }.data(),
        };
        send(&mut self.svm, &[ix], cranker, &[cranker])
    }

    /// `transfer_checked` with the extra accounts Token-2022 resolves for the hook
    fn execute_transfer(&mut self, amount: u64) -> TransactionResult {
        let mut ix = spl_token_2022::instruction::transfer_checked(
            &TOKEN_2022_PROGRAM_ID,
            &self.sender_ata,
            &self.mint,
            &self.receiver_ata,
            &self.sender.pubkey(),
            &[],
            amount,
            DECIMALS,
        )
        .unwrap();
        ix.accounts.extend([
            AccountMeta::new_readonly(whitelisted_user_pda(&self.sender.pubkey()), false),
            AccountMeta::new_readonly(PROGRAM_ID, false),
            AccountMeta::new_readonly(extra_account_meta_list_pda(&self.mint), false),
        ]);

        let sender = self.sender.insecure_clone();
        send(&mut self.svm, &[ix], &sender, &[&sender])
    }

    fn get_token_balance(&self, ata: &Pubkey) -> u64 {
        let account = self.svm.get_account(ata).unwrap();
        let state = PodStateWithExtensions::<PodAccount>::unpack(&account.data).unwrap();
        u64::from(state.base.amount)
    }

    fn balances(&self) -> (u64, u64) {
        (
            self.get_token_balance(&self.sender_ata),
            self.get_token_balance(&self.receiver_ata),
        )
    }

    fn warp_to_timestamp(&mut self, unix_timestamp: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp = unix_timestamp;
        self.svm.set_sysvar::<Clock>(&clock);
    }

    fn now(&self) -> i64 {
        self.svm.get_sysvar::<Clock>().unix_timestamp
    }
}

#[test]
pub fn test_init_config_requires_upgrade_authority() {
    let (mut svm, _admin, program_data) = setup();
    let intruder = funded_keypair(&mut svm);

    let result = send(
        &mut svm,
        &[init_config_ix(&intruder.pubkey(), &program_data)],
        &intruder,
        &[&intruder],
    );

    assert_eq!(custom_error(result), u32::from(WhitelistError::Unauthorized));
    assert!(svm.get_account(&config_pda(&intruder.pubkey())).is_none());
}

#[test]
pub fn test_self_made_admin_cannot_whitelist() {
    let mut ctx = HookTestContext::new();
    let intruder = funded_keypair(&mut ctx.svm);

    // Second Config for the intruder is refused
    let result = send(
        &mut ctx.svm,
        &[init_config_ix(&intruder.pubkey(), &ctx.program_data)],
        &intruder,
        &[&intruder],
    );
    assert_eq!(custom_error(result), u32::from(WhitelistError::Unauthorized));

    // With no Config of its own, the intruder can only point at the real one
    let own_config = config_pda(&intruder.pubkey());
    let ix = add_to_whitelist_ix(&intruder.pubkey(), &own_config, &intruder.pubkey());
    let result = send(&mut ctx.svm, &[ix], &intruder, &[&intruder]);
    assert_eq!(
        custom_error(result),
        u32::from(anchor_lang::error::ErrorCode::AccountNotInitialized)
    );

    let ix = add_to_whitelist_ix(&intruder.pubkey(), &ctx.config, &intruder.pubkey());
    let result = send(&mut ctx.svm, &[ix], &intruder, &[&intruder]);
    assert_eq!(custom_error(result), u32::from(WhitelistError::Unauthorized));

    assert!(ctx
        .svm
        .get_account(&whitelisted_user_pda(&intruder.pubkey()))
        .is_none());
}

#[test]
pub fn test_transfer_rejected_for_non_whitelisted_owner() {
    let mut ctx = HookTestContext::new();
    let before = ctx.balances();

    let result = ctx.execute_transfer(1_000);

    assert_eq!(custom_error(result), u32::from(WhitelistError::NotWhitelisted));
    assert_eq!(ctx.balances(), before);
    assert_eq!(before, (MINTED, 0));
}

#[test]
pub fn test_whitelisted_transfer_moves_exact_amount() {
    let mut ctx = HookTestContext::new();
    let sender = ctx.sender.pubkey();
    ctx.execute_add(&sender).unwrap();

    let tx = ctx.execute_transfer(250_000).unwrap();
    msg!("CUs Consumed: {}", tx.compute_units_consumed);

    assert_eq!(ctx.balances(), (MINTED - 250_000, 250_000));
}

#[test]
pub fn test_add_remove_re_add_cycle() {
    let mut ctx = HookTestContext::new();
    let sender = ctx.sender.pubkey();

    ctx.execute_add(&sender).unwrap();
    ctx.execute_transfer(100).unwrap();
    assert_eq!(ctx.balances(), (MINTED - 100, 100));

    ctx.execute_remove(&sender).unwrap();
    assert!(ctx.svm.get_account(&whitelisted_user_pda(&sender)).is_none());

    let result = ctx.execute_transfer(100);
    assert_eq!(custom_error(result), u32::from(WhitelistError::NotWhitelisted));
    assert_eq!(ctx.balances(), (MINTED - 100, 100));

    ctx.execute_add(&sender).unwrap();
    ctx.execute_transfer(100).unwrap();
    assert_eq!(ctx.balances(), (MINTED - 200, 200));
}

#[test]
pub fn test_adding_twice_fails() {
    let mut ctx = HookTestContext::new();
    let sender = ctx.sender.pubkey();

    ctx.execute_add(&sender).unwrap();
    assert!(ctx.execute_add(&sender).is_err());
}

#[test]
pub fn test_non_admin_cannot_remove() {
    let mut ctx = HookTestContext::new();
    let sender = ctx.sender.pubkey();
    ctx.execute_add(&sender).unwrap();

    let intruder = funded_keypair(&mut ctx.svm);
    let ix = Instruction {
        program_id: PROGRAM_ID,
        accounts: crate::accounts::RemoveFromWhitelist {
            admin: intruder.pubkey(),
            config: ctx.config,
            whitelisted_user: whitelisted_user_pda(&sender),
        }
        .to_account_metas(None),
        data: crate::instruction::RemoveFromWhitelist { user: sender }.data(),
    };
    let result = send(&mut ctx.svm, &[ix], &intruder, &[&intruder]);

    assert_eq!(custom_error(result), u32::from(WhitelistError::Unauthorized));
    assert!(ctx.svm.get_account(&whitelisted_user_pda(&sender)).is_some());
}

#[test]
pub fn test_direct_execute_call_rejected() {
    let mut ctx = HookTestContext::new();
    let sender = ctx.sender.insecure_clone();
    ctx.execute_add(&sender.pubkey()).unwrap();

    let ix = Instruction {
        program_id: PROGRAM_ID,
        accounts: crate::accounts::TransferHook {
            source_token: ctx.sender_ata,
            mint: ctx.mint,
            destination_token: ctx.receiver_ata,
            owner: sender.pubkey(),
            extra_account_meta_list: extra_account_meta_list_pda(&ctx.mint),
            whitelisted_user: whitelisted_user_pda(&sender.pubkey()),
        }
        .to_account_metas(None),
        data: crate::instruction::TransferHook { amount: 1 }.data(),
    };
    let result = send(&mut ctx.svm, &[ix], &sender, &[&sender]);

    assert_eq!(custom_error(result), u32::from(WhitelistError::NotTransferring));
}

#[test]
pub fn test_expired_entry_blocks_transfers_and_can_be_cranked() {
    let mut ctx = HookTestContext::new();
    let sender = ctx.sender.pubkey();
    ctx.execute_add(&sender).unwrap();

    let expires_at = ctx.now() + 60;
    let admin = ctx.admin.insecure_clone();
    ctx.execute_schedule_expiry(&admin, &sender, expires_at)
        .unwrap();

    // Still live until the timestamp
    ctx.execute_transfer(10).unwrap();
    let cranker = funded_keypair(&mut ctx.svm);
    let result = ctx.execute_expire(&cranker, &sender);
    assert_eq!(custom_error(result), u32::from(WhitelistError::NotExpired));

    ctx.warp_to_timestamp(expires_at);

    let result = ctx.execute_transfer(10);
    assert_eq!(custom_error(result), u32::from(WhitelistError::NotWhitelisted));
    assert_eq!(ctx.balances(), (MINTED - 10, 10));

    let admin_lamports = ctx.svm.get_account(&admin.pubkey()).unwrap().lamports;
    ctx.execute_expire(&cranker, &sender).unwrap();

    assert!(ctx.svm.get_account(&whitelisted_user_pda(&sender)).is_none());
    assert!(ctx.svm.get_account(&admin.pubkey()).unwrap().lamports > admin_lamports);
}

#[test]
pub fn test_entry_without_expiry_cannot_be_cranked() {
    let mut ctx = HookTestContext::new();
    let sender = ctx.sender.pubkey();
    ctx.execute_add(&sender).unwrap();

    let cranker = funded_keypair(&mut ctx.svm);
    let result = ctx.execute_expire(&cranker, &sender);

    assert_eq!(custom_error(result), u32::from(WhitelistError::NotExpired));
    assert!(ctx.svm.get_account(&whitelisted_user_pda(&sender)).is_some());
}

#[test]
pub fn test_non_admin_cannot_schedule_expiry() {
    let mut ctx = HookTestContext::new();
    let sender = ctx.sender.pubkey();
    ctx.execute_add(&sender).unwrap();

    let intruder = funded_keypair(&mut ctx.svm);
    let now = ctx.now();
    let result = ctx.execute_schedule_expiry(&intruder, &sender, now);

    assert_eq!(custom_error(result), u32::from(WhitelistError::Unauthorized));
    ctx.execute_transfer(1).unwrap();
}
