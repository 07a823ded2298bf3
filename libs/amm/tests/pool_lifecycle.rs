//! End-to-end pool lifecycle through the executor and in-memory ledger

use cpmm_amm::{
    AmmError, DepositRequest, InMemoryLedger, InitializeRequest, Ledger, PoolExecutor,
    ReserveLedger, SwapRequest, WithdrawRequest,
};
use cpmm_types::{AccountId, AssetId, PoolId};

const USDC_UNIT: u64 = 1_000_000;
const SOL_UNIT: u64 = 1_000_000_000;

const USDC: AssetId = AssetId::new([0x01; 32]);
const SOL: AssetId = AssetId::new([0x02; 32]);

const ADMIN: AccountId = AccountId::new([0xad; 32]);
const ALICE: AccountId = AccountId::new([0xa1; 32]);
const BOB: AccountId = AccountId::new([0xb0; 32]);
const TRADER: AccountId = AccountId::new([0x7e; 32]);

struct Harness {
    executor: PoolExecutor<InMemoryLedger>,
    pool: PoolId,
}

impl Harness {
    fn new(fee_bps: u16) -> Self {
        let mut ledger = InMemoryLedger::new();
        for account in [ALICE, BOB, TRADER] {
            ledger.credit(USDC, account, 1_000 * USDC_UNIT).unwrap();
            ledger.credit(SOL, account, 1_000 * SOL_UNIT).unwrap();
        }

        let mut executor = PoolExecutor::new(ledger);
        let pool = executor
            .initialize(
                &ADMIN,
                &InitializeRequest {
                    seed: 42,
                    asset_x: USDC,
                    asset_y: SOL,
                    fee_bps,
                    authority: Some(ADMIN),
                },
            )
            .unwrap();

        Self { executor, pool }
    }

    fn reserves(&self) -> ReserveLedger {
        self.executor.pool(&self.pool).unwrap().reserves
    }

    fn balance(&self, asset: AssetId, account: AccountId) -> u64 {
        self.executor.ledger().balance(&asset, &account)
    }

    fn shares(&self, account: AccountId) -> u64 {
        let mint = self.executor.pool(&self.pool).unwrap().config.share_mint();
        self.executor.ledger().share_balance(&mint, &account)
    }

    /// The vault must always hold exactly the recorded reserves
    fn assert_vault_matches(&self) {
        let vault = self.pool.vault_account();
        let reserves = self.reserves();
        assert_eq!(self.balance(USDC, vault), reserves.reserve_x);
        assert_eq!(self.balance(SOL, vault), reserves.reserve_y);

        let mint = self.executor.pool(&self.pool).unwrap().config.share_mint();
        assert_eq!(
            self.executor.ledger().share_supply(&mint),
            Some(reserves.total_shares)
        );
    }
}

#[test]
fn test_first_and_second_deposit() {
    let mut h = Harness::new(300);

    let first = h
        .executor
        .deposit(
            &h.pool,
            &ALICE,
            &DepositRequest {
                shares: 1000 * USDC_UNIT,
                max_x: 100 * USDC_UNIT,
                max_y: 200 * SOL_UNIT,
            },
        )
        .unwrap();
    assert!(first.initial);
    assert_eq!(
        h.reserves(),
        ReserveLedger::new(100 * USDC_UNIT, 200 * SOL_UNIT, 1000 * USDC_UNIT)
    );

    let second = h
        .executor
        .deposit(
            &h.pool,
            &BOB,
            &DepositRequest {
                shares: 500 * USDC_UNIT,
                max_x: 100 * USDC_UNIT,
                max_y: 200 * SOL_UNIT,
            },
        )
        .unwrap();
    assert!(!second.initial);
    assert_eq!(second.amount_x, 50 * USDC_UNIT);
    assert_eq!(second.amount_y, 100 * SOL_UNIT);
    assert_eq!(h.reserves().total_shares, 1500 * USDC_UNIT);

    assert_eq!(h.shares(ALICE), 1000 * USDC_UNIT);
    assert_eq!(h.shares(BOB), 500 * USDC_UNIT);
    assert_eq!(h.balance(USDC, BOB), 950 * USDC_UNIT);
    h.assert_vault_matches();
}

#[test]
fn test_swap_then_full_exit() {
    let mut h = Harness::new(300);
    h.executor
        .deposit(
            &h.pool,
            &ALICE,
            &DepositRequest {
                shares: 1500 * USDC_UNIT,
                max_x: 150 * USDC_UNIT,
                max_y: 300 * SOL_UNIT,
            },
        )
        .unwrap();

    let before = h.reserves().product();
    let sol_before = h.balance(SOL, TRADER);

    let receipt = h
        .executor
        .swap(
            &h.pool,
            &TRADER,
            &SwapRequest {
                input_is_x: true,
                amount_in: 10 * USDC_UNIT,
                min_out: 1,
            },
        )
        .unwrap();

    assert_eq!(receipt.fee_amount, 300_000);
    assert_eq!(h.balance(SOL, TRADER), sol_before + receipt.amount_out);
    assert!(h.reserves().product() >= before);
    h.assert_vault_matches();

    // Sole provider takes everything, fees included
    let exit = h
        .executor
        .withdraw(
            &h.pool,
            &ALICE,
            &WithdrawRequest {
                shares: 1500 * USDC_UNIT,
                min_x: 0,
                min_y: 0,
            },
        )
        .unwrap();

    assert_eq!(exit.amount_x, 160 * USDC_UNIT);
    assert_eq!(exit.amount_y, 300 * SOL_UNIT - receipt.amount_out);
    assert_eq!(h.reserves(), ReserveLedger::EMPTY);
    assert_eq!(h.shares(ALICE), 0);
    h.assert_vault_matches();
}

#[test]
fn test_round_trip_never_profits() {
    let mut h = Harness::new(30);
    h.executor
        .deposit(
            &h.pool,
            &ALICE,
            &DepositRequest {
                shares: 777_777,
                max_x: 123_456_789,
                max_y: 987_654_321_987,
            },
        )
        .unwrap();

    let usdc_before = h.balance(USDC, BOB);
    let sol_before = h.balance(SOL, BOB);

    let deposit = h
        .executor
        .deposit(
            &h.pool,
            &BOB,
            &DepositRequest {
                shares: 12_345,
                max_x: u64::MAX,
                max_y: u64::MAX,
            },
        )
        .unwrap();
    let withdraw = h
        .executor
        .withdraw(
            &h.pool,
            &BOB,
            &WithdrawRequest {
                shares: 12_345,
                min_x: 0,
                min_y: 0,
            },
        )
        .unwrap();

    assert!(withdraw.amount_x <= deposit.amount_x);
    assert!(withdraw.amount_y <= deposit.amount_y);
    assert!(h.balance(USDC, BOB) <= usdc_before);
    assert!(h.balance(SOL, BOB) <= sol_before);
    h.assert_vault_matches();
}

#[test]
fn test_withdraw_more_than_held() {
    let mut h = Harness::new(30);
    for account in [ALICE, BOB] {
        h.executor
            .deposit(
                &h.pool,
                &account,
                &DepositRequest {
                    shares: 1_000,
                    max_x: 10 * USDC_UNIT,
                    max_y: 10 * SOL_UNIT,
                },
            )
            .unwrap();
    }

    // Pool has 2_000 shares outstanding but Bob only owns half
    let err = h
        .executor
        .withdraw(
            &h.pool,
            &BOB,
            &WithdrawRequest {
                shares: 1_500,
                min_x: 0,
                min_y: 0,
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        AmmError::InsufficientFunds {
            account: BOB,
            required: 1_500,
            available: 1_000,
        }
    );
    assert_eq!(h.reserves().total_shares, 2_000);
}

#[test]
fn test_rejected_deposit_leaves_pool_untouched() {
    let mut h = Harness::new(300);
    h.executor
        .deposit(
            &h.pool,
            &ALICE,
            &DepositRequest {
                shares: 1000 * USDC_UNIT,
                max_x: 100 * USDC_UNIT,
                max_y: 200 * SOL_UNIT,
            },
        )
        .unwrap();
    let snapshot = h.reserves();
    let bob_usdc = h.balance(USDC, BOB);

    let err = h
        .executor
        .deposit(
            &h.pool,
            &BOB,
            &DepositRequest {
                shares: 500 * USDC_UNIT,
                max_x: 49 * USDC_UNIT,
                max_y: 200 * SOL_UNIT,
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        AmmError::SlippageExceeded {
            computed: 50 * USDC_UNIT,
            bound: 49 * USDC_UNIT,
        }
    );
    assert_eq!(h.reserves(), snapshot);
    assert_eq!(h.balance(USDC, BOB), bob_usdc);
    h.assert_vault_matches();
}

#[test]
fn test_lock_and_unlock_cycle() {
    let mut h = Harness::new(30);
    h.executor
        .deposit(
            &h.pool,
            &ALICE,
            &DepositRequest {
                shares: 1_000,
                max_x: 10 * USDC_UNIT,
                max_y: 10 * SOL_UNIT,
            },
        )
        .unwrap();

    assert_eq!(
        h.executor.set_locked(&h.pool, &ALICE, true).unwrap_err(),
        AmmError::Unauthorized { caller: ALICE }
    );

    h.executor.set_locked(&h.pool, &ADMIN, true).unwrap();
    let blocked = h.executor.withdraw(
        &h.pool,
        &ALICE,
        &WithdrawRequest {
            shares: 1_000,
            min_x: 0,
            min_y: 0,
        },
    );
    assert_eq!(blocked.unwrap_err(), AmmError::PoolLocked);

    h.executor.set_locked(&h.pool, &ADMIN, false).unwrap();
    h.executor
        .withdraw(
            &h.pool,
            &ALICE,
            &WithdrawRequest {
                shares: 1_000,
                min_x: 0,
                min_y: 0,
            },
        )
        .unwrap();
    assert_eq!(h.reserves(), ReserveLedger::EMPTY);
}

#[test]
fn test_pools_with_different_seeds_are_independent() {
    let mut h = Harness::new(30);
    let other = h
        .executor
        .initialize(
            &ADMIN,
            &InitializeRequest {
                seed: 43,
                asset_x: USDC,
                asset_y: SOL,
                fee_bps: 100,
                authority: None,
            },
        )
        .unwrap();

    assert_ne!(other, h.pool);
    assert_eq!(h.executor.pool_count(), 2);

    h.executor
        .deposit(
            &other,
            &BOB,
            &DepositRequest {
                shares: 10,
                max_x: 1_000,
                max_y: 2_000,
            },
        )
        .unwrap();

    assert_eq!(h.reserves(), ReserveLedger::EMPTY);
    assert_eq!(
        h.executor.pool(&other).unwrap().reserves,
        ReserveLedger::new(1_000, 2_000, 10)
    );
}

#[test]
fn test_locked_pool_reported_before_share_custody() {
    let mut h = Harness::new(30);
    h.executor
        .deposit(
            &h.pool,
            &ALICE,
            &DepositRequest {
                shares: 1_000,
                max_x: 10 * USDC_UNIT,
                max_y: 10 * SOL_UNIT,
            },
        )
        .unwrap();
    h.executor.set_locked(&h.pool, &ADMIN, true).unwrap();

    // Bob holds no shares at all
    let err = h
        .executor
        .withdraw(
            &h.pool,
            &BOB,
            &WithdrawRequest {
                shares: 1,
                min_x: 0,
                min_y: 0,
            },
        )
        .unwrap_err();

    assert_eq!(err, AmmError::PoolLocked);
}

#[test]
fn test_vault_cannot_act_as_caller() {
    let mut h = Harness::new(30);
    h.executor
        .deposit(
            &h.pool,
            &ALICE,
            &DepositRequest {
                shares: 10 * USDC_UNIT,
                max_x: 10 * USDC_UNIT,
                max_y: 10 * SOL_UNIT,
            },
        )
        .unwrap();
    let vault = h.pool.vault_account();
    let snapshot = h.reserves();

    let err = h
        .executor
        .swap(
            &h.pool,
            &vault,
            &SwapRequest {
                input_is_x: true,
                amount_in: USDC_UNIT,
                min_out: 0,
            },
        )
        .unwrap_err();

    assert_eq!(err, AmmError::Unauthorized { caller: vault });
    assert_eq!(h.reserves(), snapshot);
    h.assert_vault_matches();
}
