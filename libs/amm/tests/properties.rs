//! Pool Accounting Property Tests
//!
//! Invariants that must hold for every reachable pool state, independent of
//! the concrete reserves, fee or request sizes.

use cpmm_amm::{
    AmmError, DepositOperation, DepositRequest, FixedPointMath, PoolConfig, ReserveLedger,
    SwapOperation, SwapRequest, WithdrawOperation, WithdrawRequest,
};
use cpmm_types::AssetId;
use proptest::prelude::*;

fn config(fee_bps: u16) -> PoolConfig {
    PoolConfig {
        seed: 7,
        asset_x: AssetId::new([0x11; 32]),
        asset_y: AssetId::new([0x22; 32]),
        fee_bps,
        locked: false,
        authority: None,
    }
}

prop_compose! {
    /// Funded pool with realistic token magnitudes
    fn funded_pool()(
        reserve_x in 1_000u64..1_000_000_000_000,
        reserve_y in 1_000u64..1_000_000_000_000,
        total_shares in 1_000u64..1_000_000_000_000,
    ) -> ReserveLedger {
        ReserveLedger::new(reserve_x, reserve_y, total_shares)
    }
}

prop_compose! {
    fn swap_request()(
        input_is_x in any::<bool>(),
        amount_in in 1u64..10_000_000_000,
    ) -> SwapRequest {
        SwapRequest { input_is_x, amount_in, min_out: 0 }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_swap_never_decreases_product(
        reserves in funded_pool(),
        request in swap_request(),
        fee_bps in 1u16..=10_000,
    ) {
        match SwapOperation::execute(&config(fee_bps), &reserves, &request) {
            Ok(t) => {
                prop_assert!(t.reserves.product() >= reserves.product());
                prop_assert_eq!(t.reserves.total_shares, reserves.total_shares);
                prop_assert!(t.receipt.fee_amount <= t.receipt.amount_in);
            }
            Err(e) => prop_assert_eq!(e, AmmError::InvalidAmount {
                reason: "swap input too small to produce any output",
            }),
        }
    }

    #[test]
    fn prop_feeless_swap_keeps_product_within_one_unit(
        reserves in funded_pool(),
        request in swap_request(),
    ) {
        if let Ok((receipt, next)) = SwapOperation::execute(&config(0), &reserves, &request)
            .map(|t| (t.receipt, t.reserves))
        {
            let (reserve_in, reserve_out) = next.oriented(receipt.direction);
            prop_assert!(next.product() >= reserves.product());
            // One more unit of output would have broken the curve
            let one_more = FixedPointMath::product(reserve_in, reserve_out - 1);
            prop_assert!(one_more < reserves.product());
        }
    }

    #[test]
    fn prop_output_bounded_by_reserve(
        reserves in funded_pool(),
        request in swap_request(),
        fee_bps in 0u16..=1_000,
    ) {
        if let Ok(t) = SwapOperation::execute(&config(fee_bps), &reserves, &request) {
            let (_, reserve_out) = reserves.oriented(request.direction());
            prop_assert!(t.receipt.amount_out < reserve_out);
            prop_assert!(t.reserves.validate().is_ok());
        }
    }

    #[test]
    fn prop_zero_amounts_rejected(reserves in funded_pool(), bound in any::<u64>()) {
        let cfg = config(30);

        let deposit = DepositOperation::execute(
            &cfg,
            &reserves,
            &DepositRequest { shares: 0, max_x: bound, max_y: bound },
        );
        prop_assert!(
            matches!(deposit, Err(AmmError::InvalidAmount { .. })),
            "unexpected {:?}",
            deposit
        );

        let swap = SwapOperation::execute(
            &cfg,
            &reserves,
            &SwapRequest { input_is_x: bound % 2 == 0, amount_in: 0, min_out: 0 },
        );
        prop_assert!(
            matches!(swap, Err(AmmError::InvalidAmount { .. })),
            "unexpected {:?}",
            swap
        );

        let withdraw = WithdrawOperation::execute(
            &cfg,
            &reserves,
            &WithdrawRequest { shares: 0, min_x: 0, min_y: 0 },
        );
        prop_assert!(
            matches!(withdraw, Err(AmmError::InvalidAmount { .. })),
            "unexpected {:?}",
            withdraw
        );
    }

    #[test]
    fn prop_deposit_then_withdraw_returns_at_most_contribution(
        reserves in funded_pool(),
        shares in 1u64..1_000_000_000,
    ) {
        let cfg = config(30);
        let deposit = DepositOperation::execute(
            &cfg,
            &reserves,
            &DepositRequest { shares, max_x: u64::MAX, max_y: u64::MAX },
        );

        if let Ok(d) = deposit {
            let w = WithdrawOperation::execute(
                &cfg,
                &d.reserves,
                &WithdrawRequest { shares, min_x: 0, min_y: 0 },
            )
            .unwrap();

            prop_assert!(w.receipt.amount_x <= d.receipt.amount_x);
            prop_assert!(w.receipt.amount_y <= d.receipt.amount_y);
            prop_assert!(w.reserves.reserve_x >= reserves.reserve_x);
            prop_assert!(w.reserves.reserve_y >= reserves.reserve_y);
            prop_assert_eq!(w.reserves.total_shares, reserves.total_shares);
        }
    }

    #[test]
    fn prop_first_deposit_is_exact(
        shares in 1u64..u64::MAX,
        max_x in 1u64..u64::MAX,
        max_y in 1u64..u64::MAX,
    ) {
        let t = DepositOperation::execute(
            &config(30),
            &ReserveLedger::EMPTY,
            &DepositRequest { shares, max_x, max_y },
        )
        .unwrap();

        prop_assert_eq!(t.reserves, ReserveLedger::new(max_x, max_y, shares));
    }

    #[test]
    fn prop_capped_deposit_fails_cleanly(
        reserves in funded_pool(),
        shares in 1u64..1_000_000_000,
    ) {
        let cfg = config(30);
        let required_x = FixedPointMath::proportional(
            shares,
            reserves.reserve_x,
            reserves.total_shares,
        )
        .unwrap();
        prop_assume!(required_x > 0);

        let result = DepositOperation::execute(
            &cfg,
            &reserves,
            &DepositRequest { shares, max_x: required_x - 1, max_y: u64::MAX },
        );

        // Either the Y side rounds to zero first or X breaches its cap
        match result {
            Err(AmmError::SlippageExceeded { computed, bound }) => {
                prop_assert_eq!(computed, required_x);
                prop_assert_eq!(bound, required_x - 1);
            }
            Err(AmmError::InvalidAmount { .. }) => {}
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn prop_full_withdraw_empties_pool(reserves in funded_pool()) {
        let t = WithdrawOperation::execute(
            &config(30),
            &reserves,
            &WithdrawRequest { shares: reserves.total_shares, min_x: 0, min_y: 0 },
        )
        .unwrap();

        prop_assert_eq!(t.reserves, ReserveLedger::EMPTY);
        prop_assert_eq!(t.receipt.amount_x, reserves.reserve_x);
        prop_assert_eq!(t.receipt.amount_y, reserves.reserve_y);
    }
}
