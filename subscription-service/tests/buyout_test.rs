//! Early-buyout pricing across tiers, driven through the equity snapshot.

use rust_decimal::Decimal;
use subscription_service::models::Tier;
use subscription_service::services::EquityCalculator;

fn calc() -> EquityCalculator {
    EquityCalculator::new(Decimal::new(6, 3))
}

#[test]
fn buyout_uses_caller_supplied_tier_discount() {
    let calc = calc();
    let snapshot = calc
        .compute_equity(Decimal::from(20_000), Decimal::from(7_000))
        .unwrap();
    assert_eq!(snapshot.remaining_balance, Decimal::from(13_000));

    let cases = [
        (Tier::Standard, Decimal::from(9_750)),
        (Tier::Premium, Decimal::from(9_750)),
        (Tier::Military, Decimal::from(9_100)),
        (Tier::PremiumPlus, Decimal::from(9_100)),
        (Tier::Lifetime, Decimal::from(6_500)),
    ];

    for (tier, expected) in cases {
        let buyout = calc
            .compute_early_buyout(snapshot.remaining_balance, tier.buyout_discount_rate())
            .unwrap();
        assert_eq!(buyout, expected, "wrong buyout for {}", tier.as_str());
    }
}

#[test]
fn fully_paid_contract_has_zero_buyout() {
    let calc = calc();
    let snapshot = calc
        .compute_equity(Decimal::from(15_000), Decimal::from(15_000))
        .unwrap();
    assert_eq!(snapshot.ownership_percent, Decimal::from(100));

    let buyout = calc
        .compute_early_buyout(
            snapshot.remaining_balance,
            Tier::Standard.buyout_discount_rate(),
        )
        .unwrap();
    assert_eq!(buyout, Decimal::ZERO);
}
