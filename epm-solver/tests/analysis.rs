use approx::assert_abs_diff_eq;
use epm_solver::{
    AnalysisPoint, Change, DemandStack, SupplyStack, Welfare, WelfareChange, analyze_at_price,
    analyze_at_quantity, build_bid_stack, clear_market,
};
use rstest::*;

#[fixture]
fn supply() -> SupplyStack {
    build_bid_stack([(5.0, 10.0), (5.0, 20.0)]).unwrap()
}

#[fixture]
fn demand() -> DemandStack {
    build_bid_stack([(5.0, 30.0), (5.0, 15.0)]).unwrap()
}

#[rstest]
#[case::demand_is_short(25.0, 5.0, (25.0, 75.0))]
#[case::supply_is_short(12.0, 5.0, (90.0, 10.0))]
#[case::nobody_sells(5.0, 0.0, (0.0, 0.0))]
#[case::nobody_buys(35.0, 0.0, (0.0, 0.0))]
fn forced_price(
    supply: SupplyStack,
    demand: DemandStack,
    #[case] price: f64,
    #[case] quantity: f64,
    #[case] surplus: (f64, f64),
) {
    assert_eq!(
        analyze_at_price(&supply, &demand, price),
        AnalysisPoint {
            price,
            quantity,
            welfare: Welfare::new(surplus.0, surplus.1),
        }
    );
}

#[rstest]
#[case::inside_both_stacks(7.0, 20.0, (50.0, 50.0))]
#[case::on_a_boundary(5.0, 10.0, (100.0, 0.0))]
#[case::past_both_stacks(12.0, 0.0, (225.0, 0.0))]
fn forced_quantity(
    supply: SupplyStack,
    demand: DemandStack,
    #[case] quantity: f64,
    #[case] price: f64,
    #[case] surplus: (f64, f64),
) {
    assert_eq!(
        analyze_at_quantity(&supply, &demand, quantity),
        AnalysisPoint {
            price,
            quantity,
            welfare: Welfare::new(surplus.0, surplus.1),
        }
    );
}

#[test]
fn falls_back_to_demand_price() {
    let supply: SupplyStack = build_bid_stack([(5.0, 10.0)]).unwrap();
    let demand: DemandStack = build_bid_stack([(10.0, 40.0)]).unwrap();

    let point = analyze_at_quantity(&supply, &demand, 7.0);
    assert_eq!(point.price, 40.0);
    assert_eq!(point.welfare, Welfare::new(0.0, 150.0));
}

#[rstest]
fn equilibrium_is_at_least_as_good(
    supply: SupplyStack,
    demand: DemandStack,
    #[values(10.0, 12.0, 15.0, 20.0, 25.0, 30.0)] price: f64,
) {
    let outcome = clear_market(&supply, &demand);
    let forced = analyze_at_price(&supply, &demand, price);
    assert!(outcome.welfare.total_welfare() >= forced.welfare.total_welfare());
}

fn assert_change(change: Change, absolute: f64, percentage: f64) {
    assert_abs_diff_eq!(change.absolute, absolute, epsilon = 1e-9);
    assert_abs_diff_eq!(change.percentage, percentage, epsilon = 1e-9);
}

#[test]
fn welfare_lost_below_equilibrium() {
    let supply: SupplyStack = build_bid_stack([
        (3.0, 12.0),
        (4.0, 25.0),
        (5.0, 38.0),
        (2.0, 55.0),
        (6.0, 70.0),
    ])
    .unwrap();
    let demand: DemandStack = build_bid_stack([
        (2.0, 95.0),
        (5.0, 80.0),
        (4.0, 60.0),
        (3.0, 42.0),
        (6.0, 30.0),
    ])
    .unwrap();

    let outcome = clear_market(&supply, &demand);
    assert_eq!(outcome.welfare, Welfare::new(368.0, 178.0));

    // at 30 only the two cheapest offers sell
    let point = analyze_at_price(&supply, &demand, 30.0);
    assert_eq!(point.quantity, 7.0);
    assert_eq!(point.welfare, Welfare::new(380.0, 74.0));

    let change = outcome.compare(&point);
    assert_change(change.consumer_surplus, 12.0, 1200.0 / 368.0);
    assert_change(change.producer_surplus, -104.0, -10400.0 / 178.0);
    assert_change(change.total_welfare, -92.0, -9200.0 / 546.0);

    // forcing the clearing price changes nothing
    let point = analyze_at_price(&supply, &demand, outcome.equilibrium.price);
    assert_eq!(outcome.compare(&point), WelfareChange::default());
}

#[rstest]
fn producer_gain_over_empty_baseline(supply: SupplyStack, demand: DemandStack) {
    // the equilibrium leaves producers nothing, so their gain has no percentage
    let outcome = clear_market(&supply, &demand);
    let change = outcome.compare(&analyze_at_price(&supply, &demand, 12.0));
    assert_change(change.consumer_surplus, -10.0, -10.0);
    assert_change(change.producer_surplus, 10.0, 0.0);
    assert_change(change.total_welfare, 0.0, 0.0);
}
