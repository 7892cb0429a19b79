use approx::assert_abs_diff_eq;
use epm_solver::{
    ConsumerAreas, CurveAreas, CurveError, CurvePoint, Elasticity, ElasticityCategory, LinearCurve,
    OperatingPoint, curve_point_analytics,
};
use rstest::*;

fn assert_same_point(a: &CurvePoint, b: &CurvePoint) {
    assert_abs_diff_eq!(a.quantity, b.quantity, epsilon = 1e-9);
    assert_abs_diff_eq!(a.price, b.price, epsilon = 1e-9);
    match (a.areas, b.areas) {
        (CurveAreas::Demand(x), CurveAreas::Demand(y)) => {
            assert_abs_diff_eq!(x.gross_surplus, y.gross_surplus, epsilon = 1e-6);
            assert_abs_diff_eq!(x.expenses, y.expenses, epsilon = 1e-6);
            assert_abs_diff_eq!(x.net_surplus, y.net_surplus, epsilon = 1e-6);
        }
        (CurveAreas::Supply(x), CurveAreas::Supply(y)) => {
            assert_abs_diff_eq!(x.revenue, y.revenue, epsilon = 1e-6);
            assert_abs_diff_eq!(x.cost, y.cost, epsilon = 1e-6);
            assert_abs_diff_eq!(x.profit, y.profit, epsilon = 1e-6);
        }
        _ => panic!("curve points are on different sides"),
    }
    match (a.elasticity.elasticity, b.elasticity.elasticity) {
        (Elasticity::Finite(x), Elasticity::Finite(y)) => assert_abs_diff_eq!(x, y, epsilon = 1e-9),
        (x, y) => assert_eq!(x, y),
    }
    assert_eq!(a.elasticity.category, b.elasticity.category);
}

#[rstest]
#[case::demand(LinearCurve::demand(100.0, -2.0).unwrap(), 20.0)]
#[case::steep_demand(LinearCurve::demand(180.0, -7.3).unwrap(), 11.7)]
#[case::supply(LinearCurve::supply(10.0, 2.0).unwrap(), 20.0)]
#[case::shallow_supply(LinearCurve::supply(3.5, 0.1).unwrap(), 64.2)]
fn round_trip_through_price(#[case] curve: LinearCurve, #[case] quantity: f64) {
    let by_quantity = curve_point_analytics(&curve, OperatingPoint::Quantity(quantity)).unwrap();
    let price = curve.intercept() + curve.slope() * quantity;
    let by_price = curve_point_analytics(&curve, OperatingPoint::Price(price)).unwrap();
    let exact = curve_point_analytics(&curve, OperatingPoint::Exact { quantity, price }).unwrap();

    assert_same_point(&by_quantity, &by_price);
    assert_same_point(&by_quantity, &exact);
}

#[rstest]
#[case::at_choke(50.0)]
#[case::past_choke(60.0)]
#[case::far_past_choke(1e6)]
fn demand_past_choke_matches_zero_price(#[case] quantity: f64) {
    let curve = LinearCurve::demand(100.0, -2.0).unwrap();
    let by_quantity = curve_point_analytics(&curve, OperatingPoint::Quantity(quantity)).unwrap();
    let by_price = curve_point_analytics(&curve, OperatingPoint::Price(0.0)).unwrap();

    assert_eq!((by_quantity.quantity, by_quantity.price), (50.0, 0.0));
    assert_same_point(&by_quantity, &by_price);

    let CurveAreas::Demand(areas) = by_quantity.areas else {
        panic!("expected demand areas");
    };
    assert_eq!(areas.gross_surplus, 2500.0);
    assert_eq!(areas.expenses, 0.0);
    assert_eq!(areas.net_surplus_percentage, 100.0);
}

#[test]
fn demand_with_negative_intercept_trades_nothing() {
    let curve = LinearCurve::demand(-10.0, -2.0).unwrap();
    let by_quantity = curve_point_analytics(&curve, OperatingPoint::Quantity(3.0)).unwrap();
    let by_price = curve_point_analytics(&curve, OperatingPoint::Price(0.0)).unwrap();
    assert_eq!((by_quantity.quantity, by_quantity.price), (0.0, 0.0));
    assert_same_point(&by_quantity, &by_price);
}

#[rstest]
#[case::below_zero_price(2.0, -6.0)]
#[case::just_below_zero_price(4.9, -0.2)]
fn supply_with_negative_intercept_rejects_both_ways(#[case] quantity: f64, #[case] price: f64) {
    let curve = LinearCurve::supply(-10.0, 2.0).unwrap();
    assert!(matches!(
        curve_point_analytics(&curve, OperatingPoint::Quantity(quantity)),
        Err(CurveError::Price(_))
    ));
    assert_eq!(
        curve_point_analytics(&curve, OperatingPoint::Price(price)).unwrap_err(),
        CurveError::Price(price)
    );
}

#[rstest]
#[case::at_zero_price(5.0)]
#[case::above_zero_price(10.0)]
fn supply_with_negative_intercept_round_trips(#[case] quantity: f64) {
    let curve = LinearCurve::supply(-10.0, 2.0).unwrap();
    let by_quantity = curve_point_analytics(&curve, OperatingPoint::Quantity(quantity)).unwrap();
    let by_price =
        curve_point_analytics(&curve, OperatingPoint::Price(-10.0 + 2.0 * quantity)).unwrap();
    assert_same_point(&by_quantity, &by_price);
}

#[rstest]
fn demand_net_surplus_identity(
    #[values(10.0, 100.0, 200.0)] intercept: f64,
    #[values(-0.1, -2.0, -10.0)] slope: f64,
    #[values(0.0, 0.1, 7.3, 50.0)] quantity: f64,
) {
    let price = intercept + slope * quantity;
    let areas = ConsumerAreas::new(intercept, slope, price, quantity);
    assert_eq!(areas.gross_surplus - areas.expenses, areas.net_surplus);
}

#[test]
fn consumer_example() {
    let curve = LinearCurve::demand(100.0, -2.0).unwrap();
    let point = curve_point_analytics(&curve, OperatingPoint::Price(50.0)).unwrap();

    assert_eq!(point.quantity, 25.0);
    let CurveAreas::Demand(areas) = point.areas else {
        panic!("expected demand areas");
    };
    assert_eq!(areas.gross_surplus, 1875.0);
    assert_eq!(areas.expenses, 1250.0);
    assert_eq!(areas.net_surplus, 625.0);
    assert_abs_diff_eq!(areas.net_surplus_percentage, 100.0 / 3.0, epsilon = 1e-9);

    assert_eq!(point.elasticity.slope, -2.0);
    assert_eq!(point.elasticity.elasticity, Elasticity::Finite(-1.0));
    assert_eq!(point.elasticity.category, ElasticityCategory::UnitElastic);
}

#[test]
fn producer_example() {
    let curve = LinearCurve::supply(10.0, 2.0).unwrap();
    let point = curve_point_analytics(&curve, OperatingPoint::Quantity(20.0)).unwrap();

    assert_eq!(point.price, 50.0);
    let CurveAreas::Supply(areas) = point.areas else {
        panic!("expected supply areas");
    };
    assert_eq!(areas.revenue, 1000.0);
    assert_eq!(areas.cost, 600.0);
    assert_eq!(areas.profit, 400.0);
    assert_eq!(areas.profit_percentage, 40.0);

    // (50 / 20) / 2
    assert_eq!(point.elasticity.elasticity, Elasticity::Finite(1.25));
    assert_eq!(point.elasticity.category, ElasticityCategory::Elastic);
}

#[test]
fn zero_quantity_is_infinitely_elastic() {
    let curve = LinearCurve::demand(100.0, -2.0).unwrap();
    // a price above the intercept clamps to zero quantity
    let point = curve_point_analytics(&curve, OperatingPoint::Price(150.0)).unwrap();
    assert_eq!(point.quantity, 0.0);
    assert_eq!(point.elasticity.elasticity, Elasticity::Infinite);
    assert_eq!(point.elasticity.category, ElasticityCategory::Elastic);

    let CurveAreas::Demand(areas) = point.areas else {
        panic!("expected demand areas");
    };
    assert_eq!(areas.gross_surplus, 0.0);
    assert_eq!(areas.expenses_percentage, 0.0);
}

#[test]
fn serializes_for_display() {
    let curve = LinearCurve::demand(100.0, -2.0).unwrap();
    let point = curve_point_analytics(&curve, OperatingPoint::Quantity(0.0)).unwrap();
    let value = serde_json::to_value(point).unwrap();

    assert_eq!(value["elasticity"]["elasticity"], "infinite");
    assert_eq!(value["elasticity"]["category"], "Elastic");
    assert_eq!(value["areas"]["demand"]["net_surplus"], 0.0);
}
