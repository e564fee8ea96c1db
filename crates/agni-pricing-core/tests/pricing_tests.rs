use agni_pricing_core::pricing::eu_zone::EU_ZONE;
use agni_pricing_core::pricing::quote::{
    analyze_quote, compute_quote, IncentiveAmounts, PricingInput, GI_PREMIUM_RATE,
};
use agni_pricing_core::regulatory::matrix::RegulatoryMatrix;
use agni_pricing_core::resource::DataFormat;
use agni_pricing_core::{AgniError, GiStatus, ProductCategory};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Quote identities across a grid of realistic inputs
// ===========================================================================

fn input(base: Decimal, logistics: Decimal, rodtep: Decimal, dbk: Decimal, gst: Decimal) -> PricingInput {
    PricingInput {
        base_cost: base,
        logistics,
        incentive_rates: IncentiveAmounts { rodtep, dbk, gst },
        margin_rate: dec!(0.15),
        gi_status: GiStatus::None,
        destination: "USA".into(),
        product_category: ProductCategory::GeneralGoods,
        cbam_rate: Decimal::ZERO,
    }
}

fn sample_inputs() -> Vec<PricingInput> {
    vec![
        input(dec!(1000), dec!(150), dec!(40), dec!(30), dec!(20)),
        input(dec!(9000), dec!(0), dec!(180), dec!(90), dec!(1620)),
        input(dec!(100), dec!(2000), dec!(0), dec!(0), dec!(0)),
        input(dec!(2500.75), dec!(312.40), dec!(112.53), dec!(37.51), dec!(450.14)),
        input(dec!(100), dec!(0), dec!(500), dec!(0), dec!(0)),
    ]
}

#[test]
fn test_identities_hold_for_all_samples() {
    for mut inp in sample_inputs() {
        for gi in [GiStatus::None, GiStatus::Registered] {
            for (dest, cat) in [
                ("USA", ProductCategory::CarbonIntensive),
                ("Italy", ProductCategory::GeneralGoods),
                ("Italy", ProductCategory::CarbonIntensive),
            ] {
                inp.gi_status = gi;
                inp.destination = dest.into();
                inp.product_category = cat;
                inp.cbam_rate = dec!(0.085);

                let r = compute_quote(&inp).unwrap();
                let inc = &inp.incentive_rates;
                assert_eq!(r.total_incentives, inc.rodtep + inc.dbk + inc.gst);
                assert_eq!(r.net_cost, inp.base_cost + inp.logistics - r.total_incentives);
                assert_eq!(r.margin, r.net_cost * inp.margin_rate);
                assert_eq!(
                    r.final_quote,
                    r.net_cost + r.margin + r.gi_premium + r.carbon_cost
                );

                if gi == GiStatus::Registered {
                    assert_eq!(r.gi_premium, r.net_cost * GI_PREMIUM_RATE);
                } else {
                    assert_eq!(r.gi_premium, Decimal::ZERO);
                }

                let cbam_expected = dest == "Italy" && cat == ProductCategory::CarbonIntensive;
                assert_eq!(!r.carbon_cost.is_zero(), cbam_expected);
            }
        }
    }
}

#[test]
fn test_carbon_cost_for_every_eu_member() {
    for country in EU_ZONE {
        let mut inp = input(dec!(1000), dec!(150), dec!(40), dec!(30), dec!(20));
        inp.destination = country.into();
        inp.product_category = ProductCategory::CarbonIntensive;
        inp.cbam_rate = dec!(0.085);
        let r = compute_quote(&inp).unwrap();
        assert_eq!(r.carbon_cost, dec!(85), "carbon cost for {country}");
    }
}

#[test]
fn test_worked_example_with_matrix_rate() {
    let matrix =
        RegulatoryMatrix::from_text(r#"{"cbam_tax_rate_percent": 0.085}"#, DataFormat::Json)
            .unwrap();

    let mut inp = input(dec!(1000), dec!(150), dec!(40), dec!(30), dec!(20));
    inp.gi_status = GiStatus::Registered;
    inp.destination = "Germany".into();
    inp.product_category = ProductCategory::CarbonIntensive;
    inp.cbam_rate = matrix.cbam_rate().unwrap();

    let r = compute_quote(&inp).unwrap();
    assert_eq!(r.total_incentives, dec!(90));
    assert_eq!(r.net_cost, dec!(1060));
    assert_eq!(r.margin, dec!(159));
    assert_eq!(r.gi_premium, dec!(212));
    assert_eq!(r.carbon_cost, dec!(85));
    assert_eq!(r.final_quote, dec!(1516));
}

#[test]
fn test_repeated_calls_are_identical() {
    for inp in sample_inputs() {
        let a = compute_quote(&inp).unwrap();
        let b = compute_quote(&inp).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_envelope_echoes_input() {
    let inp = input(dec!(1000), dec!(150), dec!(40), dec!(30), dec!(20));
    let out = analyze_quote(&inp).unwrap();
    assert_eq!(out.assumptions["destination"], "USA");
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    assert_eq!(out.result.final_quote, dec!(1219));
}

#[test]
fn test_base_cost_guard() {
    let inp = input(Decimal::ZERO, dec!(150), dec!(0), dec!(0), dec!(0));
    match compute_quote(&inp) {
        Err(AgniError::InvalidInput { field, .. }) => assert_eq!(field, "base_cost"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
