use medcalc_core::models::severity::SeverityTier;
use medcalc_formulas::calculators::gcs::NOT_TESTABLE;
use medcalc_formulas::error::FormulaError;
use medcalc_formulas::get_calculator;
use medcalc_formulas::input::{CalculatorInput, InputOption, ValueBag};
use medcalc_formulas::presentation::{present, present_checked, schema_breakdown, short_label};
use medcalc_formulas::result::CkdStage;

#[test]
fn score_text_variants() {
    let gcs = get_calculator("gcs").unwrap();

    let computed = present(gcs, &gcs.default_values());
    assert_eq!(computed.score_text, "15");
    assert_eq!(computed.score, Some(15.0));

    let nt = ValueBag::new()
        .with("eye", 4.0)
        .with("verbal", NOT_TESTABLE)
        .with("motor", 6.0);
    let shown = present(gcs, &nt);
    assert_eq!(shown.score_text, "NT");
    assert_eq!(shown.score, None);
    assert_eq!(shown.severity, SeverityTier::Unknown);

    let awaiting = present(gcs, &ValueBag::new());
    assert_eq!(awaiting.score_text, "—");
    assert_eq!(awaiting.interpretation, "Chờ nhập liệu");
}

#[test]
fn fractional_scores_render_without_trailing_zeros() {
    let bmi = get_calculator("bmi").unwrap();
    let shown = present(bmi, &bmi.default_values());
    assert_eq!(shown.score_text, "24.2");
}

#[test]
fn chads2vasc_breakdown_uses_per_field_maxima() {
    let chads = get_calculator("chads2vasc").unwrap();
    let values = ValueBag::new().with("stroke", 1.0).with("age", 2.0);
    let shown = present(chads, &values);

    assert_eq!(shown.max_total, 9.0);
    let stroke = shown.breakdown.iter().find(|b| b.input_id == "stroke").unwrap();
    assert_eq!(stroke.points, 2.0);
    assert_eq!(stroke.max_points, 2.0);
    assert_eq!(stroke.fraction(), 1.0);
}

#[test]
fn gcs_schema_breakdown_counts_nt_as_zero() {
    let gcs = get_calculator("gcs").unwrap();
    let values = ValueBag::new()
        .with("eye", NOT_TESTABLE)
        .with("verbal", 5.0)
        .with("motor", 6.0);
    let breakdown = gcs.point_breakdown(&values);
    let maxima: Vec<f64> = breakdown.iter().map(|b| b.max_points).collect();
    assert_eq!(maxima, vec![4.0, 5.0, 6.0]);
    assert_eq!(breakdown[0].points, 0.0);
    assert_eq!(breakdown[0].label, "Mở mắt");
}

#[test]
fn ckd_stage_bar_highlights_active_segment() {
    let ckd = get_calculator("ckd-epi").unwrap();
    let shown = present(ckd, &ckd.default_values());

    assert_eq!(shown.stage, Some(CkdStage::G2));
    assert_eq!(shown.stage_bar.len(), 6);
    let active: Vec<_> = shown.stage_bar.iter().filter(|s| s.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].stage, CkdStage::G2);
    assert_eq!(shown.stage_bar[0].range_label, "G1 (≥90)");
    assert!(shown.breakdown.is_empty());
}

#[test]
fn non_ckd_results_have_no_stage_bar() {
    let sofa = get_calculator("sofa").unwrap();
    assert!(present(sofa, &sofa.default_values()).stage_bar.is_empty());
}

#[test]
fn schema_breakdown_skips_uncapped_numbers() {
    let inputs = vec![
        CalculatorInput::numeric("na", "Natri", Some(140.0)),
        CalculatorInput::numeric("score", "Điểm (tổng)", None).with_ceiling(10.0),
        CalculatorInput::enumerated(
            "grade",
            "Mức độ",
            vec![InputOption::new("nhẹ", 0.0), InputOption::new("nặng", 3.0)],
        ),
    ];
    let values = ValueBag::new().with("na", 140.0).with("score", 4.0).with("grade", 3.0);
    let breakdown = schema_breakdown(&inputs, &values);

    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].label, "Điểm");
    assert_eq!(breakdown[0].fraction(), 0.4);
    assert_eq!(breakdown[1].max_points, 3.0);
}

#[test]
fn short_label_trims_parenthetical() {
    assert_eq!(short_label("Mở mắt (Eye)"), "Mở mắt");
    assert_eq!(short_label("Tiểu đường"), "Tiểu đường");
}

#[test]
fn option_delta_text() {
    assert_eq!(InputOption::new("Có", 1.0).delta_text(), "+1");
    assert_eq!(InputOption::new("Không", 0.0).delta_text(), "0");
    assert_eq!(InputOption::new("Có", 1.0).with_delta("+2").delta_text(), "+2");

    let gcs = get_calculator("gcs").unwrap();
    let nt = gcs.inputs()[0].option_for(NOT_TESTABLE).unwrap();
    assert_eq!(nt.delta_text(), "NT");
}

#[test]
fn boolean_fields_offer_yes_no() {
    let choices = CalculatorInput::boolean("chf", "Suy tim").choices();
    let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Không", "Có"]);
}

#[test]
fn text_entry_accepts_decimal_comma() {
    let mut values = ValueBag::new();
    values.set_text("creatinine", " 1,2 ");
    assert_eq!(values.get("creatinine"), Some(1.2));

    values.set_text("creatinine", "");
    assert_eq!(values.get("creatinine"), None);
}

#[test]
fn present_checked_rejects_foreign_values() {
    let chads = get_calculator("chads2vasc").unwrap();

    let unknown = ValueBag::new().with("weight", 70.0);
    match present_checked(chads, &unknown) {
        Err(FormulaError::InvalidValues { calculator_id, errors }) => {
            assert_eq!(calculator_id, "chads2vasc");
            assert_eq!(errors[0].input_id, "weight");
        }
        other => panic!("expected InvalidValues, got {other:?}"),
    }

    let bad_option = ValueBag::new().with("age", 7.0);
    assert!(present_checked(chads, &bad_option).is_err());

    assert!(present_checked(chads, &chads.default_values()).is_ok());
}

#[test]
fn display_result_serializes_for_the_frontend() {
    let gcs = get_calculator("gcs").unwrap();
    let shown = present(gcs, &gcs.default_values());
    let json = serde_json::to_value(&shown).unwrap();
    assert_eq!(json["score_text"], "15");
    assert_eq!(json["severity"], "low");
    assert_eq!(json["calculator_id"], "gcs");

    let bag: ValueBag = serde_json::from_str(r#"{"eye": 4, "verbal": 5}"#).unwrap();
    assert_eq!(bag.get("verbal"), Some(5.0));
}
