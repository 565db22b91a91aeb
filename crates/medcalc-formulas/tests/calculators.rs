use medcalc_core::models::severity::SeverityTier;
use medcalc_formulas::calculators::ckd_epi::{CkdEquation, EgfrInputs, egfr};
use medcalc_formulas::calculators::cockcroft_gault::{WeightBasis, clearances};
use medcalc_formulas::calculators::gcs::NOT_TESTABLE;
use medcalc_formulas::calculators::leibovich::MAX_SCORE;
use medcalc_formulas::input::{InputKind, ValueBag};
use medcalc_formulas::presentation::{DisplayResult, present_checked};
use medcalc_formulas::result::{CkdStage, GcsComponents, Score};
use medcalc_formulas::{Calculator, get_calculator};

fn calc(id: &str) -> &'static dyn Calculator {
    get_calculator(id).unwrap()
}

fn bag(pairs: &[(&str, f64)]) -> ValueBag {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

// CHA₂DS₂-VASc

#[test]
fn chads2vasc_stroke_always_adds_two() {
    let c = calc("chads2vasc");
    let without = c.evaluate(&bag(&[("sex", 0.0)]));
    let with = c.evaluate(&bag(&[("sex", 0.0), ("stroke", 1.0)]));
    assert_eq!(without.score.value(), Some(0.0));
    assert_eq!(with.score.value(), Some(2.0));

    // A pre-multiplied selector value still counts as 2.
    let doubled = c.evaluate(&bag(&[("stroke", 2.0)]));
    assert_eq!(doubled.score.value(), Some(2.0));
}

#[test]
fn chads2vasc_maximum_is_nine() {
    let c = calc("chads2vasc");
    let all = bag(&[
        ("age", 2.0),
        ("sex", 1.0),
        ("chf", 1.0),
        ("htn", 1.0),
        ("stroke", 1.0),
        ("vascular", 1.0),
        ("diabetes", 1.0),
    ]);
    let result = c.evaluate(&all);
    assert_eq!(result.score.value(), Some(9.0));
    assert_eq!(result.severity, SeverityTier::High);
    assert!(result.details.unwrap().contains("12.2%"));
}

#[test]
fn chads2vasc_sex_dependent_tie_breaks() {
    let c = calc("chads2vasc");

    let male_zero = c.evaluate(&bag(&[("sex", 0.0)]));
    assert_eq!(male_zero.severity, SeverityTier::Low);
    assert_eq!(male_zero.interpretation, "Nguy cơ thấp (Nam 0)");

    let female_one = c.evaluate(&bag(&[("sex", 1.0)]));
    assert_eq!(female_one.score.value(), Some(1.0));
    assert_eq!(female_one.severity, SeverityTier::Low);

    let male_one = c.evaluate(&bag(&[("sex", 0.0), ("htn", 1.0)]));
    assert_eq!(male_one.severity, SeverityTier::Moderate);

    let male_two = c.evaluate(&bag(&[("sex", 0.0), ("htn", 1.0), ("diabetes", 1.0)]));
    assert_eq!(male_two.severity, SeverityTier::High);
}

#[test]
fn chads2vasc_reports_annual_risk_figures() {
    let result = calc("chads2vasc").evaluate(&bag(&[("age", 1.0), ("htn", 1.0)]));
    assert_eq!(result.score.value(), Some(2.0));
    assert!(result.details.as_deref().unwrap().contains("2.2%/năm"));
    assert_eq!(result.figures.len(), 2);
    assert_eq!(result.figures[1].value, "2.9%");
}

// GCS

#[test]
fn gcs_not_testable_component_withholds_total() {
    let result = calc("gcs").evaluate(&bag(&[
        ("eye", NOT_TESTABLE),
        ("verbal", 5.0),
        ("motor", 6.0),
    ]));
    assert_eq!(result.score.value(), None);
    assert_eq!(
        result.score,
        Score::NotTestable {
            components: GcsComponents {
                eye: None,
                verbal: Some(5),
                motor: Some(6),
            }
        }
    );
    assert_eq!(result.score.label(), "NT");
    assert_eq!(result.severity, SeverityTier::Unknown);
    assert!(result.details.unwrap().contains("ENT V5 M6"));
}

#[test]
fn gcs_sums_testable_components() {
    let c = calc("gcs");

    let best = c.evaluate(&bag(&[("eye", 4.0), ("verbal", 5.0), ("motor", 6.0)]));
    assert_eq!(best.score.value(), Some(15.0));
    assert_eq!(best.severity, SeverityTier::Low);
    assert_eq!(best.interpretation, "Chấn thương sọ não Nhẹ");

    let worst = c.evaluate(&bag(&[("eye", 1.0), ("verbal", 1.0), ("motor", 1.0)]));
    assert_eq!(worst.score.value(), Some(3.0));
    assert_eq!(worst.severity, SeverityTier::High);
    assert!(worst.interpretation.contains("Nặng"));

    let moderate = c.evaluate(&bag(&[("eye", 3.0), ("verbal", 3.0), ("motor", 4.0)]));
    assert_eq!(moderate.score.value(), Some(10.0));
    assert_eq!(moderate.severity, SeverityTier::Moderate);
}

#[test]
fn gcs_missing_component_awaits_input() {
    let result = calc("gcs").evaluate(&bag(&[("eye", 4.0), ("verbal", 9.0)]));
    assert_eq!(
        result.score,
        Score::AwaitingInput {
            missing: vec!["verbal".to_string(), "motor".to_string()],
        }
    );
}

#[test]
fn gcs_defaults_are_fully_testable() {
    let c = calc("gcs");
    let result = c.evaluate(&c.default_values());
    assert_eq!(result.score.value(), Some(15.0));
}

// SOFA

#[test]
fn sofa_caps_respiratory_without_ventilation() {
    let c = calc("sofa");
    let organs = [
        ("pf_ratio", 4.0),
        ("coagulation", 0.0),
        ("liver", 0.0),
        ("cardio", 0.0),
        ("cns", 0.0),
        ("renal", 0.0),
    ];

    let unsupported = c.evaluate(&bag(&organs));
    assert_eq!(unsupported.score.value(), Some(2.0));
    let breakdown = c.point_breakdown(&bag(&organs));
    assert_eq!(breakdown[0].points, 2.0);

    let mut ventilated = bag(&organs);
    ventilated.set("is_ventilated", 1.0);
    assert_eq!(c.evaluate(&ventilated).score.value(), Some(4.0));
}

#[test]
fn sofa_bands_by_total() {
    let c = calc("sofa");
    let all = |n: f64| {
        bag(&[
            ("pf_ratio", n),
            ("is_ventilated", 1.0),
            ("coagulation", n),
            ("liver", n),
            ("cardio", n),
            ("cns", n),
            ("renal", n),
        ])
    };
    assert_eq!(c.evaluate(&all(0.0)).severity, SeverityTier::Low);
    assert_eq!(c.evaluate(&all(1.0)).severity, SeverityTier::Moderate);
    assert_eq!(c.evaluate(&all(2.0)).severity, SeverityTier::High);
    let worst = c.evaluate(&all(4.0));
    assert_eq!(worst.score.value(), Some(24.0));
    assert_eq!(worst.severity, SeverityTier::Critical);
}

#[test]
fn sofa_breakdown_max_is_per_organ() {
    let c = calc("sofa");
    let breakdown = c.point_breakdown(&c.default_values());
    assert_eq!(breakdown.len(), 6);
    assert!(breakdown.iter().all(|b| b.max_points == 4.0));
}

// BMI

#[test]
fn bmi_normal_adult() {
    let result = calc("bmi").evaluate(&bag(&[("weight", 70.0), ("height", 170.0)]));
    let value = result.score.value().unwrap();
    assert!((24.2..=24.3).contains(&value), "bmi {value}");
    assert_eq!(result.interpretation, "Cân nặng bình thường");
    assert_eq!(result.severity, SeverityTier::Low);
    assert_eq!(result.figures[0].value, "1.82");
}

#[test]
fn bmi_degenerate_input_awaits_input() {
    let c = calc("bmi");
    for values in [
        bag(&[("weight", 0.0), ("height", 170.0)]),
        bag(&[("weight", 70.0), ("height", 0.0)]),
        bag(&[("weight", 70.0)]),
    ] {
        let result = c.evaluate(&values);
        assert!(result.is_awaiting_input());
        assert_eq!(result.score.value(), None);
        assert_eq!(result.score.label(), "—");
    }

    let mut text = ValueBag::new();
    text.set_text("weight", "abc").set_text("height", "170");
    assert!(c.evaluate(&text).is_awaiting_input());
}

#[test]
fn bmi_categories_follow_thresholds() {
    let c = calc("bmi");
    let at = |weight: f64| c.evaluate(&bag(&[("weight", weight), ("height", 100.0)]));
    assert_eq!(at(18.0).interpretation, "Nhẹ cân (Underweight)");
    assert_eq!(at(27.0).interpretation, "Tiền béo phì (Overweight)");
    assert_eq!(at(32.0).interpretation, "Béo phì độ I");
    assert_eq!(at(37.0).interpretation, "Béo phì độ II");
    assert_eq!(at(45.0).severity, SeverityTier::Critical);
}

// CKD-EPI

#[test]
fn ckd_epi_2021_creatinine_female_sixty() {
    let result = calc("ckd-epi").evaluate(&bag(&[
        ("equation", CkdEquation::Creatinine2021.code()),
        ("sex", 1.0),
        ("age", 60.0),
        ("creatinine", 80.0),
        ("creatinine_unit", 1.0),
    ]));
    let value = result.score.value().unwrap();
    assert!((60.0..=100.0).contains(&value), "eGFR {value}");
    assert_eq!(result.stage, Some(CkdStage::G2));
    assert_eq!(result.interpretation, "Giai đoạn G2");
    assert_eq!(result.details.as_deref(), Some("Sử dụng: 2021 CKD-EPI Creatinine."));
}

#[test]
fn ckd_epi_combined_equation_requires_cystatin() {
    let result = calc("ckd-epi").evaluate(&bag(&[
        ("equation", CkdEquation::CreatinineCystatin2021.code()),
        ("sex", 1.0),
        ("age", 60.0),
        ("creatinine", 80.0),
    ]));
    assert_eq!(
        result.score,
        Score::AwaitingInput {
            missing: vec!["cystatin".to_string()],
        }
    );

    let zero = calc("ckd-epi").evaluate(&bag(&[
        ("equation", CkdEquation::CreatinineCystatin2021.code()),
        ("sex", 1.0),
        ("age", 60.0),
        ("creatinine", 80.0),
        ("cystatin", 0.0),
    ]));
    assert!(zero.is_awaiting_input());
}

#[test]
fn ckd_epi_cystatin_only_ignores_creatinine() {
    let result = calc("ckd-epi").evaluate(&bag(&[
        ("equation", CkdEquation::Cystatin2012.code()),
        ("sex", 0.0),
        ("age", 50.0),
        ("cystatin", 0.8),
    ]));
    let value = result.score.value().unwrap();
    // 133 × 0.996^50
    assert_eq!(value, (133.0 * 0.996f64.powi(50)).round());
}

#[test]
fn ckd_epi_units_are_equivalent() {
    let umol = EgfrInputs {
        female: false,
        age: 45.0,
        creatinine_mg_dl: Some(106.08 / 88.4),
        cystatin_mg_l: None,
        black: false,
    };
    let mg = EgfrInputs {
        creatinine_mg_dl: Some(1.2),
        ..umol
    };
    let a = egfr(CkdEquation::Creatinine2021, &umol).unwrap();
    let b = egfr(CkdEquation::Creatinine2021, &mg).unwrap();
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn ckd_epi_race_factor_applies_only_to_2009() {
    let base = EgfrInputs {
        female: false,
        age: 50.0,
        creatinine_mg_dl: Some(1.0),
        cystatin_mg_l: None,
        black: false,
    };
    let black = EgfrInputs { black: true, ..base };

    let ratio_2009 = egfr(CkdEquation::Creatinine2009, &black).unwrap()
        / egfr(CkdEquation::Creatinine2009, &base).unwrap();
    assert!((ratio_2009 - 1.159).abs() < 1e-9);

    assert_eq!(
        egfr(CkdEquation::Creatinine2021, &black),
        egfr(CkdEquation::Creatinine2021, &base)
    );
}

#[test]
fn ckd_stage_thresholds() {
    assert_eq!(CkdStage::from_egfr(90.0), CkdStage::G1);
    assert_eq!(CkdStage::from_egfr(89.9), CkdStage::G2);
    assert_eq!(CkdStage::from_egfr(45.0), CkdStage::G3a);
    assert_eq!(CkdStage::from_egfr(44.9), CkdStage::G3b);
    assert_eq!(CkdStage::from_egfr(15.0), CkdStage::G4);
    assert_eq!(CkdStage::from_egfr(14.9), CkdStage::G5);
}

// Cockcroft-Gault

#[test]
fn crcl_overweight_uses_adjusted_weight() {
    // 100 kg, 170 cm: BMI 34.6
    let c = clearances(false, 60.0, 100.0, 1.0, Some(170.0)).unwrap();
    assert_eq!(c.basis, WeightBasis::Adjusted);
    assert_eq!(Some(c.primary), c.adjusted);
    assert_ne!(c.primary, c.actual);

    let result = calc("crcl").evaluate(&bag(&[
        ("sex", 0.0),
        ("age", 60.0),
        ("weight", 100.0),
        ("creatinine", 1.0),
        ("creatinine_unit", 0.0),
        ("height", 170.0),
    ]));
    assert_eq!(result.score.value(), c.adjusted);
}

#[test]
fn crcl_weight_selection_by_bmi() {
    // 60 kg, 170 cm: BMI 20.8
    let normal = clearances(true, 70.0, 60.0, 1.0, Some(170.0)).unwrap();
    assert_eq!(normal.basis, WeightBasis::Ideal);
    assert_eq!(Some(normal.primary), normal.ideal);

    // 45 kg, 170 cm: BMI 15.6
    let under = clearances(true, 70.0, 45.0, 1.0, Some(170.0)).unwrap();
    assert_eq!(under.basis, WeightBasis::Actual);
    assert_eq!(under.primary, under.actual);

    let no_height = clearances(true, 70.0, 80.0, 1.0, None).unwrap();
    assert_eq!(no_height.basis, WeightBasis::Actual);
    assert_eq!(no_height.ideal, None);
}

#[test]
fn crcl_formula_and_female_factor() {
    // (140 − 40) × 72 / (72 × 1.0) = 100
    let male = clearances(false, 40.0, 72.0, 1.0, None).unwrap();
    assert_eq!(male.actual, 100.0);
    let female = clearances(true, 40.0, 72.0, 1.0, None).unwrap();
    assert_eq!(female.actual, 85.0);
}

#[test]
fn crcl_severe_impairment() {
    let c = calc("crcl");
    let result = c.evaluate(&c.default_values());
    // Defaults: female, 80 y, 70 kg, 170 µmol/L, 165 cm.
    assert_eq!(result.interpretation, "Suy thận nặng");
    assert_eq!(result.severity, SeverityTier::High);
    assert!(result.figures.iter().any(|f| f.label == "Dải IBW - hiệu chỉnh"));
    assert_eq!(c.point_breakdown(&c.default_values()).len(), 2);
}

#[test]
fn crcl_missing_creatinine_awaits_input() {
    let result = calc("crcl").evaluate(&bag(&[("sex", 1.0), ("age", 50.0), ("weight", 70.0)]));
    assert_eq!(
        result.score,
        Score::AwaitingInput {
            missing: vec!["creatinine".to_string()],
        }
    );
}

// Leibovich 2018

#[test]
fn leibovich_non_uniform_weights() {
    let c = calc("leibovich-2018");
    let base = bag(&[("rcc_type", 2.0), ("grade", 1.0), ("size", 1.0)]);
    assert_eq!(c.evaluate(&base).score.value(), Some(0.0));

    let nodal = bag(&[("rcc_type", 2.0), ("grade", 1.0), ("size", 1.0), ("nodal", 1.0)]);
    assert_eq!(c.evaluate(&nodal).score.value(), Some(3.0));

    let branch = bag(&[("rcc_type", 2.0), ("thrombus", 1.0)]);
    let ivc = bag(&[("rcc_type", 2.0), ("thrombus", 2.0)]);
    assert_eq!(c.evaluate(&branch).score.value(), Some(1.0));
    assert_eq!(c.evaluate(&ivc).score.value(), Some(2.0));

    let fat = bag(&[("rcc_type", 2.0), ("fat", 1.0)]);
    assert_eq!(c.evaluate(&fat).score.value(), Some(2.0));
}

#[test]
fn leibovich_risk_tiers() {
    let c = calc("leibovich-2018");
    let defaults = c.default_values();
    let low = c.evaluate(&defaults);
    // ccRCC is the first option and scores 2.
    assert_eq!(low.score.value(), Some(2.0));
    assert_eq!(low.interpretation, "Nguy cơ Thấp");

    let moderate = bag(&[("rcc_type", 1.0), ("grade", 3.0), ("age", 1.0)]);
    assert_eq!(c.evaluate(&moderate).severity, SeverityTier::Moderate);

    let high = bag(&[("rcc_type", 1.0), ("grade", 4.0), ("size", 4.0), ("nodal", 1.0)]);
    let result = c.evaluate(&high);
    assert_eq!(result.score.value(), Some(11.0));
    assert_eq!(result.interpretation, "Nguy cơ Cao");
}

#[test]
fn leibovich_breakdown_sums_to_max() {
    let c = calc("leibovich-2018");
    let breakdown = c.point_breakdown(&ValueBag::new());
    assert_eq!(breakdown.len(), 13);
    assert_eq!(breakdown.iter().map(|b| b.max_points).sum::<f64>(), MAX_SCORE);
}

// Catalog calculators

#[test]
fn qsofa_two_criteria_is_high() {
    let c = calc("qsofa");
    assert_eq!(c.evaluate(&bag(&[("rr", 1.0)])).severity, SeverityTier::Low);
    let high = c.evaluate(&bag(&[("rr", 1.0), ("sbp", 1.0)]));
    assert_eq!(high.score.value(), Some(2.0));
    assert_eq!(high.severity, SeverityTier::High);
}

#[test]
fn has_bled_counts_paired_items() {
    let c = calc("has-bled");
    let result = c.evaluate(&bag(&[("a", 2.0), ("e", 1.0)]));
    assert_eq!(result.score.value(), Some(3.0));
    assert_eq!(result.severity, SeverityTier::High);
    assert_eq!(c.evaluate(&ValueBag::new()).score.value(), Some(0.0));
}

#[test]
fn anion_gap_requires_all_electrolytes() {
    let c = calc("anion-gap");
    let normal = c.evaluate(&c.default_values());
    assert_eq!(normal.score.value(), Some(12.0));
    assert_eq!(normal.severity, SeverityTier::Low);

    let high = c.evaluate(&bag(&[("na", 140.0), ("cl", 100.0), ("hco3", 15.0)]));
    assert_eq!(high.score.value(), Some(25.0));
    assert_eq!(high.severity, SeverityTier::Moderate);

    assert!(c.evaluate(&bag(&[("na", 140.0), ("cl", 100.0)])).is_awaiting_input());
}

#[test]
fn curb65_bands() {
    let c = calc("curb-65");
    assert_eq!(c.evaluate(&bag(&[("65", 1.0)])).severity, SeverityTier::Low);
    assert_eq!(
        c.evaluate(&bag(&[("65", 1.0), ("u", 1.0)])).severity,
        SeverityTier::Moderate
    );
    assert_eq!(
        c.evaluate(&bag(&[("65", 1.0), ("u", 1.0), ("c", 1.0)])).severity,
        SeverityTier::High
    );
}

#[test]
fn parkland_volume_and_halves() {
    let c = calc("parkland");
    let result = c.evaluate(&c.default_values());
    assert_eq!(result.score.value(), Some(5600.0));
    assert_eq!(
        result.details.as_deref(),
        Some("8h đầu truyền: 2800 mL. 16h tiếp theo truyền: 2800 mL.")
    );
    assert!(c.evaluate(&bag(&[("weight", 70.0), ("tbsa", 120.0)])).is_awaiting_input());
}

// Shared contract

#[test]
fn evaluation_is_idempotent() {
    for c in medcalc_formulas::all_calculators() {
        let values = c.default_values();
        let first = c.evaluate(&values);
        let second = c.evaluate(&values);
        assert_eq!(
            first.score.value().map(f64::to_bits),
            second.score.value().map(f64::to_bits),
            "{}",
            c.id()
        );
        assert_eq!(first, second, "{}", c.id());
    }
}

#[test]
fn empty_bag_never_produces_non_finite_scores() {
    for c in medcalc_formulas::all_calculators() {
        let result = c.evaluate(&ValueBag::new());
        if let Some(value) = result.score.value() {
            assert!(value.is_finite(), "{} produced {value}", c.id());
        }
        for b in c.point_breakdown(&ValueBag::new()) {
            assert!(b.points.is_finite() && b.max_points.is_finite(), "{}", c.id());
        }
    }
}

const EXTREMES: [f64; 6] = [f64::MAX, -f64::MAX, 1e308, -1e308, 1e-320, f64::MIN_POSITIVE];

fn has_non_finite_text(text: &str) -> bool {
    text.split(|ch: char| !ch.is_alphanumeric())
        .any(|word| word.eq_ignore_ascii_case("inf") || word.eq_ignore_ascii_case("nan"))
}

fn assert_finite_display(id: &str, values: &ValueBag, display: &DisplayResult) {
    if let Some(score) = display.score {
        assert!(score.is_finite(), "{id} scored {score} for {values:?}");
    }
    assert!(!has_non_finite_text(&display.score_text), "{id}: {}", display.score_text);
    if let Some(details) = &display.details {
        assert!(!has_non_finite_text(details), "{id}: {details}");
    }
    for figure in &display.figures {
        assert!(!has_non_finite_text(&figure.value), "{id}: {} = {}", figure.label, figure.value);
    }
    for b in &display.breakdown {
        assert!(b.points.is_finite() && b.max_points.is_finite(), "{id}: {}", b.input_id);
    }
}

#[test]
fn extreme_numeric_inputs_never_produce_non_finite_output() {
    for c in medcalc_formulas::all_calculators() {
        let numeric: Vec<&str> = c
            .inputs()
            .iter()
            .filter(|input| matches!(input.kind, InputKind::Numeric { .. }))
            .map(|input| input.id.as_str())
            .collect();

        for extreme in EXTREMES {
            let mut all = c.default_values();
            for id in &numeric {
                all.set(*id, extreme);
                let one = c.default_values().with(*id, extreme);
                let display = present_checked(c, &one).unwrap();
                assert_finite_display(c.id(), &one, &display);
            }
            let display = present_checked(c, &all).unwrap();
            assert_finite_display(c.id(), &all, &display);
        }
    }
}

#[test]
fn overflowing_arithmetic_awaits_input() {
    let cases = [
        ("bmi", bag(&[("sex", 0.0), ("weight", 70.0), ("height", 1e-160)])),
        ("parkland", bag(&[("weight", 1e307), ("tbsa", 100.0)])),
        ("anion-gap", bag(&[("na", 1e308), ("cl", -1e308), ("hco3", -1e308)])),
        (
            "crcl",
            bag(&[
                ("sex", 0.0),
                ("age", 60.0),
                ("weight", 70.0),
                ("creatinine", 1e-320),
                ("creatinine_unit", 0.0),
                ("height", 170.0),
            ]),
        ),
    ];
    for (id, values) in cases {
        let display = present_checked(calc(id), &values).unwrap();
        assert_eq!(display.score, None, "{id}");
        assert_eq!(display.score_text, "—", "{id}");
        assert!(calc(id).evaluate(&values).is_awaiting_input(), "{id}");
    }
}

#[test]
fn huge_finite_values_survive_rounding() {
    let c = calc("parkland");
    // Too large to scale by ten for rounding, but still finite.
    let result = c.evaluate(&bag(&[("weight", 2.5e305), ("tbsa", 100.0)]));
    assert_eq!(result.score.value(), Some(4.0 * 2.5e305 * 100.0));
}

#[test]
fn subnormal_creatinine_in_umol_is_treated_as_missing() {
    let c = calc("ckd-epi");
    let values = c.default_values().with("creatinine", 1e-320);
    assert!(c.evaluate(&values).is_awaiting_input());
}

#[test]
fn defaults_pass_validation() {
    for c in medcalc_formulas::all_calculators() {
        assert!(c.validate_values(&c.default_values()).is_empty(), "{}", c.id());
    }
}
