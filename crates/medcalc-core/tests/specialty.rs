use medcalc_core::models::severity::SeverityTier;
use medcalc_core::models::specialty::{Specialty, SpecialtyFilter, ALL_SPECIALTIES_LABEL};

#[test]
fn specialty_parses_from_label_and_slug() {
    assert_eq!("Thận học".parse::<Specialty>().unwrap(), Specialty::Nephrology);
    assert_eq!("nephrology".parse::<Specialty>().unwrap(), Specialty::Nephrology);
    assert_eq!(" Tim mạch ".parse::<Specialty>().unwrap(), Specialty::Cardiology);
    assert!("Da liễu".parse::<Specialty>().is_err());
}

#[test]
fn specialty_serializes_with_vietnamese_label() {
    let json = serde_json::to_string(&Specialty::CriticalCare).unwrap();
    assert_eq!(json, "\"Hồi sức cấp cứu\"");

    let back: Specialty = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Specialty::CriticalCare);
}

#[test]
fn every_label_round_trips_through_from_str() {
    for specialty in Specialty::ALL {
        assert_eq!(specialty.label().parse::<Specialty>().unwrap(), specialty);
        assert_eq!(specialty.to_string(), specialty.label());
    }
}

#[test]
fn all_filter_passes_everything() {
    let filter: SpecialtyFilter = ALL_SPECIALTIES_LABEL.parse().unwrap();
    assert_eq!(filter, SpecialtyFilter::All);
    assert!(filter.matches(&[]));
    assert!(filter.matches(&[Specialty::Oncology]));

    assert_eq!("".parse::<SpecialtyFilter>().unwrap(), SpecialtyFilter::All);
}

#[test]
fn specific_filter_requires_membership() {
    let filter: SpecialtyFilter = "Hô hấp".parse().unwrap();
    assert!(filter.matches(&[Specialty::CriticalCare, Specialty::Pulmonology]));
    assert!(!filter.matches(&[Specialty::Cardiology]));
    assert!(!filter.matches(&[]));
}

#[test]
fn severity_rank_is_ordinal() {
    let ranks: Vec<_> = [
        SeverityTier::Low,
        SeverityTier::Moderate,
        SeverityTier::High,
        SeverityTier::Critical,
    ]
    .iter()
    .map(|t| t.rank().unwrap())
    .collect();
    assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(SeverityTier::Unknown.rank(), None);
    assert!(SeverityTier::Critical.is_alarming());
    assert!(!SeverityTier::Moderate.is_alarming());
}
