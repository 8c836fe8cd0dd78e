use std::str::FromStr;

use rstest::rstest;

use crate::{
    prelude::{Epoch, Error, ErrorKind},
    tests::gps,
};

#[rstest]
#[case(Error::MissingPseudoRange(gps(1)), ErrorKind::MissingData)]
#[case(Error::MissingOrbit(gps(2)), ErrorKind::MissingData)]
#[case(Error::InvalidOrbit(gps(3)), ErrorKind::MissingData)]
#[case(Error::InsufficientGeometry(3), ErrorKind::InsufficientGeometry)]
#[case(Error::SingularGeometry, ErrorKind::SingularGeometry)]
#[case(Error::DegenerateGeometry, ErrorKind::SingularGeometry)]
#[case(Error::DimensionMismatch(5, 4), ErrorKind::Configuration)]
#[case(
    Error::UnknownTroposphereModel("hopfield".to_string()),
    ErrorKind::Configuration
)]
#[case(Error::UnknownObliquityFactor("".to_string()), ErrorKind::Configuration)]
#[case(Error::UnknownAngleModel("enu".to_string()), ErrorKind::Configuration)]
#[case(Error::UnknownCarrier("L9".to_string()), ErrorKind::Configuration)]
fn error_kind(#[case] error: Error, #[case] kind: ErrorKind) {
    assert_eq!(error.kind(), kind);
}

#[test]
fn missing_clock_kind() {
    let t = Epoch::from_str("2020-06-25T00:00:00 GPST").unwrap();
    let error = Error::ClockCorrectionNotFound(gps(7), t);
    assert_eq!(error.kind(), ErrorKind::MissingData);
    assert!(error.to_string().contains("G07"));
}

#[test]
fn error_display() {
    assert_eq!(
        Error::InsufficientGeometry(3).to_string(),
        "insufficient geometry: 3 usable satellite(s)"
    );
    assert_eq!(
        Error::DimensionMismatch(5, 4).to_string(),
        "dimension mismatch: 5 positions but 4 pseudo ranges"
    );
    assert_eq!(
        Error::MissingOrbit(gps(12)).to_string(),
        "G12: missing orbital state"
    );
}
