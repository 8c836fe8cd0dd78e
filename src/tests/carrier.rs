use rstest::*;
use std::str::FromStr;

use crate::prelude::{Carrier, Error};

#[rstest]
#[case("L1", Carrier::L1)]
#[case("C1", Carrier::L1)]
#[case("c1c", Carrier::L1)]
#[case("C2", Carrier::L2)]
#[case("P2", Carrier::L2)]
#[case(" C5 ", Carrier::L5)]
#[case("E5A", Carrier::E5A)]
fn carrier_parsing(#[case] content: &str, #[case] expected: Carrier) {
    assert_eq!(Carrier::from_str(content), Ok(expected));
}

#[test]
fn unknown_carrier() {
    assert_eq!(
        Carrier::from_str("L9"),
        Err(Error::UnknownCarrier("L9".to_string()))
    );
}

#[test]
fn carrier_display() {
    for carrier in [
        Carrier::L1,
        Carrier::L2,
        Carrier::L5,
        Carrier::E1,
        Carrier::E5A,
        Carrier::E5B,
    ] {
        assert_eq!(Carrier::from_str(&carrier.to_string()), Ok(carrier));
    }
}

#[test]
fn iono_scaling() {
    assert_eq!(Carrier::L1.iono_scaling(), 1.0);
    assert_eq!(Carrier::E1.iono_scaling(), 1.0);
    assert!((Carrier::L2.iono_scaling() - 1.6469444444444442).abs() < 1.0E-9);
    assert!(Carrier::L5.iono_scaling() > Carrier::L2.iono_scaling());
}
