use rstest::*;
use std::str::FromStr;

use crate::{
    prelude::{
        BiasRuntime, Carrier, DelayCorrection, Epoch, Error, GeodeticPosition, IonosphereModel, KbModel,
        ObliquityFactor, UnavailableCause, SPEED_OF_LIGHT_M_S,
    },
    tests::gps,
};

fn broadcast_model() -> KbModel {
    KbModel::new(
        [0.1118E-7, 0.7451E-8, -0.5960E-7, -0.5960E-7],
        [0.9011E5, 0.1638E5, -0.1966E6, -0.1311E6],
    )
}

#[rstest]
#[case(48608.4, ObliquityFactor::Legacy, 2.8644410522116366E-8)]
#[case(48608.4, ObliquityFactor::Standard, 1.7423481400418882E-8)]
#[case(50400.0, ObliquityFactor::Legacy, 2.829128277785551E-8)]
#[case(50400.0, ObliquityFactor::Standard, 1.720868505544434E-8)]
#[case(0.0, ObliquityFactor::Legacy, 1.1107207345395915E-8)]
#[case(0.0, ObliquityFactor::Standard, 6.75616E-9)]
fn klobuchar_delay(
    #[case] time_of_day_s: f64,
    #[case] obliquity: ObliquityFactor,
    #[case] expected_s: f64,
) {
    let delay_s = broadcast_model().delay_s(46.877, 7.465, 45.0, 120.0, time_of_day_s, obliquity);
    assert!(
        (delay_s - expected_s).abs() < 1.0E-15,
        "got {:.12E} expecting {:.12E}",
        delay_s,
        expected_s
    );
}

#[test]
fn night_time_delay() {
    // night time: constant 5ns vertical delay
    let delay_s = broadcast_model().delay_s(
        46.877,
        7.465,
        90.0,
        0.0,
        0.0,
        ObliquityFactor::Legacy,
    );
    assert!((delay_s - 5.0E-9 * std::f64::consts::FRAC_PI_2).abs() < 1.0E-18);
}

#[test]
fn amplitude_clamp() {
    // negative amplitude is clamped to zero: night time delay only
    let model = KbModel::new([-1.0E-8, 0.0, 0.0, 0.0], [72000.0, 0.0, 0.0, 0.0]);

    let delay_s = model.delay_s(0.0, 0.0, 90.0, 0.0, 54000.0, ObliquityFactor::Legacy);
    assert!((delay_s - 7.853981633974483E-9).abs() < 1.0E-18);

    let delay_s = model.delay_s(0.0, 0.0, 30.0, 0.0, 54000.0, ObliquityFactor::Legacy);
    assert!((delay_s - 1.570796326794897E-8).abs() < 1.0E-18);

    assert_eq!(model.amplitude(0.1), 0.0);
}

#[test]
fn period_clamp() {
    // periods shorter than 72000s are clamped
    let short = KbModel::new([1.0E-8, 0.0, 0.0, 0.0], [1000.0, 0.0, 0.0, 0.0]);
    let nominal = KbModel::new([1.0E-8, 0.0, 0.0, 0.0], [72000.0, 0.0, 0.0, 0.0]);

    assert_eq!(short.period(0.1), 72000.0);

    let short_s = short.delay_s(0.0, 0.0, 90.0, 0.0, 54000.0, ObliquityFactor::Legacy);
    let nominal_s = nominal.delay_s(0.0, 0.0, 90.0, 0.0, 54000.0, ObliquityFactor::Legacy);

    assert_eq!(short_s, nominal_s);
    assert!((short_s - 2.2793163395015648E-8).abs() < 1.0E-18);
}

#[test]
fn epoch_time_of_day() {
    let model = broadcast_model();
    let t = Epoch::from_str("2020-06-25T14:00:00 GPST").unwrap();

    let from_epoch = model.bias_s(t, 46.877, 7.465, 45.0, 120.0, ObliquityFactor::Legacy);
    let from_tod = model.delay_s(
        46.877,
        7.465,
        45.0,
        120.0,
        50400.0,
        ObliquityFactor::Legacy,
    );

    assert!((from_epoch - from_tod).abs() < 1.0E-18);

    let t = Epoch::from_gpst_seconds(10.0 * 86400.0 + 50400.0);
    let from_epoch = model.bias_s(t, 46.877, 7.465, 45.0, 120.0, ObliquityFactor::Legacy);
    assert!((from_epoch - from_tod).abs() < 1.0E-18);
}

#[test]
fn ionosphere_model() {
    let rtm = BiasRuntime {
        t: Epoch::from_str("2020-06-25T14:00:00 GPST").unwrap(),
        sv: gps(1),
        carrier: Carrier::L1,
        elevation_deg: 45.0,
        azimuth_deg: 120.0,
        rx_geodetic: GeodeticPosition::new(46.877, 7.465, 956.0),
    };

    assert_eq!(
        IonosphereModel::Unknown.bias_m(&rtm, ObliquityFactor::Legacy, SPEED_OF_LIGHT_M_S),
        DelayCorrection::Unavailable(UnavailableCause::NoIonosphereModel),
    );

    let delay_m = IonosphereModel::Klobuchar(broadcast_model()).bias_m(
        &rtm,
        ObliquityFactor::Legacy,
        SPEED_OF_LIGHT_M_S,
    );

    let expected_m = 2.829128277785551E-8 * SPEED_OF_LIGHT_M_S;
    assert!((delay_m.value_m() - expected_m).abs() < 1.0E-6);
    assert!(!delay_m.is_skipped());

    // dispersive delay grows on lower frequencies
    let l2 = BiasRuntime {
        carrier: Carrier::L2,
        ..rtm
    };

    let l2_delay_m = IonosphereModel::Klobuchar(broadcast_model()).bias_m(
        &l2,
        ObliquityFactor::Legacy,
        SPEED_OF_LIGHT_M_S,
    );

    let ratio = l2_delay_m.value_m() / delay_m.value_m();
    assert!((ratio - (1575.42_f64 / 1227.60).powi(2)).abs() < 1.0E-9);
}

#[test]
fn obliquity_factor() {
    assert!((ObliquityFactor::Legacy.eval(90.0) - std::f64::consts::FRAC_PI_2).abs() < 1.0E-12);
    assert!((ObliquityFactor::Standard.eval(90.0) - (1.0 + 16.0 * 0.03_f64.powi(3))).abs() < 1.0E-12);
    assert!(ObliquityFactor::Standard.eval(5.0) > ObliquityFactor::Standard.eval(45.0));

    assert_eq!(ObliquityFactor::from_str("legacy"), Ok(ObliquityFactor::Legacy));
    assert_eq!(ObliquityFactor::from_str("IS-GPS-200"), Ok(ObliquityFactor::Standard));
    assert_eq!(
        ObliquityFactor::from_str("other"),
        Err(Error::UnknownObliquityFactor("other".to_string()))
    );
    assert_eq!(ObliquityFactor::default(), ObliquityFactor::Legacy);
}
