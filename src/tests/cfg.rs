use crate::prelude::{
    AngleModel, Carrier, Config, Constants, Ellipsoid, InitialGuess, IonosphereModel, KbModel, Modeling,
    ObliquityFactor, SolverOpts, TroposphereModel, Vector3, SPEED_OF_LIGHT_M_S,
};

#[test]
fn default_config() {
    let cfg = Config::default();

    assert_eq!(cfg.min_sv, 4);
    assert_eq!(cfg.min_sv_required(), 4);
    assert_eq!(cfg.constants.speed_of_light_m_s, SPEED_OF_LIGHT_M_S);
    assert_eq!(cfg.constants.ellipsoid, Ellipsoid::WGS84);
    assert_eq!(cfg.carrier, Carrier::L1);
    assert_eq!(cfg.troposphere, TroposphereModel::Saastamoinen);
    assert_eq!(cfg.ionosphere, IonosphereModel::Unknown);
    assert_eq!(cfg.obliquity, ObliquityFactor::Legacy);
    assert_eq!(cfg.angle_model, AngleModel::Geocentric);
    assert_eq!(cfg.initial_guess, InitialGuess::Origin);
    assert!(cfg.min_sv_elevation_deg.is_none());
    assert!(cfg.reference_position_m.is_none());

    assert!(cfg.modeling.sv_clock_bias);
    assert!(cfg.modeling.tropo_delay);
    assert!(cfg.modeling.iono_delay);
    assert!(!cfg.modeling.standard_atmosphere);

    assert_eq!(cfg.solver.max_iterations, 20);
    assert_eq!(cfg.solver.tolerance_m, 1.0E-4);
}

#[test]
fn static_preset() {
    let reference = Vector3::new(4331297.3480, 567555.6390, 4633133.7280);
    let cfg = Config::static_preset(reference);

    assert_eq!(cfg.reference_position_m, Some(reference));
    assert_eq!(cfg.initial_guess, InitialGuess::PreviousEpoch);
}

#[test]
fn builder() {
    let model = KbModel::new([1.0E-8, 0.0, 0.0, 0.0], [72000.0, 0.0, 0.0, 0.0]);

    let cfg = Config::default()
        .with_modeling(Modeling::no_modeling())
        .with_carrier(Carrier::L5)
        .with_troposphere(TroposphereModel::Niel)
        .with_ionosphere(IonosphereModel::Klobuchar(model))
        .with_obliquity(ObliquityFactor::Standard)
        .with_angle_model(AngleModel::Topocentric)
        .with_min_sv_elevation(10.0)
        .with_constants(Constants::default().with_speed_of_light(3.0E8))
        .with_solver_opts(SolverOpts {
            max_iterations: 5,
            ..Default::default()
        });

    assert_eq!(cfg.modeling, Modeling::no_modeling());
    assert_eq!(cfg.carrier, Carrier::L5);
    assert_eq!(cfg.troposphere, TroposphereModel::Niel);
    assert_eq!(cfg.ionosphere, IonosphereModel::Klobuchar(model));
    assert_eq!(cfg.obliquity, ObliquityFactor::Standard);
    assert_eq!(cfg.angle_model, AngleModel::Topocentric);
    assert_eq!(cfg.min_sv_elevation_deg, Some(10.0));
    assert_eq!(cfg.constants.speed_of_light_m_s, 3.0E8);
    assert_eq!(cfg.solver.max_iterations, 5);
    assert_eq!(cfg.solver.tolerance_m, 1.0E-4);
}

#[test]
fn min_sv_floor() {
    let mut cfg = Config::default();

    cfg.min_sv = 2;
    assert_eq!(cfg.min_sv_required(), 4);

    cfg.min_sv = 6;
    assert_eq!(cfg.min_sv_required(), 6);
}

#[test]
#[cfg(feature = "serde")]
fn config_parsing() {
    let content = r#"
    {
        "modeling": {
            "iono_delay": false
        },
        "troposphere": "Niel",
        "carrier": "L2",
        "min_sv": 5,
        "min_sv_elevation_deg": 10.0,
        "reference_position_m": [4331297.3480, 567555.6390, 4633133.7280]
    }"#;

    let cfg: Config = serde_json::from_str(content).unwrap();

    assert!(!cfg.modeling.iono_delay);
    assert!(cfg.modeling.sv_clock_bias);
    assert!(cfg.modeling.tropo_delay);
    assert!(!cfg.modeling.standard_atmosphere);

    assert_eq!(cfg.troposphere, TroposphereModel::Niel);
    assert_eq!(cfg.carrier, Carrier::L2);
    assert_eq!(cfg.ionosphere, IonosphereModel::Unknown);
    assert_eq!(cfg.min_sv, 5);
    assert_eq!(cfg.min_sv_elevation_deg, Some(10.0));
    assert_eq!(
        cfg.reference_position_m,
        Some(Vector3::new(4331297.3480, 567555.6390, 4633133.7280))
    );

    assert_eq!(cfg.constants, Constants::default());
    assert_eq!(cfg.solver, SolverOpts::default());
    assert_eq!(cfg.initial_guess, InitialGuess::Origin);
}

#[test]
#[cfg(feature = "serde")]
fn empty_config() {
    let cfg: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
#[cfg(feature = "serde")]
fn config_serdes() {
    let model = KbModel::new(
        [0.1118E-7, 0.7451E-8, -0.5960E-7, -0.5960E-7],
        [0.9011E5, 0.1638E5, -0.1966E6, -0.1311E6],
    );

    let cfg = Config::static_preset(Vector3::new(1.0, 2.0, 3.0))
        .with_ionosphere(IonosphereModel::Klobuchar(model))
        .with_initial_guess(InitialGuess::Fixed(Vector3::new(4.0, 5.0, 6.0)));

    let content = serde_json::to_string(&cfg).unwrap();
    let parsed: Config = serde_json::from_str(&content).unwrap();

    assert_eq!(parsed, cfg);
}
