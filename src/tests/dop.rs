use crate::{
    prelude::{gdop, pdop, DilutionOfPrecision, Ellipsoid, Error, GeometryMatrix, Vector3},
    tests::{constellation, reference_ecef_m, GPS_ORBIT_RADIUS_M, SKY},
};

#[test]
fn geometry_matrix() {
    let rx = reference_ecef_m();
    let svs = constellation(&rx, &SKY);

    let g = GeometryMatrix::new(&svs, &rx).unwrap();
    assert_eq!(g.nrows(), SKY.len());

    for (i, sv) in svs.iter().enumerate() {
        let los = (sv - rx).normalize();
        for j in 0..3 {
            assert!((g.matrix()[(i, j)] - los[j]).abs() < 1.0E-12);
        }
        assert_eq!(g.matrix()[(i, 3)], 1.0);
    }

    assert_eq!(
        GeometryMatrix::new(&[rx], &rx),
        Err(Error::DegenerateGeometry)
    );
}

#[test]
fn dilution_of_precision() {
    let rx = reference_ecef_m();
    let g = GeometryMatrix::new(&constellation(&rx, &SKY), &rx).unwrap();

    let dop = DilutionOfPrecision::new(&g).unwrap();

    assert!((dop.gdop - 2.0033590203119056).abs() < 1.0E-6);
    assert!((dop.pdop - 1.7593432855832762).abs() < 1.0E-6);
    assert!((dop.gdop.powi(2) - dop.pdop.powi(2) - dop.tdop.powi(2)).abs() < 1.0E-9);

    assert_eq!(gdop(&g).unwrap(), dop.gdop);
    assert_eq!(pdop(&g).unwrap(), dop.pdop);

    // rotation does not modify the position block trace
    let reference = Ellipsoid::WGS84.to_geodetic(&rx);
    let (hdop, vdop) = (dop.hdop(&reference), dop.vdop(&reference));
    assert!((hdop.powi(2) + vdop.powi(2) - dop.pdop.powi(2)).abs() < 1.0E-9);

    // satellites are spread in the sky: vertical is the weak component
    assert!(vdop > hdop);
}

#[test]
fn more_satellites_improve_dop() {
    let rx = reference_ecef_m();
    let svs = constellation(&rx, &SKY);

    let (mut previous_gdop, mut previous_pdop) = (f64::INFINITY, f64::INFINITY);
    for n in 4..=svs.len() {
        let g = GeometryMatrix::new(&svs[..n], &rx).unwrap();
        let (gdop, pdop) = (gdop(&g).unwrap(), pdop(&g).unwrap());
        assert!(gdop <= previous_gdop + 1.0E-12, "gdop increased with {} satellites", n);
        assert!(pdop <= previous_pdop + 1.0E-12, "pdop increased with {} satellites", n);
        previous_gdop = gdop;
        previous_pdop = pdop;
    }

    let g5 = GeometryMatrix::new(&svs[..5], &rx).unwrap();
    assert!((gdop(&g5).unwrap() - 3.7958368252720223).abs() < 1.0E-6);
}

/// `n` satellites surrounding the origin, close to the equatorial plane
fn coplanar(n: usize, z_offset_m: f64) -> Vec<Vector3<f64>> {
    (0..n)
        .map(|i| {
            let theta = (i as f64 * 360.0 / n as f64).to_radians();
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            Vector3::new(
                GPS_ORBIT_RADIUS_M * theta.cos(),
                GPS_ORBIT_RADIUS_M * theta.sin(),
                sign * z_offset_m,
            )
        })
        .collect()
}

#[test]
fn coplanar_geometry() {
    let origin = Vector3::zeros();

    let g = GeometryMatrix::new(&coplanar(6, 0.0), &origin).unwrap();
    assert_eq!(DilutionOfPrecision::new(&g), Err(Error::SingularGeometry));
    assert_eq!(pdop(&g), Err(Error::SingularGeometry));

    let g = GeometryMatrix::new(&coplanar(6, 1.0E3), &origin).unwrap();
    let near_coplanar = pdop(&g).unwrap();
    assert!(near_coplanar > 1.0E3, "pdop={}", near_coplanar);
    assert!(near_coplanar.is_finite());
}

#[test]
fn minimal_near_coplanar_geometry() {
    let origin = Vector3::zeros();

    let g = GeometryMatrix::new(&coplanar(4, 0.0), &origin).unwrap();
    assert_eq!(pdop(&g), Err(Error::SingularGeometry));

    // out of plane component is the only vertical information:
    // pdop ~ 1/(2.sin(e)) with sin(e) = z/R
    let z_offset_m = 1.0E3;
    let g = GeometryMatrix::new(&coplanar(4, z_offset_m), &origin).unwrap();
    let near_coplanar = pdop(&g).unwrap();

    let expected = 0.5 * GPS_ORBIT_RADIUS_M / z_offset_m;
    assert!(near_coplanar.is_finite());
    assert!(
        (near_coplanar - expected).abs() / expected < 1.0E-3,
        "pdop={}",
        near_coplanar
    );

    // compared to 4 well spread satellites
    let rx = reference_ecef_m();
    let g = GeometryMatrix::new(&constellation(&rx, &SKY[..4]), &rx).unwrap();
    let spread = pdop(&g).unwrap();
    assert!(near_coplanar > 100.0 * spread, "pdop={} vs {}", near_coplanar, spread);
}

#[test]
fn not_enough_rows() {
    let rx = reference_ecef_m();
    let g = GeometryMatrix::new(&constellation(&rx, &SKY[..3]), &rx).unwrap();
    assert_eq!(g.covariance(), Err(Error::SingularGeometry));
}
