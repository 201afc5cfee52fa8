//! Ecliptic ↔ equatorial ↔ horizontal coordinate transforms.
//!
//! Implemented as rotations of unit vectors, so no formula degenerates at
//! the poles. All angles in degrees; azimuth is compass convention (0°
//! north, 90° east, 180° south, 270° west).

use crate::angles::wrap360;

/// Mean obliquity of the ecliptic at J2000, degrees.
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_11;

fn unit_from_sphere(lon_deg: f64, lat_deg: f64) -> [f64; 3] {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    [
        lat.cos() * lon.cos(),
        lat.cos() * lon.sin(),
        lat.sin(),
    ]
}

fn sphere_from_unit(v: [f64; 3]) -> (f64, f64) {
    let lon = v[1].atan2(v[0]).to_degrees();
    let lat = v[2].clamp(-1.0, 1.0).asin().to_degrees();
    (wrap360(lon), lat)
}

/// Rotate a vector about the x axis by `angle_deg` (right-handed).
fn rotate_x(v: [f64; 3], angle_deg: f64) -> [f64; 3] {
    let a = angle_deg.to_radians();
    let (sin_a, cos_a) = a.sin_cos();
    [
        v[0],
        v[1] * cos_a - v[2] * sin_a,
        v[1] * sin_a + v[2] * cos_a,
    ]
}

/// Ecliptic (longitude, latitude) → equatorial (right ascension,
/// declination), degrees.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    sphere_from_unit(rotate_x(unit_from_sphere(lon_deg, lat_deg), obliquity_deg))
}

/// Equatorial (right ascension, declination) → ecliptic (longitude,
/// latitude), degrees.
pub fn equatorial_to_ecliptic(ra_deg: f64, dec_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    sphere_from_unit(rotate_x(unit_from_sphere(ra_deg, dec_deg), -obliquity_deg))
}

/// Ecliptic position → horizontal (azimuth, altitude), degrees.
///
/// The sidereal frame is anchored on the chart's midheaven: the local
/// sidereal time is the right ascension of `mc_lon_deg` (the ecliptic point
/// culminating). Hour angle runs positive westward.
pub fn ecliptic_to_horizontal(
    lon_deg: f64,
    lat_deg: f64,
    mc_lon_deg: f64,
    obliquity_deg: f64,
    geo_lat_deg: f64,
) -> (f64, f64) {
    let (ra, dec) = ecliptic_to_equatorial(lon_deg, lat_deg, obliquity_deg);
    let (lst, _) = ecliptic_to_equatorial(mc_lon_deg, 0.0, obliquity_deg);
    let hour_angle = wrap360(lst - ra).to_radians();
    let dec = dec.to_radians();
    let phi = geo_lat_deg.to_radians();

    let sin_alt = phi.sin() * dec.sin() + phi.cos() * dec.cos() * hour_angle.cos();
    let alt = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();

    let east = -dec.cos() * hour_angle.sin();
    let north = phi.cos() * dec.sin() - phi.sin() * dec.cos() * hour_angle.cos();
    let az = wrap360(east.atan2(north).to_degrees());
    (az, alt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn equinox_point_is_fixed() {
        let (ra, dec) = ecliptic_to_equatorial(0.0, 0.0, OBLIQUITY_J2000_DEG);
        assert!(ra.abs() < EPS || (ra - 360.0).abs() < EPS);
        assert!(dec.abs() < EPS);
    }

    #[test]
    fn solstice_point_reaches_obliquity() {
        let (ra, dec) = ecliptic_to_equatorial(90.0, 0.0, OBLIQUITY_J2000_DEG);
        assert!((ra - 90.0).abs() < EPS);
        assert!((dec - OBLIQUITY_J2000_DEG).abs() < EPS);
    }

    #[test]
    fn equ_ecl_round_trip() {
        for (lon, lat) in [(12.5, 3.2), (200.0, -5.0), (359.0, 1.0), (90.0, 88.0)] {
            let (ra, dec) = ecliptic_to_equatorial(lon, lat, OBLIQUITY_J2000_DEG);
            let (lon2, lat2) = equatorial_to_ecliptic(ra, dec, OBLIQUITY_J2000_DEG);
            assert!((lon - lon2).abs() < 1e-8, "lon {lon} -> {lon2}");
            assert!((lat - lat2).abs() < 1e-8, "lat {lat} -> {lat2}");
        }
    }

    #[test]
    fn zero_obliquity_is_identity() {
        let (ra, dec) = ecliptic_to_equatorial(123.4, -5.6, 0.0);
        assert!((ra - 123.4).abs() < EPS);
        assert!((dec + 5.6).abs() < EPS);
    }

    #[test]
    fn rising_point_azimuth_east() {
        // Zero obliquity so RA == lon; MC at 0° makes LST 0. A body at
        // lon 90° culminates a quarter turn from now, so it sits 90° east
        // of the meridian: on the horizon, azimuth due east, for an
        // equatorial observer.
        let (az, alt) = ecliptic_to_horizontal(90.0, 0.0, 0.0, 0.0, 0.0);
        assert!((az - 90.0).abs() < 1e-6, "az = {az}");
        assert!(alt.abs() < 1e-6, "alt = {alt}");
    }

    #[test]
    fn setting_point_azimuth_west() {
        // Mirror case: lon 270° culminated a quarter turn ago.
        let (az, alt) = ecliptic_to_horizontal(270.0, 0.0, 0.0, 0.0, 0.0);
        assert!((az - 270.0).abs() < 1e-6, "az = {az}");
        assert!(alt.abs() < 1e-6, "alt = {alt}");
    }

    #[test]
    fn culminating_point_azimuth_south() {
        // Body on the MC for a mid-northern observer: due south, altitude
        // = 90 - latitude for a body on the celestial equator.
        let (az, alt) = ecliptic_to_horizontal(0.0, 0.0, 0.0, 0.0, 45.0);
        assert!((az - 180.0).abs() < 1e-6, "az = {az}");
        assert!((alt - 45.0).abs() < 1e-6, "alt = {alt}");
    }

    #[test]
    fn anticulminating_point_below_horizon() {
        let (az, alt) = ecliptic_to_horizontal(180.0, 0.0, 0.0, 0.0, 45.0);
        assert!(az.abs() < 1e-6 || (az - 360.0).abs() < 1e-6, "az = {az}");
        assert!((alt + 45.0).abs() < 1e-6, "alt = {alt}");
    }
}
