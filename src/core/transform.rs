//! Affine georeferencing between GPS fixes and base-image pixels
//!
//! The forward model maps pixels to geographic coordinates:
//!
//! ```text
//! lon = a*x + b*y + c
//! lat = d*x + e*y + f
//! ```
//!
//! [`AffineGeoTransform::to_pixel`] evaluates the closed-form inverse of that
//! model, so the hot path is a handful of multiplications.

use crate::{
    core::{
        constants::DET_EPSILON,
        geo::{GeoPoint, PixelPoint},
    },
    MapError, Result,
};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Forward-model coefficients, `[lon; lat] = [[a, b], [d, e]]·[x; y] + [c; f]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl TransformCoefficients {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Determinant of the linear part
    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// A surveyed pairing of an image pixel with the GPS position it depicts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    pub pixel: PixelPoint,
    pub geo: GeoPoint,
}

impl Correspondence {
    pub fn new(pixel: PixelPoint, geo: GeoPoint) -> Self {
        Self { pixel, geo }
    }
}

/// Validated affine transform with its determinant cached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineGeoTransform {
    coefficients: TransformCoefficients,
    det: f64,
}

impl AffineGeoTransform {
    /// Validates the coefficients and caches the determinant.
    ///
    /// Fails with [`MapError::DegenerateTransform`] when a coefficient is not
    /// finite or the determinant is negligible relative to its own terms.
    pub fn new(coefficients: TransformCoefficients) -> Result<Self> {
        let det = coefficients.determinant();
        if !coefficients.is_finite() || !det.is_finite() {
            return Err(MapError::DegenerateTransform { det });
        }

        let scale = (coefficients.a * coefficients.e)
            .abs()
            .max((coefficients.b * coefficients.d).abs());
        if det.abs() <= DET_EPSILON * scale || det == 0.0 {
            return Err(MapError::DegenerateTransform { det });
        }

        Ok(Self { coefficients, det })
    }

    /// Least-squares fit from three or more correspondences.
    ///
    /// Pixel coordinates are centered before solving to keep the design
    /// matrix well conditioned; the offsets are folded back into `c` and `f`.
    pub fn fit(correspondences: &[Correspondence]) -> Result<Self> {
        let n = correspondences.len();
        if n < 3 {
            return Err(MapError::InsufficientCorrespondences { found: n });
        }
        if correspondences
            .iter()
            .any(|c| !c.pixel.is_finite() || !c.geo.is_valid())
        {
            return Err(MapError::InvalidCoordinates(
                "correspondence contains a non-finite or out-of-range coordinate".to_string(),
            ));
        }

        let mean_x = correspondences.iter().map(|c| c.pixel.x).sum::<f64>() / n as f64;
        let mean_y = correspondences.iter().map(|c| c.pixel.y).sum::<f64>() / n as f64;

        let design = DMatrix::from_fn(n, 3, |row, col| match col {
            0 => correspondences[row].pixel.x - mean_x,
            1 => correspondences[row].pixel.y - mean_y,
            _ => 1.0,
        });
        let lon = DVector::from_iterator(n, correspondences.iter().map(|c| c.geo.longitude));
        let lat = DVector::from_iterator(n, correspondences.iter().map(|c| c.geo.latitude));

        let svd = design.svd(true, true);
        let tolerance = svd.singular_values.max() * 1e-10;
        if svd.rank(tolerance) < 3 {
            // Collinear (or coincident) pixels leave the linear part underdetermined
            return Err(MapError::DegenerateTransform { det: 0.0 });
        }

        let lon_params = svd
            .solve(&lon, tolerance)
            .map_err(|e| MapError::InvalidCoordinates(e.to_string()))?;
        let lat_params = svd
            .solve(&lat, tolerance)
            .map_err(|e| MapError::InvalidCoordinates(e.to_string()))?;

        let (a, b) = (lon_params[0], lon_params[1]);
        let (d, e) = (lat_params[0], lat_params[1]);
        let c = lon_params[2] - a * mean_x - b * mean_y;
        let f = lat_params[2] - d * mean_x - e * mean_y;

        let transform = Self::new(TransformCoefficients::new(a, b, c, d, e, f))?;
        log::debug!(
            "fitted affine transform from {} correspondences (det = {:e})",
            n,
            transform.det
        );
        Ok(transform)
    }

    pub fn coefficients(&self) -> &TransformCoefficients {
        &self.coefficients
    }

    pub fn determinant(&self) -> f64 {
        self.det
    }

    /// Converts a GPS fix to a base-image pixel
    pub fn to_pixel(&self, geo: GeoPoint) -> PixelPoint {
        let TransformCoefficients { a, b, c, d, e, f } = self.coefficients;
        let dlon = geo.longitude - c;
        let dlat = geo.latitude - f;

        PixelPoint::new(
            (e * dlon - b * dlat) / self.det,
            (-d * dlon + a * dlat) / self.det,
        )
    }

    /// Converts a base-image pixel back to a GPS position (forward model)
    pub fn to_geo(&self, pixel: PixelPoint) -> GeoPoint {
        let TransformCoefficients { a, b, c, d, e, f } = self.coefficients;
        GeoPoint::new(
            d * pixel.x + e * pixel.y + f,
            a * pixel.x + b * pixel.y + c,
        )
    }

    /// Pixel distance between each surveyed pixel and its transformed fix
    pub fn residuals(&self, correspondences: &[Correspondence]) -> Vec<f64> {
        correspondences
            .iter()
            .map(|c| self.to_pixel(c.geo).distance_to(&c.pixel))
            .collect()
    }
}

impl TryFrom<TransformCoefficients> for AffineGeoTransform {
    type Error = MapError;

    fn try_from(coefficients: TransformCoefficients) -> Result<Self> {
        Self::new(coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{CAMPUS_COEFFICIENTS, CAMPUS_CORRESPONDENCES};

    fn campus() -> AffineGeoTransform {
        AffineGeoTransform::new(CAMPUS_COEFFICIENTS).unwrap()
    }

    #[test]
    fn test_campus_determinant() {
        let det = campus().determinant();
        assert!((det - (-4.0277e-11)).abs() < 1e-14, "det = {det:e}");
    }

    #[test]
    fn test_correspondences_reproduce_within_a_pixel() {
        let transform = campus();
        for residual in transform.residuals(&CAMPUS_CORRESPONDENCES) {
            assert!(residual <= 1.0, "residual {residual} px");
        }
    }

    #[test]
    fn test_to_pixel_matches_closed_form() {
        let pixel = campus().to_pixel(GeoPoint::new(34.81000, 114.36700));

        let TransformCoefficients { a, b, c, d, e, f } = CAMPUS_COEFFICIENTS;
        let det = a * e - b * d;
        let x = (e * (114.36700 - c) - b * (34.81000 - f)) / det;
        let y = (-d * (114.36700 - c) + a * (34.81000 - f)) / det;

        assert!((pixel.x - x).abs() < 1e-9);
        assert!((pixel.y - y).abs() < 1e-9);
        assert!((pixel.x - 419.957).abs() < 0.01, "x = {}", pixel.x);
        assert!((pixel.y - 932.474).abs() < 0.01, "y = {}", pixel.y);
    }

    #[test]
    fn test_to_geo_inverts_to_pixel() {
        let transform = campus();
        let pixel = PixelPoint::new(640.0, 480.0);
        let back = transform.to_pixel(transform.to_geo(pixel));

        assert!(back.distance_to(&pixel) < 1e-6);
    }

    #[test]
    fn test_zero_determinant_is_rejected() {
        let singular = TransformCoefficients::new(1.0, 2.0, 0.0, 2.0, 4.0, 0.0);
        assert!(matches!(
            AffineGeoTransform::new(singular),
            Err(MapError::DegenerateTransform { .. })
        ));

        let zero = TransformCoefficients::new(0.0, 0.0, 5.0, 0.0, 0.0, 5.0);
        assert!(matches!(
            AffineGeoTransform::new(zero),
            Err(MapError::DegenerateTransform { .. })
        ));
    }

    #[test]
    fn test_non_finite_coefficients_are_rejected() {
        let broken = TransformCoefficients::new(f64::NAN, 0.0, 0.0, 0.0, 1.0, 0.0);
        assert!(AffineGeoTransform::new(broken).is_err());
    }

    #[test]
    fn test_fit_reproduces_campus_survey() {
        let fitted = AffineGeoTransform::fit(&CAMPUS_CORRESPONDENCES).unwrap();
        for residual in fitted.residuals(&CAMPUS_CORRESPONDENCES) {
            assert!(residual < 1e-3, "residual {residual} px");
        }

        let fix = GeoPoint::new(34.81000, 114.36700);
        let drift = fitted.to_pixel(fix).distance_to(&campus().to_pixel(fix));
        assert!(drift < 1.0, "drift {drift} px");
    }

    #[test]
    fn test_fit_needs_three_correspondences() {
        let err = AffineGeoTransform::fit(&CAMPUS_CORRESPONDENCES[..2]).unwrap_err();
        assert!(matches!(
            err,
            MapError::InsufficientCorrespondences { found: 2 }
        ));
    }

    #[test]
    fn test_fit_rejects_collinear_pixels() {
        let collinear = [
            Correspondence::new(PixelPoint::new(0.0, 0.0), GeoPoint::new(34.80, 114.36)),
            Correspondence::new(PixelPoint::new(100.0, 100.0), GeoPoint::new(34.81, 114.37)),
            Correspondence::new(PixelPoint::new(200.0, 200.0), GeoPoint::new(34.82, 114.38)),
        ];
        assert!(matches!(
            AffineGeoTransform::fit(&collinear),
            Err(MapError::DegenerateTransform { .. })
        ));
    }
}
