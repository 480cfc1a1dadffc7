use lumdist_core::constants::METRES_PER_KM;
use lumdist_core::{Cosmology, LumdistError, Result};

/// Dimensionless expansion rate E(z) = H(z)/H0 for a flat matter + Lambda universe
pub fn expansion_rate(cosmology: &Cosmology, z: f64) -> f64 {
    cosmology.radicand(z).sqrt()
}

/// 1/E(z), the comoving-distance integrand
pub fn inverse_expansion_rate(cosmology: &Cosmology, z: f64) -> f64 {
    1.0 / cosmology.radicand(z).sqrt()
}

/// Hubble distance c/H0 in Mpc
pub fn hubble_distance(cosmology: &Cosmology) -> f64 {
    cosmology.speed_of_light / METRES_PER_KM / cosmology.hubble_constant
}

/// Make sure E(z)^2 stays strictly positive over [lower, upper].
/// With non-negative omegas the radicand is non-decreasing in z, so both ends suffice.
pub fn check_expansion(cosmology: &Cosmology, lower: f64, upper: f64) -> Result<()> {
    for z in [lower, upper] {
        let radicand = cosmology.radicand(z);
        if !radicand.is_finite() || radicand <= 0.0 {
            return Err(LumdistError::NumericOverflow { redshift: z, radicand });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_rate_today_is_one() {
        let c = Cosmology::default();
        assert!((expansion_rate(&c, 0.0) - 1.0).abs() < 1e-12);
        assert!((inverse_expansion_rate(&c, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_expansion_rate_increasing() {
        let c = Cosmology::default();
        let e1 = expansion_rate(&c, 0.5);
        let e2 = expansion_rate(&c, 1.0);
        let e3 = expansion_rate(&c, 3.0);
        assert!(1.0 < e1 && e1 < e2 && e2 < e3);
        // E(1)^2 = 0.3065 * 8 + 0.6935
        assert!((e2 * e2 - 3.1455).abs() < 1e-12, "E(1) = {}", e2);
        assert!((inverse_expansion_rate(&c, 1.0) * e2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hubble_distance() {
        let d_h = hubble_distance(&Cosmology::default());
        // 299792.458 / 67.9
        assert!((d_h - 4415.205567).abs() < 1e-3, "D_H = {}", d_h);
    }

    #[test]
    fn test_check_expansion() {
        assert!(check_expansion(&Cosmology::default(), 0.0, 1.0).is_ok());

        let empty = Cosmology { omega_matter: 0.0, omega_lambda: 0.0, ..Cosmology::default() };
        match check_expansion(&empty, 0.0, 1.0) {
            Err(LumdistError::NumericOverflow { redshift, radicand }) => {
                assert_eq!(redshift, 0.0);
                assert_eq!(radicand, 0.0);
            }
            other => panic!("expected overflow, got {:?}", other),
        }

        // Matter-only universe is fine
        let eds = Cosmology { omega_matter: 1.0, omega_lambda: 0.0, ..Cosmology::default() };
        assert!(check_expansion(&eds, 0.0, 5.0).is_ok());
    }
}
