use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{LumdistError, Result};

/// Flat matter + dark energy cosmology
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cosmology {
    /// Speed of light (m/s)
    pub speed_of_light: f64,
    /// H0 (km/s/Mpc)
    pub hubble_constant: f64,
    /// Matter density parameter
    pub omega_matter: f64,
    /// Dark energy density parameter
    pub omega_lambda: f64,
}

impl Default for Cosmology {
    fn default() -> Self {
        Self {
            speed_of_light: SPEED_OF_LIGHT,
            hubble_constant: HUBBLE_CONSTANT,
            omega_matter: OMEGA_MATTER,
            omega_lambda: OMEGA_LAMBDA,
        }
    }
}

impl Cosmology {
    /// Reject values the distance formulas are not defined for.
    /// Flatness (omega_matter + omega_lambda == 1) is assumed, not enforced.
    pub fn validate(&self) -> Result<()> {
        positive("speed_of_light", self.speed_of_light)?;
        positive("hubble_constant", self.hubble_constant)?;
        non_negative("omega_matter", self.omega_matter)?;
        non_negative("omega_lambda", self.omega_lambda)?;
        Ok(())
    }

    /// E(z)^2 = Om (1+z)^3 + OL
    pub fn radicand(&self, z: f64) -> f64 {
        let a = 1.0 + z;
        self.omega_matter * a * a * a + self.omega_lambda
    }
}

/// Which redshift the (1 + z) luminosity factor is evaluated at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedshiftFactor {
    /// Redshift where the fixed-step loop stopped, up to one step past the target
    #[default]
    LoopExit,
    /// Exactly the requested target redshift
    Target,
}

/// Fixed-step integration settings for the default distance computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Upper integration bound
    pub target_redshift: f64,
    /// Riemann step in redshift
    pub step_size: f64,
    /// Redshift used in the final (1 + z) factor
    pub redshift_factor: RedshiftFactor,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            target_redshift: TARGET_REDSHIFT,
            step_size: STEP_SIZE,
            redshift_factor: RedshiftFactor::default(),
        }
    }
}

impl IntegrationConfig {
    pub fn new(target_redshift: f64, step_size: f64) -> Self {
        Self {
            target_redshift,
            step_size,
            ..Self::default()
        }
    }

    pub fn with_redshift_factor(mut self, redshift_factor: RedshiftFactor) -> Self {
        self.redshift_factor = redshift_factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("target_redshift", self.target_redshift)?;
        positive("step_size", self.step_size)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(LumdistError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(LumdistError::invalid(name, value, "must be positive"));
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(LumdistError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(LumdistError::invalid(name, value, "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let c = Cosmology::default();
        assert_eq!(c.speed_of_light, 299_792_458.0);
        assert_eq!(c.hubble_constant, 67.9);
        assert_eq!(c.omega_matter, 0.3065);
        assert_eq!(c.omega_lambda, 0.6935);
        assert!((c.omega_matter + c.omega_lambda - 1.0).abs() < 1e-12);

        let cfg = IntegrationConfig::default();
        assert_eq!(cfg.target_redshift, 1.0);
        assert_eq!(cfg.step_size, 1e-9);
        assert_eq!(cfg.redshift_factor, RedshiftFactor::LoopExit);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Cosmology::default().validate().is_ok());
        assert!(IntegrationConfig::default().validate().is_ok());
        assert!(IntegrationConfig::new(0.0, 1e-3).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_cosmology() {
        let bad_h0 = Cosmology { hubble_constant: 0.0, ..Cosmology::default() };
        match bad_h0.validate() {
            Err(LumdistError::InvalidParameter { name, .. }) => assert_eq!(name, "hubble_constant"),
            other => panic!("expected invalid H0, got {:?}", other),
        }

        let bad_om = Cosmology { omega_matter: -0.1, ..Cosmology::default() };
        assert!(matches!(
            bad_om.validate(),
            Err(LumdistError::InvalidParameter { name: "omega_matter", .. })
        ));

        let bad_ol = Cosmology { omega_lambda: f64::NAN, ..Cosmology::default() };
        assert!(matches!(
            bad_ol.validate(),
            Err(LumdistError::InvalidParameter { name: "omega_lambda", .. })
        ));

        let bad_c = Cosmology { speed_of_light: -1.0, ..Cosmology::default() };
        assert!(bad_c.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_integration_config() {
        for step in [0.0, -1e-9, f64::INFINITY, f64::NAN] {
            let cfg = IntegrationConfig::new(1.0, step);
            assert!(
                matches!(cfg.validate(), Err(LumdistError::InvalidParameter { name: "step_size", .. })),
                "step={}",
                step
            );
        }
        let cfg = IntegrationConfig::new(-0.5, 1e-3);
        assert!(matches!(
            cfg.validate(),
            Err(LumdistError::InvalidParameter { name: "target_redshift", .. })
        ));
    }

    #[test]
    fn test_config_serde() {
        let cfg = IntegrationConfig::new(2.0, 1e-6).with_redshift_factor(RedshiftFactor::Target);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"redshift_factor\":\"Target\""), "{}", json);
        let back: IntegrationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
