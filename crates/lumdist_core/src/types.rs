use serde::{Deserialize, Serialize};

/// Outcome of a single numerical integration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrature {
    /// Integral estimate
    pub value: f64,
    /// Abscissa after the final step. Fixed-step methods may overshoot the
    /// upper bound by up to one step; adaptive methods report the bound itself.
    pub end: f64,
    /// Number of integrand evaluations
    pub evaluations: u64,
}

/// Luminosity distance together with the quantities it was built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    /// Requested redshift
    pub redshift: f64,
    /// Integral of 1/E(z) from 0 to the requested redshift
    pub integral: f64,
    /// Redshift used in the (1 + z) factor
    pub factor_redshift: f64,
    /// Luminosity distance (Mpc)
    pub luminosity_distance: f64,
    /// Number of integrand evaluations behind `integral`
    pub evaluations: u64,
}

impl DistanceReport {
    /// Comoving distance implied by the report (Mpc)
    pub fn comoving_distance(&self) -> f64 {
        self.luminosity_distance / (1.0 + self.factor_redshift)
    }
}
