use lumdist_core::constants::METRES_PER_KM;
use lumdist_core::{
    Cosmology, DistanceReport, IntegrationConfig, LumdistError, Quadrature, RedshiftFactor, Result,
};
use tracing::debug;

use super::cosmology::{check_expansion, hubble_distance, inverse_expansion_rate};
use super::integrate::{FixedStepRiemann, Integrator};

/// Luminosity distance by the fixed-step Riemann sum described in `config`
pub fn luminosity_distance(cosmology: &Cosmology, config: &IntegrationConfig) -> Result<DistanceReport> {
    config.validate()?;
    let riemann = FixedStepRiemann::new(config.step_size);
    luminosity_distance_with(cosmology, config.target_redshift, config.redshift_factor, &riemann)
}

/// Luminosity distance D_L = (c/1000) (1 + z) * integral / H0 in Mpc, with any integration strategy
pub fn luminosity_distance_with(
    cosmology: &Cosmology,
    redshift: f64,
    factor: RedshiftFactor,
    integrator: &dyn Integrator,
) -> Result<DistanceReport> {
    let quad = integrate_inverse_expansion(cosmology, redshift, integrator)?;

    let factor_redshift = match factor {
        RedshiftFactor::LoopExit => quad.end,
        RedshiftFactor::Target => redshift,
    };
    let luminosity_distance = (cosmology.speed_of_light / METRES_PER_KM)
        * (1.0 + factor_redshift)
        * quad.value
        / cosmology.hubble_constant;

    debug!(
        "D_L(z={}) = {:.6} Mpc ({} evaluations, factor z = {})",
        redshift, luminosity_distance, quad.evaluations, factor_redshift
    );
    Ok(DistanceReport {
        redshift,
        integral: quad.value,
        factor_redshift,
        luminosity_distance,
        evaluations: quad.evaluations,
    })
}

/// Line-of-sight comoving distance D_C = D_H * integral of 1/E from 0 to z, in Mpc
pub fn comoving_distance(cosmology: &Cosmology, redshift: f64, integrator: &dyn Integrator) -> Result<f64> {
    let quad = integrate_inverse_expansion(cosmology, redshift, integrator)?;
    Ok(hubble_distance(cosmology) * quad.value)
}

fn integrate_inverse_expansion(
    cosmology: &Cosmology,
    redshift: f64,
    integrator: &dyn Integrator,
) -> Result<Quadrature> {
    cosmology.validate()?;
    if !redshift.is_finite() || redshift < 0.0 {
        return Err(LumdistError::invalid("redshift", redshift, "must be finite and non-negative"));
    }
    check_expansion(cosmology, 0.0, redshift)?;
    integrator.integrate(&|z| inverse_expansion_rate(cosmology, z), 0.0, redshift)
}
