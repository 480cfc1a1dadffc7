use lumdist_core::constants::{BISECTION_BRACKET, MAX_BISECTION_ITERATIONS};
use lumdist_core::{Cosmology, LumdistError, RedshiftFactor, Result};
use tracing::debug;

use super::distance::luminosity_distance_with;
use super::integrate::Integrator;

fn distance_at(cosmology: &Cosmology, z: f64, integrator: &dyn Integrator) -> Result<f64> {
    Ok(luminosity_distance_with(cosmology, z, RedshiftFactor::Target, integrator)?.luminosity_distance)
}

/// Redshift at which the luminosity distance equals `distance` (Mpc), by bisection.
///
/// The search starts from the bracket [1, 10] and widens it (halving the lower
/// end, doubling the upper) until the target distance is enclosed.
pub fn redshift_at_distance(
    cosmology: &Cosmology,
    distance: f64,
    tolerance: f64,
    integrator: &dyn Integrator,
) -> Result<f64> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(LumdistError::invalid("distance", distance, "must be positive and finite"));
    }
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(LumdistError::invalid("tolerance", tolerance, "must be positive and finite"));
    }

    let (mut z1, mut z2) = BISECTION_BRACKET;
    let mut d1 = distance_at(cosmology, z1, integrator)?;
    let mut d2 = distance_at(cosmology, z2, integrator)?;
    let mut iterations = 0;

    while (distance - d1) * (distance - d2) > 0.0 {
        iterations += 1;
        if iterations > MAX_BISECTION_ITERATIONS {
            return Err(LumdistError::NoConvergence { iterations });
        }
        z1 /= 2.0;
        z2 *= 2.0;
        d1 = distance_at(cosmology, z1, integrator)?;
        d2 = distance_at(cosmology, z2, integrator)?;
    }

    let mut z = 0.5 * (z1 + z2);
    let mut d = distance_at(cosmology, z, integrator)?;
    while (d - distance).abs() > tolerance {
        iterations += 1;
        if iterations > MAX_BISECTION_ITERATIONS {
            return Err(LumdistError::NoConvergence { iterations });
        }
        if d < distance {
            z1 = z;
        } else {
            z2 = z;
        }
        z = 0.5 * (z1 + z2);
        d = distance_at(cosmology, z, integrator)?;
    }

    debug!("z(D_L = {} Mpc) = {} after {} iterations", distance, z, iterations);
    Ok(z)
}

/// Tabulated D_L(z) on a uniform redshift grid, inverted by linear interpolation
#[derive(Debug, Clone, PartialEq)]
pub struct RedshiftTable {
    redshifts: Vec<f64>,
    distances: Vec<f64>,
}

impl RedshiftTable {
    pub fn build(
        cosmology: &Cosmology,
        z_min: f64,
        z_max: f64,
        samples: usize,
        integrator: &dyn Integrator,
    ) -> Result<Self> {
        if samples < 2 {
            return Err(LumdistError::invalid("samples", samples as f64, "need at least two"));
        }
        if !z_min.is_finite() || z_min < 0.0 {
            return Err(LumdistError::invalid("z_min", z_min, "must be finite and non-negative"));
        }
        if !z_max.is_finite() || z_max <= z_min {
            return Err(LumdistError::invalid("z_max", z_max, "must exceed z_min"));
        }

        let dz = (z_max - z_min) / (samples - 1) as f64;
        let mut redshifts = Vec::with_capacity(samples);
        let mut distances = Vec::with_capacity(samples);
        for i in 0..samples {
            let z = if i == samples - 1 { z_max } else { z_min + i as f64 * dz };
            distances.push(distance_at(cosmology, z, integrator)?);
            redshifts.push(z);
        }

        debug!(
            "redshift table: {} samples over z in [{}, {}], D_L in [{:.3}, {:.3}] Mpc",
            samples, z_min, z_max, distances[0], distances[samples - 1]
        );
        Ok(Self { redshifts, distances })
    }

    pub fn len(&self) -> usize {
        self.redshifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.redshifts.is_empty()
    }

    /// Distance range covered by the table (Mpc)
    pub fn distance_range(&self) -> (f64, f64) {
        (self.distances[0], self.distances[self.distances.len() - 1])
    }

    pub fn redshift_at(&self, distance: f64) -> Result<f64> {
        let (min, max) = self.distance_range();
        if !(min..=max).contains(&distance) {
            return Err(LumdistError::OutOfRange { value: distance, min, max });
        }

        // First index whose distance is >= the query, clamped so i-1 is valid
        let i = self.distances.partition_point(|&d| d < distance).max(1);
        let (d0, d1) = (self.distances[i - 1], self.distances[i]);
        let (z0, z1) = (self.redshifts[i - 1], self.redshifts[i]);
        let t = if d1 > d0 { (distance - d0) / (d1 - d0) } else { 0.0 };
        Ok(z0 + t * (z1 - z0))
    }

    pub fn redshifts_at(&self, distances: &[f64]) -> Result<Vec<f64>> {
        distances.iter().map(|&d| self.redshift_at(d)).collect()
    }
}

/// Detector-frame (redshifted) mass (1 + z) m
pub fn redshifted_mass(mass: f64, z: f64) -> f64 {
    (1.0 + z) * mass
}

/// Source-frame mass m / (1 + z)
pub fn source_frame_mass(mass: f64, z: f64) -> f64 {
    mass / (1.0 + z)
}

/// Redshifted mass of a source at luminosity distance `distance` (Mpc)
pub fn redshifted_mass_at_distance(
    mass: f64,
    distance: f64,
    cosmology: &Cosmology,
    tolerance: f64,
    integrator: &dyn Integrator,
) -> Result<f64> {
    let z = redshift_at_distance(cosmology, distance, tolerance, integrator)?;
    Ok(redshifted_mass(mass, z))
}

/// Chirp mass (m1 m2)^(3/5) / (m1 + m2)^(1/5)
pub fn chirp_mass(m1: f64, m2: f64) -> f64 {
    (m1 * m2).powf(0.6) / (m1 + m2).powf(0.2)
}

/// Component masses (m1 >= m2) from mass ratio q = m2/m1 in (0, 1] and chirp mass
pub fn component_masses(q: f64, chirp_mass: f64) -> Result<(f64, f64)> {
    if !q.is_finite() || q <= 0.0 || q > 1.0 {
        return Err(LumdistError::invalid("mass_ratio", q, "must lie in (0, 1]"));
    }
    if !chirp_mass.is_finite() || chirp_mass <= 0.0 {
        return Err(LumdistError::invalid("chirp_mass", chirp_mass, "must be positive and finite"));
    }
    let scale = chirp_mass * (1.0 + q).powf(0.2);
    Ok((scale * q.powf(-0.6), scale * q.powf(0.4)))
}
