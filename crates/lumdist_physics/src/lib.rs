pub mod cosmology;
pub mod distance;
pub mod integrate;
pub mod inversion;

pub use distance::{comoving_distance, luminosity_distance, luminosity_distance_with};
pub use integrate::{AdaptiveSimpson, FixedStepRiemann, Integrator};
