// Physical constants and numerical defaults
// Units follow the usual distance-ladder conventions:
// - Distance: megaparsec (Mpc)
// - Hubble constant: km/s/Mpc
// - Speed of light: m/s (converted to km/s where it meets H0)

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Metres per kilometre, for converting c into the units of H0
pub const METRES_PER_KM: f64 = 1000.0;

/// Present-day Hubble constant (km/s/Mpc)
pub const HUBBLE_CONSTANT: f64 = 67.9;

/// Matter density parameter
pub const OMEGA_MATTER: f64 = 0.3065;

/// Dark energy density parameter (flat universe: 1 - OMEGA_MATTER)
pub const OMEGA_LAMBDA: f64 = 0.6935;

/// Redshift the default computation integrates up to
pub const TARGET_REDSHIFT: f64 = 1.0;

/// Fixed Riemann step in redshift
pub const STEP_SIZE: f64 = 1e-9;

/// Most samples a fixed-step Riemann sum may take; the default run needs 1e9 + 1
pub const MAX_RIEMANN_SAMPLES: u64 = 1_000_000_000_000;

/// Default relative tolerance for adaptive Simpson quadrature
pub const SIMPSON_TOLERANCE: f64 = 1e-12;

/// Recursion cap for adaptive Simpson quadrature
pub const SIMPSON_MAX_DEPTH: u32 = 48;

/// Integrand evaluation budget for adaptive Simpson quadrature
pub const SIMPSON_MAX_EVALUATIONS: u64 = 10_000_000;

/// Initial bracket for redshift inversion
pub const BISECTION_BRACKET: (f64, f64) = (1.0, 10.0);

/// Upper bound on bracket expansions plus bisection halvings
pub const MAX_BISECTION_ITERATIONS: u64 = 200;
