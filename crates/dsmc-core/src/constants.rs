//! Physical constants (SI units).

/// Boltzmann constant, J/K (2019 SI exact value).
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Avogadro constant, 1/mol (2019 SI exact value).
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Smallest value treated as physically non-zero by degeneracy guards
/// (degrees of freedom, relative speeds, temperatures).
pub const SMALL: f64 = 1.0e-15;
