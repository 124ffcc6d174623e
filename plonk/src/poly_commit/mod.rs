/// Module for the radix-2 FFT evaluation domains.
pub mod fft;

/// Module for dense polynomials over a prime field.
pub mod field_polynomial;

/// Module for the KZG polynomial commitment scheme.
pub mod kzg_poly_com;

/// Module for the polynomial commitment traits.
pub mod pcs;
