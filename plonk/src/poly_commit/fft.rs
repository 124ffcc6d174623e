use crate::errors::{PlonkError, Result};
use silex_algebra::prelude::*;
use silex_algebra::traits::Domain;

/// Butterfly ordering of a radix-2 FFT pass.
///
/// `Dif` consumes natural order and leaves the result bit-reversed; `Dit`
/// consumes bit-reversed order and leaves the result natural. An inverse FFT
/// run with `Dif` therefore needs a [`bit_reverse`] afterwards, while an
/// inverse FFT run with `Dit` undoes a bit-reversed layout for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decimation {
    /// Decimation in frequency.
    Dif,
    /// Decimation in time.
    Dit,
}

/// A multiplicative subgroup of order a power of two, together with the
/// generator of the double-sized group used for odd-coset evaluations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Radix2Domain<F> {
    /// The size of the subgroup.
    pub cardinality: usize,
    /// The inverse of `cardinality` in the field.
    pub cardinality_inv: F,
    /// A primitive `cardinality`-th root of unity.
    pub generator: F,
    /// The inverse of `generator`.
    pub generator_inv: F,
    /// A primitive `2 * cardinality`-th root of unity whose square is
    /// `generator`; its odd powers enumerate the odd coset.
    pub finer_generator: F,
    /// The inverse of `finer_generator`.
    pub finer_generator_inv: F,
}

impl<F: Domain> Radix2Domain<F> {
    /// Build the smallest power-of-two domain of size at least `min_size`.
    pub fn new(min_size: usize) -> Result<Self> {
        let cardinality = min_size.next_power_of_two();
        let generator = F::root_of_unity(cardinality as u64)
            .ok_or(PlonkError::GroupNotFound(cardinality))?;
        let finer_generator = F::root_of_unity(2 * cardinality as u64)
            .ok_or(PlonkError::GroupNotFound(2 * cardinality))?;
        let cardinality_inv = F::from(cardinality as u64)
            .inv()
            .map_err(PlonkError::Algebra)?;
        let generator_inv = generator.inv().map_err(PlonkError::Algebra)?;
        let finer_generator_inv = finer_generator.inv().map_err(PlonkError::Algebra)?;
        Ok(Self {
            cardinality,
            cardinality_inv,
            generator,
            generator_inv,
            finer_generator,
            finer_generator_inv,
        })
    }

    /// Forward FFT in place. With `coset` set, the polynomial is evaluated on
    /// the odd coset `finer_generator * <generator>` instead of the subgroup.
    pub fn fft(&self, values: &mut [F], decimation: Decimation, coset: bool) {
        debug_assert_eq!(values.len(), self.cardinality);
        match decimation {
            Decimation::Dif => {
                if coset {
                    scale_by_powers(values, &self.finer_generator);
                }
                dif_butterflies(values, &self.generator);
            }
            Decimation::Dit => {
                bit_reverse(values);
                if coset {
                    scale_by_powers(values, &self.finer_generator);
                }
                dif_butterflies(values, &self.generator);
                bit_reverse(values);
            }
        }
    }

    /// Inverse FFT in place, mapping evaluations back to canonical
    /// coefficients. With `coset` set, the evaluations are taken on the odd
    /// coset and the coset shift is removed after the transform.
    pub fn fft_inverse(&self, values: &mut [F], decimation: Decimation, coset: bool) {
        debug_assert_eq!(values.len(), self.cardinality);
        match decimation {
            Decimation::Dif => {
                // natural order in, bit-reversed out
                dif_butterflies(values, &self.generator_inv);
                for v in values.iter_mut() {
                    v.mul_assign(&self.cardinality_inv);
                }
                // a coset unshift would need natural order; the callers
                // always bit-reverse first and unshift themselves, so reject
                debug_assert!(!coset);
            }
            Decimation::Dit => {
                // bit-reversed in, natural order out
                dit_butterflies(values, &self.generator_inv);
                for v in values.iter_mut() {
                    v.mul_assign(&self.cardinality_inv);
                }
                if coset {
                    scale_by_powers(values, &self.finer_generator_inv);
                }
            }
        }
    }
}

/// Reorder a slice by reversing the bits of each index.
pub fn bit_reverse<T>(values: &mut [T]) {
    let n = values.len();
    debug_assert!(n.is_power_of_two());
    let shift = usize::BITS - n.trailing_zeros();
    for i in 0..n {
        let irev = i.reverse_bits() >> shift;
        if irev > i {
            values.swap(i, irev);
        }
    }
}

/// Multiply `values[i]` by `base^i`.
fn scale_by_powers<F: Scalar>(values: &mut [F], base: &F) {
    let mut pow = F::one();
    for v in values.iter_mut() {
        v.mul_assign(&pow);
        pow.mul_assign(base);
    }
}

/// Gentleman-Sande butterflies: natural order in, bit-reversed out.
fn dif_butterflies<F: Scalar>(values: &mut [F], root: &F) {
    let n = values.len();
    let mut m = n / 2;
    while m >= 1 {
        let w_m = root.pow(&[(n / (2 * m)) as u64]);
        for k in (0..n).step_by(2 * m) {
            let mut w = F::one();
            for j in 0..m {
                let t = values[k + j];
                let u = values[k + j + m];
                values[k + j] = t.add(&u);
                values[k + j + m] = t.sub(&u).mul(&w);
                w.mul_assign(&w_m);
            }
        }
        m /= 2;
    }
}

/// Cooley-Tukey butterflies: bit-reversed order in, natural out.
fn dit_butterflies<F: Scalar>(values: &mut [F], root: &F) {
    let n = values.len();
    let mut m = 1;
    while m < n {
        let w_m = root.pow(&[(n / (2 * m)) as u64]);
        for k in (0..n).step_by(2 * m) {
            let mut w = F::one();
            for j in 0..m {
                let t = values[k + j];
                let u = values[k + j + m].mul(&w);
                values[k + j] = t.add(&u);
                values[k + j + m] = t.sub(&u);
                w.mul_assign(&w_m);
            }
        }
        m *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    fn naive_eval(coefs: &[F], point: &F) -> F {
        let mut acc = F::zero();
        let mut pow = F::one();
        for c in coefs.iter() {
            acc.add_assign(&c.mul(&pow));
            pow.mul_assign(point);
        }
        acc
    }

    #[test]
    fn test_bit_reverse() {
        let mut v = vec![0usize, 1, 2, 3, 4, 5, 6, 7];
        bit_reverse(&mut v);
        assert_eq!(v, vec![0usize, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_fft_against_naive_evaluation() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let domain = Radix2Domain::<F>::new(8).unwrap();
        let coefs: Vec<F> = (0..8).map(|_| F::random(&mut prng)).collect();

        let mut evals = coefs.clone();
        domain.fft(&mut evals, Decimation::Dif, false);
        bit_reverse(&mut evals);

        let mut point = F::one();
        for eval in evals.iter() {
            assert_eq!(*eval, naive_eval(&coefs, &point));
            point.mul_assign(&domain.generator);
        }
    }

    #[test]
    fn test_coset_fft_against_naive_evaluation() {
        let mut prng = ChaChaRng::from_seed([1u8; 32]);
        let domain = Radix2Domain::<F>::new(8).unwrap();
        let coefs: Vec<F> = (0..8).map(|_| F::random(&mut prng)).collect();

        let mut evals = coefs.clone();
        domain.fft(&mut evals, Decimation::Dif, true);
        bit_reverse(&mut evals);

        let mut point = domain.finer_generator;
        for eval in evals.iter() {
            assert_eq!(*eval, naive_eval(&coefs, &point));
            point.mul_assign(&domain.generator);
        }
    }

    #[test]
    fn test_fft_round_trip_dif_then_bit_reverse() {
        let mut prng = ChaChaRng::from_seed([2u8; 32]);
        let domain = Radix2Domain::<F>::new(16).unwrap();
        let coefs: Vec<F> = (0..16).map(|_| F::random(&mut prng)).collect();

        let mut buf = coefs.clone();
        domain.fft(&mut buf, Decimation::Dif, false);
        bit_reverse(&mut buf);
        // buf now holds the evaluations in natural order
        let mut back = buf.clone();
        domain.fft_inverse(&mut back, Decimation::Dif, false);
        bit_reverse(&mut back);
        assert_eq!(back, coefs);
    }

    #[test]
    fn test_fft_round_trip_coset_dit_inverse() {
        let mut prng = ChaChaRng::from_seed([3u8; 32]);
        let domain = Radix2Domain::<F>::new(16).unwrap();
        let coefs: Vec<F> = (0..16).map(|_| F::random(&mut prng)).collect();

        // forward on the odd coset leaves a bit-reversed layout that the
        // DIT inverse consumes directly
        let mut buf = coefs.clone();
        domain.fft(&mut buf, Decimation::Dif, true);
        domain.fft_inverse(&mut buf, Decimation::Dit, true);
        assert_eq!(buf, coefs);
    }

    #[test]
    fn test_finer_generator_squares_to_generator() {
        let domain = Radix2Domain::<F>::new(32).unwrap();
        assert_eq!(domain.finer_generator.square(), domain.generator);
    }
}
