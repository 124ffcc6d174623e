use silex_algebra::prelude::*;

/// The ordered challenges of the protocol.
#[derive(Default)]
pub(crate) struct PlonkChallenges<F> {
    challenges: Vec<F>,
}

impl<F: Scalar> PlonkChallenges<F> {
    pub(crate) fn new() -> PlonkChallenges<F> {
        PlonkChallenges {
            challenges: Vec::with_capacity(3),
        }
    }

    pub(crate) fn insert_gamma(&mut self, gamma: F) {
        assert!(self.challenges.is_empty());
        self.challenges.push(gamma);
    }

    pub(crate) fn insert_alpha(&mut self, alpha: F) {
        assert_eq!(self.challenges.len(), 1);
        self.challenges.push(alpha);
    }

    pub(crate) fn insert_zeta(&mut self, zeta: F) {
        assert_eq!(self.challenges.len(), 2);
        self.challenges.push(zeta);
    }

    pub(crate) fn get_gamma(&self) -> &F {
        &self.challenges[0]
    }

    pub(crate) fn get_alpha(&self) -> &F {
        &self.challenges[1]
    }

    pub(crate) fn get_zeta(&self) -> &F {
        &self.challenges[2]
    }
}

/// Invert a batch of field elements with a single field inversion
/// (Montgomery's trick). Zero entries are left untouched.
pub fn batch_invert<F: Scalar>(values: &mut [F]) {
    if values.is_empty() {
        return;
    }
    let mut running = Vec::with_capacity(values.len());
    let mut acc = F::one();
    for v in values.iter() {
        running.push(acc);
        if !v.is_zero() {
            acc.mul_assign(v);
        }
    }
    // the accumulator is a product of non-zero factors
    let mut inv = acc.inv().unwrap();
    for i in (0..values.len()).rev() {
        if values[i].is_zero() {
            continue;
        }
        let tmp = inv.mul(&running[i]);
        inv.mul_assign(&values[i]);
        values[i] = tmp;
    }
}

/// Blind a polynomial in canonical form by adding `Q(X) * (X^rou - 1)` with
/// `deg Q = order`. The coefficient vector is extended to `rou + order + 1`.
pub fn blind_polynomial<R: CryptoRng + RngCore, F: Scalar>(
    prng: &mut R,
    coefs: &mut Vec<F>,
    rou: usize,
    order: usize,
) {
    coefs.resize(rou + order + 1, F::zero());
    for i in 0..order + 1 {
        let b = F::random(prng);
        coefs[i].sub_assign(&b);
        coefs[rou + i].add_assign(&b);
    }
}

/// Evaluate the first Lagrange basis polynomial of a domain of size `n` at
/// an arbitrary point: `L1(x) = (x^n - 1) / (n * (x - 1))`.
pub fn first_lagrange_eval<F: Scalar>(n: usize, point: &F) -> F {
    let x_n = point.pow(&[n as u64]);
    let num = x_n.sub(&F::one());
    let den = point.sub(&F::one()).mul(&F::from(n as u64));
    match den.inv() {
        Ok(inv) => num.mul(&inv),
        // point == 1: L1(1) == 1
        Err(_) => F::one(),
    }
}

/// Evaluate the i-th Lagrange basis polynomial of the subgroup generated by
/// `generator` (size `n`) at an arbitrary point:
/// `Li(x) = w^i * (x^n - 1) / (n * (x - w^i))`.
pub fn lagrange_eval<F: Scalar>(n: usize, generator: &F, i: usize, point: &F) -> F {
    let w_i = generator.pow(&[i as u64]);
    let x_n = point.pow(&[n as u64]);
    let num = x_n.sub(&F::one()).mul(&w_i);
    let den = point.sub(&w_i).mul(&F::from(n as u64));
    match den.inv() {
        Ok(inv) => num.mul(&inv),
        // point == w^i: Li(w^i) == 1
        Err(_) => F::one(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silex_algebra::bls12_381::BLSScalar;
    use silex_algebra::traits::Domain;

    type F = BLSScalar;

    #[test]
    fn test_batch_invert() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let mut values: Vec<F> = (0..17).map(|_| F::random(&mut prng)).collect();
        values[5] = F::zero();
        let mut inverted = values.clone();
        batch_invert(&mut inverted);
        for (v, inv) in values.iter().zip(inverted.iter()) {
            if v.is_zero() {
                assert!(inv.is_zero());
            } else {
                assert_eq!(v.mul(inv), F::one());
            }
        }
    }

    #[test]
    fn test_blinding_preserves_subgroup_evaluations() {
        let mut prng = ChaChaRng::from_seed([1u8; 32]);
        let n = 8usize;
        let root = F::root_of_unity(n as u64).unwrap();
        let coefs: Vec<F> = (0..n).map(|_| F::random(&mut prng)).collect();

        let mut blinded = coefs.clone();
        blind_polynomial(&mut prng, &mut blinded, n, 1);
        assert_eq!(blinded.len(), n + 2);

        let eval = |c: &[F], x: &F| {
            let mut acc = F::zero();
            let mut p = F::one();
            for coef in c {
                acc.add_assign(&coef.mul(&p));
                p.mul_assign(x);
            }
            acc
        };

        let mut point = F::one();
        for _ in 0..n {
            assert_eq!(eval(&coefs, &point), eval(&blinded, &point));
            point.mul_assign(&root);
        }
        // outside the subgroup the evaluations differ
        let outside = F::from(12345u32);
        assert_ne!(eval(&coefs, &outside), eval(&blinded, &outside));
    }

    #[test]
    fn test_lagrange_eval() {
        let n = 8usize;
        let root = F::root_of_unity(n as u64).unwrap();
        // Li(w^j) is 1 at i == j and 0 elsewhere
        for i in 0..n {
            let mut point = F::one();
            for j in 0..n {
                let expected = if i == j { F::one() } else { F::zero() };
                assert_eq!(lagrange_eval(n, &root, i, &point), expected);
                point.mul_assign(&root);
            }
        }
        let zeta = F::from(987654321u64);
        assert_eq!(lagrange_eval(n, &root, 0, &zeta), first_lagrange_eval(n, &zeta));
    }
}
