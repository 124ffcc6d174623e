use crate::poly_commit::fft::{bit_reverse, Decimation, Radix2Domain};
use silex_algebra::prelude::*;
use silex_algebra::traits::Domain;

/// A dense polynomial over a prime field, low-order coefficient first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpPolynomial<F> {
    /// Coefficients of the polynomial.
    pub coefs: Vec<F>,
}

impl<F: Scalar> FpPolynomial<F> {
    /// Return the polynomial coefficients as a slice.
    pub fn get_coefs_ref(&self) -> &[F] {
        self.coefs.as_slice()
    }

    /// Return the constant zero polynomial.
    pub fn zero() -> Self {
        Self::from_coefs(vec![F::zero()])
    }

    /// Return the constant one polynomial.
    pub fn one() -> Self {
        Self::from_coefs(vec![F::one()])
    }

    /// Build a polynomial from the coefficient vector, low-order coefficient
    /// first. High-order zero coefficients are trimmed.
    pub fn from_coefs(coefs: Vec<F>) -> Self {
        let mut p = FpPolynomial { coefs };
        p.trim_coefs();
        p
    }

    /// Return a polynomial with `degree + 1` uniformly random coefficients.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R, degree: usize) -> FpPolynomial<F> {
        let mut coefs = Vec::with_capacity(degree + 1);
        for _ in 0..degree + 1 {
            coefs.push(F::random(prng));
        }
        Self::from_coefs(coefs)
    }

    /// Remove high-degree zero coefficients.
    fn trim_coefs(&mut self) {
        while self.coefs.len() > 1 && self.coefs.last().unwrap().is_zero() {
            // safe unwrap
            self.coefs.pop().unwrap(); // safe unwrap
        }
    }

    /// Return the degree of the polynomial.
    pub fn degree(&self) -> usize {
        if self.coefs.is_empty() {
            0
        } else {
            self.coefs.len() - 1
        }
    }

    /// Test if the polynomial is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coefs[0].is_zero()
    }

    /// Evaluate the polynomial at a point.
    pub fn eval(&self, point: &F) -> F {
        let mut result = F::zero();
        let mut variable = F::one();
        for coef in self.coefs.iter() {
            let mut a = variable;
            a.mul_assign(coef);
            result.add_assign(&a);
            variable.mul_assign(point);
        }
        result
    }

    /// Add another polynomial to self.
    pub fn add_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.add_assign(other_coef);
        }
        let n = self.coefs.len();
        if n < other.coefs.len() {
            self.coefs.extend_from_slice(&other.coefs[n..]);
        }
        self.trim_coefs();
    }

    /// Return the sum of self and another polynomial.
    pub fn add(&self, other: &Self) -> Self {
        let mut res = self.clone();
        res.add_assign(other);
        res
    }

    /// Subtract another polynomial from self.
    pub fn sub_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.sub_assign(other_coef);
        }
        let n = self.coefs.len();
        if n < other.coefs.len() {
            for other_coef in other.coefs[n..].iter() {
                self.coefs.push(other_coef.neg());
            }
        }
        self.trim_coefs();
    }

    /// Return the difference of self and another polynomial.
    pub fn sub(&self, other: &Self) -> Self {
        let mut res = self.clone();
        res.sub_assign(other);
        res
    }

    /// Negate the polynomial.
    pub fn neg_assign(&mut self) {
        for coef in self.coefs.iter_mut() {
            *coef = coef.neg();
        }
    }

    /// Return the negation of the polynomial.
    pub fn neg(&self) -> Self {
        let mut res = self.clone();
        res.neg_assign();
        res
    }

    /// Multiply the polynomial by a scalar.
    pub fn mul_scalar_assign(&mut self, scalar: &F) {
        for coef in self.coefs.iter_mut() {
            coef.mul_assign(scalar);
        }
        self.trim_coefs();
    }

    /// Return the polynomial multiplied by a scalar.
    pub fn mul_scalar(&self, scalar: &F) -> Self {
        let mut res = self.clone();
        res.mul_scalar_assign(scalar);
        res
    }

    /// Divide self by `divisor`, returning the quotient and the remainder.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");
        let d = divisor.degree();
        if self.degree() < d {
            return (Self::zero(), self.clone());
        }
        // lead coefficient is non-zero after trimming
        let lead_inv = divisor.coefs[d].inv().unwrap();

        let mut rem = self.coefs.clone();
        let mut quo = vec![F::zero(); self.degree() - d + 1];
        for i in (d..rem.len()).rev() {
            let q = rem[i].mul(&lead_inv);
            if q.is_zero() {
                continue;
            }
            quo[i - d] = q;
            for (j, div_coef) in divisor.coefs.iter().enumerate() {
                let t = q.mul(div_coef);
                rem[i - d + j].sub_assign(&t);
            }
        }
        rem.truncate(d.max(1));
        (Self::from_coefs(quo), Self::from_coefs(rem))
    }
}

impl<F: Domain> FpPolynomial<F> {
    /// Interpolate the polynomial taking the given values on the domain, in
    /// the natural order of the subgroup.
    pub fn ffti(domain: &Radix2Domain<F>, values: &[F]) -> Self {
        let mut coefs = values.to_vec();
        coefs.resize(domain.cardinality, F::zero());
        domain.fft_inverse(&mut coefs, Decimation::Dif, false);
        bit_reverse(&mut coefs);
        Self::from_coefs(coefs)
    }

    /// Evaluate the polynomial on the whole domain, in the natural order of
    /// the subgroup.
    pub fn fft(&self, domain: &Radix2Domain<F>) -> Vec<F> {
        let mut evals = self.coefs.clone();
        evals.resize(domain.cardinality, F::zero());
        domain.fft(&mut evals, Decimation::Dif, false);
        bit_reverse(&mut evals);
        evals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    #[test]
    fn test_from_coefs_trims() {
        let one = F::one();
        let zero = F::zero();
        let p = FpPolynomial::from_coefs(vec![one, zero, one, zero, zero]);
        assert_eq!(p.degree(), 2);
        let q = FpPolynomial::from_coefs(vec![one, zero, one]);
        assert_eq!(p, q);
    }

    #[test]
    fn test_eval() {
        let one = F::one();
        let two = one.add(&one);
        let five = two.add(&two).add(&one);
        // p(X) = 1 + X^2
        let p = FpPolynomial::from_coefs(vec![one, F::zero(), one]);
        assert_eq!(p.eval(&F::zero()), one);
        assert_eq!(p.eval(&one), two);
        assert_eq!(p.eval(&two), five);
    }

    #[test]
    fn test_div_rem() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let a = FpPolynomial::<F>::random(&mut prng, 10);
        let b = FpPolynomial::<F>::random(&mut prng, 4);
        let (q, r) = a.div_rem(&b);
        assert!(r.degree() < b.degree());

        // a == q * b + r at a random point
        let point = F::random(&mut prng);
        let expected = q.eval(&point).mul(&b.eval(&point)).add(&r.eval(&point));
        assert_eq!(a.eval(&point), expected);
    }

    #[test]
    fn test_exact_division() {
        // (X - 3) divides X^2 - 9
        let three = F::from(3u32);
        let nine = F::from(9u32);
        let a = FpPolynomial::from_coefs(vec![nine.neg(), F::zero(), F::one()]);
        let b = FpPolynomial::from_coefs(vec![three.neg(), F::one()]);
        let (q, r) = a.div_rem(&b);
        assert!(r.is_zero());
        assert_eq!(q, FpPolynomial::from_coefs(vec![three, F::one()]));
    }

    #[test]
    fn test_ffti_interpolates() {
        let mut prng = ChaChaRng::from_seed([4u8; 32]);
        let domain = Radix2Domain::<F>::new(8).unwrap();
        let values: Vec<F> = (0..8).map(|_| F::random(&mut prng)).collect();
        let poly = FpPolynomial::ffti(&domain, &values);

        let mut point = F::one();
        for v in values.iter() {
            assert_eq!(poly.eval(&point), *v);
            point.mul_assign(&domain.generator);
        }
        assert_eq!(&poly.fft(&domain), &values);
    }
}
