use silex_algebra::prelude::*;
use std::collections::BTreeMap;

/// Index of an interned coefficient in the pool.
pub type CoeffId = usize;

/// The id of the coefficient 0.
pub const COEFF_ID_ZERO: CoeffId = 0;
/// The id of the coefficient 1.
pub const COEFF_ID_ONE: CoeffId = 1;
/// The id of the coefficient -1.
pub const COEFF_ID_MINUS_ONE: CoeffId = 2;
/// The id of the coefficient 2.
pub const COEFF_ID_TWO: CoeffId = 3;

/// A content-addressed table of field coefficients. Every constraint
/// references coefficients by id; two equal field values always produce the
/// same id. The table is append-only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoeffPool<F> {
    coeffs: Vec<F>,
    // keyed on the canonical little-endian encoding; a BTreeMap keeps the
    // serialized form deterministic
    ids: BTreeMap<Vec<u8>, CoeffId>,
}

impl<F: Scalar> Default for CoeffPool<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Scalar> CoeffPool<F> {
    /// Create a pool seeded with the reserved coefficients {0, 1, -1, 2}.
    pub fn new() -> Self {
        let mut pool = CoeffPool {
            coeffs: Vec::new(),
            ids: BTreeMap::new(),
        };
        let zero = F::zero();
        let one = F::one();
        let minus_one = one.neg();
        let two = one.add(&one);
        assert_eq!(pool.intern(&zero), COEFF_ID_ZERO);
        assert_eq!(pool.intern(&one), COEFF_ID_ONE);
        assert_eq!(pool.intern(&minus_one), COEFF_ID_MINUS_ONE);
        assert_eq!(pool.intern(&two), COEFF_ID_TWO);
        pool
    }

    /// Intern a coefficient, returning its id. Equal values share an id.
    pub fn intern(&mut self, value: &F) -> CoeffId {
        let key = value.to_bytes();
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }
        let id = self.coeffs.len();
        self.coeffs.push(*value);
        self.ids.insert(key, id);
        id
    }

    /// Return the coefficient of an id.
    pub fn get(&self, id: CoeffId) -> F {
        self.coeffs[id]
    }

    /// Intern the negation of the coefficient of `id`.
    pub fn intern_neg(&mut self, id: CoeffId) -> CoeffId {
        match id {
            COEFF_ID_ZERO => COEFF_ID_ZERO,
            COEFF_ID_ONE => COEFF_ID_MINUS_ONE,
            COEFF_ID_MINUS_ONE => COEFF_ID_ONE,
            _ => {
                let neg = self.coeffs[id].neg();
                self.intern(&neg)
            }
        }
    }

    /// Intern the product of the coefficients of two ids.
    pub fn intern_mul(&mut self, a: CoeffId, b: CoeffId) -> CoeffId {
        match (a, b) {
            (COEFF_ID_ZERO, _) | (_, COEFF_ID_ZERO) => COEFF_ID_ZERO,
            (COEFF_ID_ONE, other) | (other, COEFF_ID_ONE) => other,
            _ => {
                let prod = self.coeffs[a].mul(&self.coeffs[b]);
                self.intern(&prod)
            }
        }
    }

    /// The number of interned coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Whether the pool is empty. Never true: the reserved ids are always
    /// present.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    #[test]
    fn test_reserved_ids() {
        let pool = CoeffPool::<F>::new();
        assert_eq!(pool.get(COEFF_ID_ZERO), F::zero());
        assert_eq!(pool.get(COEFF_ID_ONE), F::one());
        assert_eq!(pool.get(COEFF_ID_MINUS_ONE), F::one().neg());
        assert_eq!(pool.get(COEFF_ID_TWO), F::from(2u32));
    }

    #[test]
    fn test_interning_is_stable() {
        let mut pool = CoeffPool::<F>::new();
        let five = F::from(5u32);
        let id = pool.intern(&five);
        assert_eq!(pool.intern(&five), id);
        assert_eq!(pool.get(id), five);

        // equal values built differently share an id
        let also_five = F::from(10u32).mul(&F::from(2u32).inv().unwrap());
        assert_eq!(pool.intern(&also_five), id);

        // reserved values short-circuit
        assert_eq!(pool.intern(&F::one()), COEFF_ID_ONE);
        assert_eq!(pool.intern(&F::one().neg()), COEFF_ID_MINUS_ONE);
    }

    #[test]
    fn test_intern_neg_and_mul() {
        let mut pool = CoeffPool::<F>::new();
        let five = F::from(5u32);
        let id = pool.intern(&five);
        let neg_id = pool.intern_neg(id);
        assert_eq!(pool.get(neg_id), five.neg());
        assert_eq!(pool.intern_neg(COEFF_ID_ONE), COEFF_ID_MINUS_ONE);
        assert_eq!(pool.intern_neg(COEFF_ID_MINUS_ONE), COEFF_ID_ONE);
        assert_eq!(pool.intern_neg(COEFF_ID_ZERO), COEFF_ID_ZERO);

        let prod = pool.intern_mul(id, COEFF_ID_TWO);
        assert_eq!(pool.get(prod), F::from(10u32));
        assert_eq!(pool.intern_mul(id, COEFF_ID_ZERO), COEFF_ID_ZERO);
        assert_eq!(pool.intern_mul(COEFF_ID_ONE, id), id);
    }
}
