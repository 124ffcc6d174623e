use crate::frontend::api::Api;
use crate::frontend::variable::{Input, Variable};
use silex_algebra::prelude::*;
use silex_algebra::traits::TECurve;

/// The coefficients of a twisted Edwards curve
/// `a x^2 + y^2 = 1 + d x^2 y^2` over the constraint field.
#[derive(Clone, Debug)]
pub struct CurveParams<F> {
    /// The `a` coefficient.
    pub a: F,
    /// The `d` coefficient.
    pub d: F,
}

impl<F: Scalar> CurveParams<F> {
    /// The parameters of a twisted Edwards companion curve whose base field
    /// is the constraint field.
    pub fn from_curve<T: TECurve<BaseType = F>>() -> Self {
        CurveParams {
            a: T::edwards_a(),
            d: T::edwards_d(),
        }
    }
}

/// A curve point as a pair of circuit variables.
#[derive(Clone, Debug)]
pub struct EdwardsPoint {
    /// The x-coordinate.
    pub x: Variable,
    /// The y-coordinate.
    pub y: Variable,
}

impl EdwardsPoint {
    /// The neutral element (0, 1) as constants.
    pub fn identity<B: Api>(api: &mut B) -> Self {
        EdwardsPoint {
            x: api.zero(),
            y: api.one(),
        }
    }

    /// A point from constant coordinates.
    pub fn constant<B: Api>(api: &mut B, x: B::Field, y: B::Field) -> Self {
        EdwardsPoint {
            x: api.to_variable(Input::Const(x)),
            y: api.to_variable(Input::Const(y)),
        }
    }
}

/// Constrain `p` to lie on the curve.
pub fn assert_on_curve<B: Api>(api: &mut B, p: &EdwardsPoint, params: &CurveParams<B::Field>) {
    let x2 = api.mul(&p.x, &p.x);
    let y2 = api.mul(&p.y, &p.y);
    let lhs_a = api.mul(&x2, Input::Const(params.a));
    let lhs = api.add(&lhs_a, &y2);

    let x2y2 = api.mul(&x2, &y2);
    let dx2y2 = api.mul(&x2y2, Input::Const(params.d));
    let rhs = api.add(&dx2y2, 1u32);

    api.assert_is_equal(Input::from(&lhs), Input::from(&rhs));
}

/// Complete twisted Edwards addition:
/// `x3 = (x1 y2 + y1 x2) / (1 + d x1 x2 y1 y2)`,
/// `y3 = (y1 y2 - a x1 x2) / (1 - d x1 x2 y1 y2)`.
pub fn add_points<B: Api>(
    api: &mut B,
    p: &EdwardsPoint,
    q: &EdwardsPoint,
    params: &CurveParams<B::Field>,
) -> EdwardsPoint {
    let x1y2 = api.mul(&p.x, &q.y);
    let y1x2 = api.mul(&p.y, &q.x);
    let x1x2 = api.mul(&p.x, &q.x);
    let y1y2 = api.mul(&p.y, &q.y);

    let prod = api.mul(&x1x2, &y1y2);
    let dprod = api.mul(&prod, Input::Const(params.d));

    let x_num = api.add(&x1y2, &y1x2);
    let x_den = api.add(&dprod, 1u32);
    let x3 = api.div(&x_num, &x_den);

    let ax1x2 = api.mul(&x1x2, Input::Const(params.a));
    let y_num = api.sub(&y1y2, &ax1x2);
    let y_den = api.sub(1u32, &dprod);
    let y3 = api.div(&y_num, &y_den);

    EdwardsPoint { x: x3, y: y3 }
}

/// Point doubling, through the complete addition.
pub fn double_point<B: Api>(
    api: &mut B,
    p: &EdwardsPoint,
    params: &CurveParams<B::Field>,
) -> EdwardsPoint {
    add_points(api, p, p, params)
}

/// Pick `p` when `s == 1` and `q` when `s == 0`.
pub fn select_point<B: Api>(
    api: &mut B,
    s: &Variable,
    p: &EdwardsPoint,
    q: &EdwardsPoint,
) -> EdwardsPoint {
    EdwardsPoint {
        x: api.select(s, &p.x, &q.x),
        y: api.select(s, &p.y, &q.y),
    }
}

/// Multiply `base` by the little-endian bit decomposition of a scalar,
/// with a double-and-add ladder over `select`.
pub fn scalar_mul<B: Api>(
    api: &mut B,
    bits: &[Variable],
    base: &EdwardsPoint,
    params: &CurveParams<B::Field>,
) -> EdwardsPoint {
    let mut acc = EdwardsPoint::identity(api);
    for bit in bits.iter().rev() {
        acc = double_point(api, &acc, params);
        let with_base = add_points(api, &acc, base, params);
        acc = select_point(api, bit, &with_base, &acc);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::errors::FrontendError;
    use crate::frontend::hints::HintRegistry;
    use crate::frontend::r1cs::R1csBuilder;
    use crate::frontend::sparse::SparseBuilder;
    use crate::frontend::{compile, Assignment, Builder, Circuit, CompileOption, Inputs, Layout};
    use silex_algebra::bls12_381::BLSScalar;
    use silex_algebra::jubjub::{JubjubPoint, JubjubScalar};
    use silex_algebra::traits::CurveGroup;

    type F = BLSScalar;

    /// out == p + q on Jubjub, all coordinates secret except the result.
    struct AddCircuit;

    impl Circuit<F> for AddCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("x3");
            layout.public("y3");
            layout.secret("x1");
            layout.secret("y1");
            layout.secret("x2");
            layout.secret("y2");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let params = CurveParams::from_curve::<JubjubPoint>();
            let p = EdwardsPoint {
                x: inputs.get("x1"),
                y: inputs.get("y1"),
            };
            let q = EdwardsPoint {
                x: inputs.get("x2"),
                y: inputs.get("y2"),
            };
            assert_on_curve(api, &p, &params);
            assert_on_curve(api, &q, &params);
            let sum = add_points(api, &p, &q, &params);
            api.assert_is_equal(Input::from(&sum.x), Input::from(&inputs.get("x3")));
            api.assert_is_equal(Input::from(&sum.y), Input::from(&inputs.get("y3")));
            Ok(())
        }
    }

    fn point_assignment(asg: Assignment<F>, prefix: &str, p: &JubjubPoint) -> Assignment<F> {
        asg.set(&format!("x{}", prefix), p.get_x())
            .set(&format!("y{}", prefix), p.get_y())
    }

    #[test]
    fn test_edwards_addition_matches_native() {
        let mut prng = ChaChaRng::from_seed([21u8; 32]);
        let p = JubjubPoint::random(&mut prng);
        let q = JubjubPoint::random(&mut prng);
        let sum = p.add(&q);

        let mut asg = Assignment::new();
        asg = point_assignment(asg, "1", &p);
        asg = point_assignment(asg, "2", &q);
        asg = point_assignment(asg, "3", &sum);

        let registry = HintRegistry::new();
        let opt = CompileOption::default();

        let cs = compile::<_, R1csBuilder<F>>(&AddCircuit, &opt).unwrap();
        let witness = cs.witness_from(&asg).unwrap();
        cs.solve(&witness, &registry).unwrap();

        let cs = compile::<_, SparseBuilder<F>>(&AddCircuit, &opt).unwrap();
        let witness = cs.witness_from(&asg).unwrap();
        cs.solve(&witness, &registry).unwrap();

        // a point off the curve is rejected
        let mut bad = Assignment::new();
        bad = point_assignment(bad, "1", &p);
        bad = bad.set("x2", F::from(3u32)).set("y2", F::from(4u32));
        bad = point_assignment(bad, "3", &sum);
        let cs = compile::<_, R1csBuilder<F>>(&AddCircuit, &opt).unwrap();
        let witness = cs.witness_from(&bad).unwrap();
        assert!(cs.solve(&witness, &registry).is_err());
    }

    /// out == [k] base for an 8-bit secret scalar.
    struct MulCircuit {
        base: JubjubPoint,
    }

    impl Circuit<F> for MulCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("outx");
            layout.public("outy");
            layout.secret("k");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let params = CurveParams::from_curve::<JubjubPoint>();
            let base = EdwardsPoint::constant(api, self.base.get_x(), self.base.get_y());
            let k = inputs.get("k");
            let bits = api.to_binary(&k, 8);
            let result = scalar_mul(api, &bits, &base, &params);
            api.assert_is_equal(Input::from(&result.x), Input::from(&inputs.get("outx")));
            api.assert_is_equal(Input::from(&result.y), Input::from(&inputs.get("outy")));
            Ok(())
        }
    }

    #[test]
    fn test_scalar_mul_small_scalar() {
        let base = JubjubPoint::get_base();
        let expected = base.mul(&JubjubScalar::from(141u32));

        let asg = Assignment::new()
            .set("k", F::from(141u32))
            .set("outx", expected.get_x())
            .set("outy", expected.get_y());

        let registry = HintRegistry::new();
        let opt = CompileOption::default();
        let circuit = MulCircuit { base };

        let cs = compile::<_, SparseBuilder<F>>(&circuit, &opt).unwrap();
        let witness = cs.witness_from(&asg).unwrap();
        cs.solve(&witness, &registry).unwrap();

        let wrong = Assignment::new()
            .set("k", F::from(140u32))
            .set("outx", expected.get_x())
            .set("outy", expected.get_y());
        let witness = cs.witness_from(&wrong).unwrap();
        assert!(cs.solve(&witness, &registry).is_err());
    }
}
