use crate::frontend::api::Api;
use crate::frontend::variable::{Input, Variable};
use crate::gadgets::mimc::Mimc;
use silex_algebra::prelude::*;

/// Constrain a Merkle authentication path over MiMC: recompute the root
/// from the leaf, the sibling hashes and the direction bits (1 means the
/// current node is the right child), and bind it to `root`.
pub fn assert_merkle_path<B: Api>(
    api: &mut B,
    mimc: &Mimc<B::Field>,
    root: &Variable,
    leaf: &Variable,
    siblings: &[Variable],
    directions: &[Variable],
) {
    assert_eq!(
        siblings.len(),
        directions.len(),
        "one direction bit per sibling"
    );
    let mut current = leaf.clone();
    for (sibling, direction) in siblings.iter().zip(directions.iter()) {
        let left = api.select(direction, sibling, &current);
        let right = api.select(direction, &current, sibling);
        current = mimc.hash(api, &[left, right]);
    }
    api.assert_is_equal(Input::from(&current), Input::from(root));
}

/// Recompute a Merkle root outside the circuit; `directions[i]` set means
/// the running node is the right child at level i.
pub fn merkle_root_native<F: Scalar>(
    mimc: &Mimc<F>,
    leaf: F,
    siblings: &[F],
    directions: &[bool],
) -> F {
    let mut current = leaf;
    for (sibling, is_right) in siblings.iter().zip(directions.iter()) {
        current = if *is_right {
            mimc.hash_native(&[*sibling, current])
        } else {
            mimc.hash_native(&[current, *sibling])
        };
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::errors::FrontendError;
    use crate::frontend::hints::HintRegistry;
    use crate::frontend::sparse::SparseBuilder;
    use crate::frontend::{compile, Assignment, Builder, Circuit, CompileOption, Inputs, Layout};
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    const DEPTH: usize = 4;

    /// Membership of a secret leaf under a public root.
    struct MerkleCircuit;

    impl Circuit<F> for MerkleCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("root");
            layout.secret("leaf");
            for i in 0..DEPTH {
                layout.secret(&format!("sibling{}", i));
                layout.secret(&format!("dir{}", i));
            }
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let mimc = Mimc::new();
            let root = inputs.get("root");
            let leaf = inputs.get("leaf");
            let siblings: Vec<_> = (0..DEPTH)
                .map(|i| inputs.get(&format!("sibling{}", i)))
                .collect();
            let directions: Vec<_> = (0..DEPTH)
                .map(|i| inputs.get(&format!("dir{}", i)))
                .collect();
            assert_merkle_path(api, &mimc, &root, &leaf, &siblings, &directions);
            Ok(())
        }
    }

    #[test]
    fn test_merkle_path() {
        let mimc = Mimc::<F>::new();
        let leaf = F::from(77u32);
        let siblings: Vec<F> = (0..DEPTH as u32).map(|i| F::from(1000 + i)).collect();
        let directions = [false, true, true, false];
        let root = merkle_root_native(&mimc, leaf, &siblings, &directions);

        let mut asg = Assignment::new().set("root", root).set("leaf", leaf);
        for i in 0..DEPTH {
            asg = asg
                .set(&format!("sibling{}", i), siblings[i])
                .set(&format!("dir{}", i), F::from(directions[i] as u64));
        }

        let registry = HintRegistry::new();
        let cs = compile::<_, SparseBuilder<F>>(&MerkleCircuit, &CompileOption::default()).unwrap();
        let witness = cs.witness_from(&asg).unwrap();
        cs.solve(&witness, &registry).unwrap();

        // a wrong leaf does not open to the root
        let bad = asg.set("leaf", F::from(78u32));
        let witness = cs.witness_from(&bad).unwrap();
        assert!(cs.solve(&witness, &registry).is_err());
    }
}
