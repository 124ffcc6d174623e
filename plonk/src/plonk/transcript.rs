use crate::errors::{PlonkError, Result};
use sha2::{Digest, Sha256};
use silex_algebra::prelude::*;

/// A SHA-256 Fiat-Shamir transcript with a fixed, ordered list of challenge
/// labels.
///
/// Each challenge hashes its label, the previous challenge value (when one
/// exists) and the raw bytes bound under the label. Binding after the
/// challenge has been computed is an error, as is computing challenges out
/// of order.
pub struct Transcript {
    challenges: Vec<Challenge>,
}

struct Challenge {
    label: &'static str,
    bindings: Vec<u8>,
    value: Option<[u8; 32]>,
}

impl Transcript {
    /// Create a transcript over the ordered challenge labels.
    pub fn new(labels: &[&'static str]) -> Self {
        Transcript {
            challenges: labels
                .iter()
                .map(|label| Challenge {
                    label,
                    bindings: Vec::new(),
                    value: None,
                })
                .collect(),
        }
    }

    fn position(&self, label: &'static str) -> Result<usize> {
        self.challenges
            .iter()
            .position(|c| c.label == label)
            .ok_or_else(|| PlonkError::Message(format!("unknown challenge label {}", label)))
    }

    /// Absorb bytes under a challenge label.
    pub fn bind(&mut self, label: &'static str, bytes: &[u8]) -> Result<()> {
        let pos = self.position(label)?;
        let challenge = &mut self.challenges[pos];
        if challenge.value.is_some() {
            return Err(PlonkError::Message(format!(
                "challenge {} is already computed",
                label
            )));
        }
        challenge.bindings.extend_from_slice(bytes);
        Ok(())
    }

    /// Derive the challenge bytes for a label. All previous challenges must
    /// have been computed.
    pub fn compute_challenge(&mut self, label: &'static str) -> Result<[u8; 32]> {
        let pos = self.position(label)?;
        if let Some(value) = self.challenges[pos].value {
            return Ok(value);
        }
        if pos > 0 && self.challenges[pos - 1].value.is_none() {
            return Err(PlonkError::Message(format!(
                "challenge {} is computed out of order",
                label
            )));
        }

        let mut hasher = Sha256::new();
        hasher.update(self.challenges[pos].label.as_bytes());
        if pos > 0 {
            // previous challenge value is part of the chain
            hasher.update(self.challenges[pos - 1].value.unwrap());
        }
        hasher.update(&self.challenges[pos].bindings);
        let value: [u8; 32] = hasher.finalize().into();
        self.challenges[pos].value = Some(value);
        Ok(value)
    }

    /// Derive a challenge and reduce it to a field element, interpreting the
    /// digest as a big-endian integer.
    pub fn compute_field_challenge<F: Scalar>(&mut self, label: &'static str) -> Result<F> {
        let bytes = self.compute_challenge(label)?;
        Ok(F::from_be_bytes_mod_order(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    #[test]
    fn test_transcript_is_deterministic() {
        let run = || -> (F, F, F) {
            let mut t = Transcript::new(&["gamma", "alpha", "zeta"]);
            t.bind("gamma", b"commitment-1").unwrap();
            t.bind("gamma", b"commitment-2").unwrap();
            let gamma = t.compute_field_challenge("gamma").unwrap();
            t.bind("alpha", b"z-commitment").unwrap();
            let alpha = t.compute_field_challenge("alpha").unwrap();
            t.bind("zeta", b"h-commitments").unwrap();
            let zeta = t.compute_field_challenge("zeta").unwrap();
            (gamma, alpha, zeta)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_binding_changes_challenges() {
        let mut t1 = Transcript::new(&["gamma"]);
        t1.bind("gamma", b"a").unwrap();
        let mut t2 = Transcript::new(&["gamma"]);
        t2.bind("gamma", b"b").unwrap();
        assert_ne!(
            t1.compute_field_challenge::<F>("gamma").unwrap(),
            t2.compute_field_challenge::<F>("gamma").unwrap()
        );
    }

    #[test]
    fn test_bind_after_compute_fails() {
        let mut t = Transcript::new(&["gamma", "alpha"]);
        t.bind("gamma", b"a").unwrap();
        let _ = t.compute_challenge("gamma").unwrap();
        assert!(t.bind("gamma", b"more").is_err());

        // later challenges still accept bindings
        t.bind("alpha", b"b").unwrap();
        let _ = t.compute_challenge("alpha").unwrap();
    }

    #[test]
    fn test_out_of_order_compute_fails() {
        let mut t = Transcript::new(&["gamma", "alpha"]);
        assert!(t.compute_challenge("alpha").is_err());
    }
}
