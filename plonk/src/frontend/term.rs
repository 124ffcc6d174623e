use crate::frontend::coeffs::CoeffId;
use crate::frontend::VarIndex;

/// Visibility of a wire variable.
///
/// `Virtual` is the ONE-wire sentinel: a term on the virtual wire
/// contributes `coefficient * 1`, i.e. a constant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    /// A public input wire.
    Public,
    /// A secret input wire.
    Secret,
    /// An internal wire allocated by the builder.
    Internal,
    /// The ONE-wire sentinel.
    Virtual,
}

impl Visibility {
    fn from_bits(bits: u64) -> Visibility {
        match bits {
            0 => Visibility::Public,
            1 => Visibility::Secret,
            2 => Visibility::Internal,
            3 => Visibility::Virtual,
            _ => unreachable!("invalid visibility bits"),
        }
    }

    fn to_bits(self) -> u64 {
        match self {
            Visibility::Public => 0,
            Visibility::Secret => 1,
            Visibility::Internal => 2,
            Visibility::Virtual => 3,
        }
    }
}

const COEFF_BITS: u32 = 30;
const WIRE_BITS: u32 = 31;
const COEFF_MASK: u64 = (1 << COEFF_BITS) - 1;
const WIRE_MASK: u64 = (1 << WIRE_BITS) - 1;

/// A packed triple (variable id, coefficient id, visibility), encoded in a
/// single u64: coefficient id in the low 30 bits, wire id in the next 31,
/// visibility in the top 3.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term(u64);

impl Term {
    /// Pack a term.
    pub fn pack(wire: VarIndex, coeff: CoeffId, visibility: Visibility) -> Term {
        assert!(coeff as u64 <= COEFF_MASK, "coefficient pool overflow");
        assert!(wire as u64 <= WIRE_MASK, "wire index overflow");
        Term(
            (coeff as u64)
                | ((wire as u64) << COEFF_BITS)
                | (visibility.to_bits() << (COEFF_BITS + WIRE_BITS)),
        )
    }

    /// Unpack into (coefficient id, wire id, visibility).
    pub fn unpack(self) -> (CoeffId, VarIndex, Visibility) {
        (self.coeff_id(), self.wire_id(), self.visibility())
    }

    /// The coefficient id of the term.
    pub fn coeff_id(self) -> CoeffId {
        (self.0 & COEFF_MASK) as CoeffId
    }

    /// The wire id of the term, local to its visibility class.
    pub fn wire_id(self) -> VarIndex {
        ((self.0 >> COEFF_BITS) & WIRE_MASK) as VarIndex
    }

    /// The visibility of the term.
    pub fn visibility(self) -> Visibility {
        Visibility::from_bits(self.0 >> (COEFF_BITS + WIRE_BITS))
    }

    /// Return the same wire with another coefficient.
    pub fn with_coeff(self, coeff: CoeffId) -> Term {
        Term::pack(self.wire_id(), coeff, self.visibility())
    }

    /// The (visibility, wire id) pair identifying the underlying wire.
    pub fn wire_key(self) -> (Visibility, VarIndex) {
        (self.visibility(), self.wire_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let cases = [
            (0usize, 0usize, Visibility::Public),
            (1, 2, Visibility::Secret),
            (1234, 5678, Visibility::Internal),
            (0, 3, Visibility::Virtual),
            ((1usize << 31) - 1, (1usize << 30) - 1, Visibility::Internal),
        ];
        for (wire, coeff, vis) in cases {
            let t = Term::pack(wire, coeff, vis);
            assert_eq!(t.unpack(), (coeff, wire, vis));
        }
    }

    #[test]
    fn test_with_coeff() {
        let t = Term::pack(7, 3, Visibility::Secret);
        let u = t.with_coeff(11);
        assert_eq!(u.wire_id(), 7);
        assert_eq!(u.coeff_id(), 11);
        assert_eq!(u.visibility(), Visibility::Secret);
    }

    #[test]
    #[should_panic(expected = "wire index overflow")]
    fn test_wire_overflow_panics() {
        let _ = Term::pack(1usize << 31, 0, Visibility::Internal);
    }
}
