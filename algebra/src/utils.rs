//! Byte-level helpers shared by the curve implementations.

/// Shift a little-endian byte vector one bit to the right, i.e. divide the
/// represented integer by two.
pub fn shift_u8_vec(r: &mut Vec<u8>) {
    let mut next = 0u8;
    for e in r.iter_mut().rev() {
        let prev = *e;
        *e = (*e >> 1) | next;
        next = (prev % 2) << 7;
    }
    if let Some(last) = r.last() {
        if *last == 0 && r.len() > 1 {
            r.pop();
        }
    }
}

/// Convert a little-endian byte slice into little-endian u64 limbs.
pub fn u64_limbs_from_bytes(bytes: &[u8]) -> Vec<u64> {
    let mut limbs = Vec::with_capacity(bytes.len() / 8 + 1);
    for chunk in bytes.chunks(8) {
        let mut buf = [0u8; 8];
        buf[..chunk.len()].copy_from_slice(chunk);
        limbs.push(u64::from_le_bytes(buf));
    }
    limbs
}

/// A canonical byte representation, used to route serde through the
/// compressed encodings of scalars and group elements.
pub trait FromToBytes: Sized {
    /// Serialize into the canonical byte representation.
    fn fixed_to_bytes(&self) -> Vec<u8>;
    /// Deserialize from the canonical byte representation.
    fn fixed_from_bytes(bytes: &[u8]) -> Result<Self, crate::errors::AlgebraError>;
}

/// Implement `serde::Serialize` and `serde::Deserialize` for a type that
/// implements [`FromToBytes`].
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_bytes(&$crate::utils::FromToBytes::fixed_to_bytes(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> core::result::Result<$t, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct BytesVisitor;

                impl<'de> serde::de::Visitor<'de> for BytesVisitor {
                    type Value = $t;

                    fn expecting(
                        &self,
                        formatter: &mut core::fmt::Formatter<'_>,
                    ) -> core::fmt::Result {
                        formatter.write_str("a valid byte encoding")
                    }

                    fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<$t, E>
                    where
                        E: serde::de::Error,
                    {
                        <$t as $crate::utils::FromToBytes>::fixed_from_bytes(v)
                            .map_err(serde::de::Error::custom)
                    }

                    fn visit_seq<A>(self, mut seq: A) -> core::result::Result<$t, A::Error>
                    where
                        A: serde::de::SeqAccess<'de>,
                    {
                        let mut bytes = ark_std::vec::Vec::new();
                        while let Some(b) = seq.next_element::<u8>()? {
                            bytes.push(b);
                        }
                        <$t as $crate::utils::FromToBytes>::fixed_from_bytes(&bytes)
                            .map_err(serde::de::Error::custom)
                    }
                }

                deserializer.deserialize_bytes(BytesVisitor)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_u8_vec() {
        let mut v = vec![0u8];
        shift_u8_vec(&mut v);
        assert_eq!(v, vec![0u8]);

        let mut v = vec![1u8];
        shift_u8_vec(&mut v);
        assert_eq!(v, vec![0u8]);

        let mut v = vec![2u8];
        shift_u8_vec(&mut v);
        assert_eq!(v, vec![1u8]);

        // 513 / 2 = 256
        let mut v = vec![1u8, 2u8];
        shift_u8_vec(&mut v);
        assert_eq!(v, vec![0u8, 1u8]);
    }

    #[test]
    fn test_u64_limbs_from_bytes() {
        let bytes = [1u8, 0, 0, 0, 0, 0, 0, 0, 2];
        let limbs = u64_limbs_from_bytes(&bytes);
        assert_eq!(limbs, vec![1u64, 2u64]);
    }
}
