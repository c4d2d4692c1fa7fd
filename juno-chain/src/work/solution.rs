//! The RandomX proof-of-work field in the block header.

use std::{fmt, io};

use crate::serialization::{zcash_serialize_bytes, SerializationError, ZcashSerialize};

/// The size of a RandomX solution in bytes.
pub const SOLUTION_SIZE: usize = 32;

/// The RandomX proof-of-work hash committed to by a block header.
///
/// The header stores the hash in the same compactsize-prefixed field that
/// Zcash uses for Equihash solutions, so the serialized header keeps the
/// Zcash layout. The field is always 32 bytes long.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Solution(pub [u8; SOLUTION_SIZE]);

impl Solution {
    /// Returns a [`Solution`] containing the bytes from `solution`.
    /// Returns an error if `solution` is the wrong length.
    pub fn from_bytes(solution: &[u8]) -> Result<Self, SerializationError> {
        let bytes: [u8; SOLUTION_SIZE] = solution
            .try_into()
            .map_err(|_| SerializationError::Parse("incorrect RandomX solution size"))?;

        Ok(Self(bytes))
    }

    /// Returns the proof-of-work hash, in serialized byte order.
    pub fn pow_hash(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Solution")
            .field(&hex::encode(self.0))
            .finish()
    }
}

impl ZcashSerialize for Solution {
    fn zcash_serialize<W: io::Write>(&self, writer: W) -> Result<(), io::Error> {
        zcash_serialize_bytes(&self.0, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_is_length_prefixed() {
        let _init_guard = juno_test::init();

        let solution = Solution([0xab; SOLUTION_SIZE]);
        let bytes = solution
            .zcash_serialize_to_vec()
            .expect("vec serialization is infallible");

        assert_eq!(bytes.len(), 1 + SOLUTION_SIZE);
        assert_eq!(bytes[0], 32);
        assert!(bytes[1..].iter().all(|b| *b == 0xab));
    }

    #[test]
    fn solution_rejects_wrong_length() {
        let _init_guard = juno_test::init();

        assert!(Solution::from_bytes(&[0; 31]).is_err());
        assert!(Solution::from_bytes(&[0; 1344]).is_err());
        assert_eq!(
            Solution::from_bytes(&[7; 32]).expect("32 bytes is a valid solution"),
            Solution([7; 32]),
        );
    }
}
