//! Transaction IDs.

use std::{fmt, str::FromStr};

use hex::{FromHex, ToHex};

use crate::serialization::{sha256d, BytesInDisplayOrder, SerializationError, ZcashSerialize};

use super::Transaction;

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

/// The SHA-256d digest of a serialized v1 transaction.
///
/// Like block hashes, txids are displayed in reversed byte order.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Hash)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Hash(pub [u8; 32]);

impl From<&Transaction> for Hash {
    fn from(transaction: &Transaction) -> Self {
        let mut writer = sha256d::Writer::default();

        transaction
            .zcash_serialize(&mut writer)
            .expect("hash writers never fail");

        Hash(writer.finish())
    }
}

impl BytesInDisplayOrder for Hash {
    fn bytes_in_serialized_order(&self) -> [u8; 32] {
        self.0
    }

    fn from_bytes_in_serialized_order(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.bytes_in_display_order().encode_hex::<String>())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "transaction::Hash(\"{self}\")")
    }
}

impl FromStr for Hash {
    type Err = SerializationError;

    /// Parses a txid in display order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <[u8; 32]>::from_hex(s)
            .map(|bytes| Hash::from_bytes_in_display_order(&bytes))
            .map_err(|_| SerializationError::Parse("txid must be 64 hex digits"))
    }
}
