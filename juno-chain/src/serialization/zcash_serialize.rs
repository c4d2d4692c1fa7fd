use std::io;

use super::WriteZcashExt;

/// Writes a value in its consensus wire format.
///
/// Block headers, transactions and scripts are hashed in this format, so any
/// change to an implementation changes the genesis hashes. Use serde for
/// everything else.
pub trait ZcashSerialize: Sized {
    /// Writes `self` to `writer`.
    ///
    /// Only the writer can fail: types that implement this trait can't hold
    /// values without an encoding.
    fn zcash_serialize<W: io::Write>(&self, writer: W) -> Result<(), io::Error>;

    /// Returns the serialized bytes of `self`.
    fn zcash_serialize_to_vec(&self) -> Result<Vec<u8>, io::Error> {
        let mut bytes = Vec::new();
        self.zcash_serialize(&mut bytes)?;

        Ok(bytes)
    }
}

/// Vectors are written as a `CompactSize` item count, then each item.
impl<T: ZcashSerialize> ZcashSerialize for Vec<T> {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_compactsize(self.len() as u64)?;
        zcash_serialize_external_count(self, writer)
    }
}

/// Writes a `CompactSize` length, then the raw `bytes`.
pub fn zcash_serialize_bytes<W: io::Write>(bytes: &[u8], mut writer: W) -> Result<(), io::Error> {
    writer.write_compactsize(bytes.len() as u64)?;
    writer.write_all(bytes)
}

/// Writes each of `items` with no count prefix, for fields whose length is
/// fixed by another field.
pub fn zcash_serialize_external_count<W: io::Write, T: ZcashSerialize>(
    items: &[T],
    mut writer: W,
) -> Result<(), io::Error> {
    items
        .iter()
        .try_for_each(|item| item.zcash_serialize(&mut writer))
}
