//! Hashes are stored little-endian but shown to users big-endian.

/// Converts a 32-byte hash between its wire order and its display order.
///
/// zcashd prints hashes as `uint256` values, so the displayed hex is the
/// serialized bytes reversed.
pub trait BytesInDisplayOrder: Sized {
    /// Returns the bytes in wire order.
    fn bytes_in_serialized_order(&self) -> [u8; 32];

    /// Builds a hash from bytes in wire order.
    fn from_bytes_in_serialized_order(bytes: [u8; 32]) -> Self;

    /// Returns the bytes in display order.
    fn bytes_in_display_order(&self) -> [u8; 32] {
        let mut bytes = self.bytes_in_serialized_order();
        bytes.reverse();
        bytes
    }

    /// Builds a hash from bytes in display order.
    fn from_bytes_in_display_order(bytes: &[u8; 32]) -> Self {
        let mut bytes = *bytes;
        bytes.reverse();
        Self::from_bytes_in_serialized_order(bytes)
    }
}
