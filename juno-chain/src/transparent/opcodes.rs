//! Script opcodes.

/// Supported opcodes
///
/// <https://github.com/zcash/zcash/blob/8b16094f6672d8268ff25b2d7bddd6a6207873f7/src/script/script.h#L39>
pub enum OpCode {
    // Opcodes used to generate P2SH scripts.
    /// Pushes whether the top two stack items are equal.
    Equal = 0x87,
    /// Replaces the top stack item with its RIPEMD-160 of SHA-256 hash.
    Hash160 = 0xa9,
    /// Pushes the next 20 bytes.
    Push20Bytes = 0x14,
    // Additional opcodes used to generate P2PKH and P2PK scripts.
    /// Duplicates the top stack item.
    Dup = 0x76,
    /// `Equal`, then fails unless the result is true.
    EqualVerify = 0x88,
    /// Checks a signature against a public key.
    CheckSig = 0xac,
    // Longer data pushes.
    /// Pushes the number of bytes given by the next byte.
    PushData1 = 0x4c,
    /// Pushes the number of bytes given by the next two little-endian bytes.
    PushData2 = 0x4d,
}
