//! Bitcoin script

use std::{fmt, io};

use crate::serialization::{zcash_serialize_bytes, ZcashSerialize};

use super::opcodes::OpCode;

/// An encoding of a Bitcoin script.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Hash, Default)]
#[cfg_attr(
    any(test, feature = "proptest-impl"),
    derive(proptest_derive::Arbitrary)
)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new Bitcoin script from its raw bytes.
    /// The raw bytes must not contain the length prefix.
    pub fn new(raw_bytes: &[u8]) -> Self {
        Script(raw_bytes.to_vec())
    }

    /// Return the raw bytes of the script without the length prefix.
    ///
    /// # Correctness
    ///
    /// These raw bytes do not have a length prefix.
    /// The Zcash serialization format requires a length prefix; use `zcash_serialize`
    /// to create byte data with a length prefix.
    pub fn as_raw_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Appends a minimal push of `data`, like zcashd's `CScript << vector`.
    ///
    /// # Panics
    ///
    /// If `data` is longer than `u16::MAX` bytes.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();

        if len < OpCode::PushData1 as usize {
            self.0.push(len as u8);
        } else if len <= usize::from(u8::MAX) {
            self.0.push(OpCode::PushData1 as u8);
            self.0.push(len as u8);
        } else {
            let len = u16::try_from(len).expect("script pushes are at most 65535 bytes");
            self.0.push(OpCode::PushData2 as u8);
            self.0.extend(len.to_le_bytes());
        }

        self.0.extend_from_slice(data);
        self
    }

    /// Appends a push of `n` in the `CScriptNum` encoding, like zcashd's
    /// `CScript << CScriptNum(n)`.
    ///
    /// Numbers are little-endian sign-magnitude, with an extra byte when the
    /// top bit of the magnitude is set.
    pub fn push_num(self, n: i64) -> Self {
        let mut bytes = Vec::new();
        let negative = n < 0;
        let mut magnitude = n.unsigned_abs();

        while magnitude > 0 {
            bytes.push((magnitude & 0xff) as u8);
            magnitude >>= 8;
        }

        if let Some(last) = bytes.last_mut() {
            if *last & 0x80 != 0 {
                bytes.push(if negative { 0x80 } else { 0 });
            } else if negative {
                *last |= 0x80;
            }
        }

        self.push_slice(&bytes)
    }

    /// Appends a single opcode.
    pub fn push_opcode(mut self, opcode: OpCode) -> Self {
        self.0.push(opcode as u8);
        self
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Script")
            .field(&hex::encode(&self.0))
            .finish()
    }
}

impl ZcashSerialize for Script {
    fn zcash_serialize<W: io::Write>(&self, writer: W) -> Result<(), io::Error> {
        zcash_serialize_bytes(&self.0, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_num_matches_script_num_encoding() {
        let _init_guard = juno_test::init();

        // The genesis coinbase pushes 0x1f07ffff and 4.
        let script = Script::default().push_num(520_617_983).push_num(4);
        assert_eq!(hex::encode(script.as_raw_bytes()), "04ffff071f0104");

        // The top bit of the magnitude forces a padding byte.
        let script = Script::default().push_num(0x80);
        assert_eq!(hex::encode(script.as_raw_bytes()), "028000");

        let script = Script::default().push_num(-1);
        assert_eq!(hex::encode(script.as_raw_bytes()), "0181");

        // Zero is an empty push.
        let script = Script::default().push_num(0);
        assert_eq!(script.as_raw_bytes(), &[0]);
    }

    #[test]
    fn push_slice_uses_minimal_opcodes() {
        let _init_guard = juno_test::init();

        let script = Script::default().push_slice(&[0xaa; 75]);
        assert_eq!(script.as_raw_bytes()[0], 75);
        assert_eq!(script.as_raw_bytes().len(), 76);

        let script = Script::default().push_slice(&[0xaa; 76]);
        assert_eq!(&script.as_raw_bytes()[..2], &[0x4c, 76]);

        let script = Script::default().push_slice(&[0xaa; 256]);
        assert_eq!(&script.as_raw_bytes()[..3], &[0x4d, 0x00, 0x01]);
    }

    #[test]
    fn script_serializes_with_length_prefix() {
        let _init_guard = juno_test::init();

        let script = Script::new(&[1, 2, 3]);
        let bytes = script
            .zcash_serialize_to_vec()
            .expect("vec serialization is infallible");
        assert_eq!(bytes, vec![3, 1, 2, 3]);
    }
}
