use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

/// Wire-format helpers for any [`io::Write`].
pub trait WriteZcashExt: io::Write {
    /// Writes `n` as a Bitcoin `CompactSize`: one byte below `0xfd`,
    /// otherwise a marker byte followed by a little-endian `u16`, `u32` or
    /// `u64`.
    ///
    /// ```rust
    /// use juno_chain::serialization::WriteZcashExt;
    ///
    /// let encode = |n| {
    ///     let mut buf = Vec::new();
    ///     buf.write_compactsize(n).expect("writes to a Vec succeed");
    ///     buf
    /// };
    ///
    /// assert_eq!(encode(0xfc), b"\xfc");
    /// assert_eq!(encode(0xfd), b"\xfd\xfd\x00");
    /// assert_eq!(encode(0x1_0000), b"\xfe\x00\x00\x01\x00");
    /// assert_eq!(encode(u64::MAX), b"\xff\xff\xff\xff\xff\xff\xff\xff\xff");
    /// ```
    fn write_compactsize(&mut self, n: u64) -> io::Result<()> {
        if let Ok(byte) = u8::try_from(n) {
            if byte < 0xfd {
                return self.write_u8(byte);
            }
        }

        if let Ok(short) = u16::try_from(n) {
            self.write_u8(0xfd)?;
            self.write_u16::<LittleEndian>(short)
        } else if let Ok(int) = u32::try_from(n) {
            self.write_u8(0xfe)?;
            self.write_u32::<LittleEndian>(int)
        } else {
            self.write_u8(0xff)?;
            self.write_u64::<LittleEndian>(n)
        }
    }

    /// Writes a fixed 32-byte field, such as a hash or a nonce.
    fn write_32_bytes(&mut self, bytes: &[u8; 32]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

impl<W: io::Write + ?Sized> WriteZcashExt for W {}
