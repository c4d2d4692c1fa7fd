//! Wire format of transparent inputs and outputs.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::serialization::{WriteZcashExt, ZcashSerialize};

use super::{Input, OutPoint, Output};

/// A 32-byte txid followed by a little-endian output index.
impl ZcashSerialize for OutPoint {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_32_bytes(&self.hash.0)?;
        writer.write_u32::<LittleEndian>(self.index)
    }
}

impl ZcashSerialize for Input {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        self.outpoint.zcash_serialize(&mut writer)?;
        self.unlock_script.zcash_serialize(&mut writer)?;
        writer.write_u32::<LittleEndian>(self.sequence)
    }
}

/// The value in zatoshis, then the compactsize-prefixed lock script.
impl ZcashSerialize for Output {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        self.value.zcash_serialize(&mut writer)?;
        self.lock_script.zcash_serialize(&mut writer)
    }
}
