//! Serialization for blocks and block headers.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::serialization::{WriteZcashExt, ZcashSerialize};

use super::{Block, Header};

impl ZcashSerialize for Header {
    #[allow(clippy::unwrap_in_result)]
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_u32::<LittleEndian>(self.version)?;
        self.previous_block_hash.zcash_serialize(&mut writer)?;
        writer.write_all(&self.merkle_root.0[..])?;
        writer.write_all(&self.commitment_bytes[..])?;
        writer.write_u32::<LittleEndian>(
            self.time
                .timestamp()
                .try_into()
                .expect("deserialized and generated timestamps are u32 values"),
        )?;
        self.difficulty_threshold.zcash_serialize(&mut writer)?;
        writer.write_32_bytes(&self.nonce)?;
        self.solution.zcash_serialize(&mut writer)?;
        Ok(())
    }
}

impl ZcashSerialize for Block {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        self.header.zcash_serialize(&mut writer)?;
        writer.write_compactsize(self.transactions.len() as u64)?;
        for transaction in &self.transactions {
            transaction.zcash_serialize(&mut writer)?;
        }
        Ok(())
    }
}
