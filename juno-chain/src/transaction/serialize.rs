//! Contains impls of `ZcashSerialize` for all of the transaction types.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    amount::{Amount, NegativeAllowed},
    serialization::{WriteZcashExt, ZcashSerialize},
};

use super::{Transaction, OVERWINTER_FLAG, SAPLING_VERSION_GROUP_ID};

impl ZcashSerialize for Transaction {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        match self {
            Transaction::V4 {
                inputs,
                outputs,
                lock_time,
                expiry_height,
            } => {
                writer.write_u32::<LittleEndian>(self.version() | OVERWINTER_FLAG)?;
                writer.write_u32::<LittleEndian>(SAPLING_VERSION_GROUP_ID)?;
                inputs.zcash_serialize(&mut writer)?;
                outputs.zcash_serialize(&mut writer)?;
                writer.write_u32::<LittleEndian>(*lock_time)?;
                writer.write_u32::<LittleEndian>(expiry_height.0)?;

                // valueBalanceSapling
                Amount::<NegativeAllowed>::zero().zcash_serialize(&mut writer)?;
                // vShieldedSpend, vShieldedOutput, vJoinSplit
                writer.write_compactsize(0)?;
                writer.write_compactsize(0)?;
                writer.write_compactsize(0)?;
                // With no spends, outputs or JoinSplits, there is no
                // JoinSplit signature and no binding signature.
            }
        }

        Ok(())
    }
}
