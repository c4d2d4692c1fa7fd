//! Consensus-critical serialization.
//!
//! This module contains the subset of the Zcash wire format needed to encode
//! and hash the genesis blocks: compactsize-prefixed vectors, little-endian
//! integers, and SHA-256d digests.

mod display_order;
mod error;
mod write_zcash;
mod zcash_serialize;

pub mod sha256d;

pub use display_order::BytesInDisplayOrder;
pub use error::SerializationError;
pub use write_zcash::WriteZcashExt;
pub use zcash_serialize::{zcash_serialize_bytes, zcash_serialize_external_count, ZcashSerialize};
