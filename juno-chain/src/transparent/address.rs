//! Transparent Address types.

use std::fmt;

use crate::{
    parameters::address_prefixes::{AddressPrefixes, Base58Type},
    serialization::SerializationError,
    transparent::{opcodes::OpCode, Script},
};

/// Transparent Zcash Addresses
///
/// In Bitcoin a single byte is used for the version field identifying
/// the address type. In Zcash two bytes are used. For addresses on
/// the production network, this and the encoded length cause the first
/// two characters of the Base58Check encoding to be fixed as "t3" for
/// P2SH addresses, and as "t1" for P2PKH addresses.
///
/// The version bytes depend on the network, so an [`Address`] only stores
/// the 20-byte hash, and encoding or decoding takes the network's
/// [`AddressPrefixes`].
///
/// <https://zips.z.cash/protocol/protocol.pdf#transparentaddrencoding>
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub enum Address {
    /// P2SH (Pay to Script Hash) addresses
    PayToScriptHash {
        /// 20 bytes specifying a script hash.
        script_hash: [u8; 20],
    },

    /// P2PKH (Pay to Public Key Hash) addresses
    PayToPublicKeyHash {
        /// 20 bytes specifying a public key hash, which is a RIPEMD-160
        /// hash of a SHA-256 hash of a compressed ECDSA key encoding.
        pub_key_hash: [u8; 20],
    },
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug_struct = f.debug_struct("TransparentAddress");

        match self {
            Address::PayToScriptHash { script_hash } => debug_struct
                .field("script_hash", &hex::encode(script_hash))
                .finish(),
            Address::PayToPublicKeyHash { pub_key_hash } => debug_struct
                .field("pub_key_hash", &hex::encode(pub_key_hash))
                .finish(),
        }
    }
}

impl Address {
    /// Decodes a Base58Check transparent address using a network's prefixes.
    ///
    /// Fails if the checksum is wrong, the payload has the wrong length, or
    /// the version bytes are not this network's P2SH or P2PKH prefix.
    pub fn decode(s: &str, prefixes: &AddressPrefixes) -> Result<Self, SerializationError> {
        let data = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|_| SerializationError::Parse("invalid Base58Check encoding"))?;

        let script_prefix = prefixes.base58(Base58Type::ScriptAddress);
        let pubkey_prefix = prefixes.base58(Base58Type::PubkeyAddress);

        if let Some(hash) = data.strip_prefix(script_prefix) {
            Ok(Address::PayToScriptHash {
                script_hash: hash_bytes(hash)?,
            })
        } else if let Some(hash) = data.strip_prefix(pubkey_prefix) {
            Ok(Address::PayToPublicKeyHash {
                pub_key_hash: hash_bytes(hash)?,
            })
        } else {
            Err(SerializationError::Parse("bad t-addr version/type"))
        }
    }

    /// Encodes this address as Base58Check using a network's prefixes.
    pub fn encode(&self, prefixes: &AddressPrefixes) -> String {
        let prefix = match self {
            Address::PayToScriptHash { .. } => prefixes.base58(Base58Type::ScriptAddress),
            Address::PayToPublicKeyHash { .. } => prefixes.base58(Base58Type::PubkeyAddress),
        };

        let mut payload = prefix.to_vec();
        payload.extend(self.hash_bytes());

        bs58::encode(payload).with_check().into_string()
    }

    /// Returns `true` if the address is `PayToScriptHash`, and `false` if it is
    /// `PayToPublicKeyHash`.
    pub fn is_script_hash(&self) -> bool {
        matches!(self, Address::PayToScriptHash { .. })
    }

    /// Returns the hash bytes for this address, regardless of the address type.
    pub fn hash_bytes(&self) -> [u8; 20] {
        match *self {
            Address::PayToScriptHash { script_hash } => script_hash,
            Address::PayToPublicKeyHash { pub_key_hash } => pub_key_hash,
        }
    }

    /// Returns the standard lock script that pays to this address.
    pub fn script(&self) -> Script {
        let script = Script::default();

        match self {
            Address::PayToScriptHash { .. } => script
                .push_opcode(OpCode::Hash160)
                .push_slice(&self.hash_bytes())
                .push_opcode(OpCode::Equal),
            Address::PayToPublicKeyHash { .. } => script
                .push_opcode(OpCode::Dup)
                .push_opcode(OpCode::Hash160)
                .push_slice(&self.hash_bytes())
                .push_opcode(OpCode::EqualVerify)
                .push_opcode(OpCode::CheckSig),
        }
    }
}

fn hash_bytes(hash: &[u8]) -> Result<[u8; 20], SerializationError> {
    hash.try_into()
        .map_err(|_| SerializationError::Parse("unexpected t-addr payload length"))
}

#[cfg(test)]
mod tests {
    use crate::parameters::NetworkKind;

    use super::*;

    #[test]
    fn decode_script_hash_address() {
        let _init_guard = juno_test::init();

        let prefixes = NetworkKind::Mainnet.address_prefixes();
        let addr = Address::decode("t3JZe8uVCra9T1mot8DC99s7GVsDKFy2Xa2", prefixes)
            .expect("valid mainnet P2SH address");

        let expected: Vec<u8> = (0..20).collect();
        assert!(addr.is_script_hash());
        assert_eq!(addr.hash_bytes().to_vec(), expected);
        assert_eq!(
            hex::encode(addr.script().as_raw_bytes()),
            "a914000102030405060708090a0b0c0d0e0f1011121387"
        );
        assert_eq!(
            addr.encode(prefixes),
            "t3JZe8uVCra9T1mot8DC99s7GVsDKFy2Xa2"
        );
    }

    #[test]
    fn decode_pub_key_hash_address() {
        let _init_guard = juno_test::init();

        let prefixes = NetworkKind::Mainnet.address_prefixes();
        let addr = Address::decode("t1HuKnfjJdtkMA2dMYpPeFgkMeX3pnLFppA", prefixes)
            .expect("valid mainnet P2PKH address");

        assert!(!addr.is_script_hash());
        assert_eq!(
            hex::encode(addr.hash_bytes()),
            "00534b22031af5073583f20f9ae610f8db8d2064"
        );
        assert_eq!(addr.script().as_raw_bytes().len(), 25);
    }

    #[test]
    fn decode_rejects_other_networks_and_bad_checksums() {
        let _init_guard = juno_test::init();

        let main = NetworkKind::Mainnet.address_prefixes();
        let test = NetworkKind::Testnet.address_prefixes();

        // A testnet P2SH address has a different version prefix.
        assert!(Address::decode("t26YqBabLj2kpZUPd3xCBhVHucMSV83GWSw", main).is_err());
        assert!(Address::decode("t26YqBabLj2kpZUPd3xCBhVHucMSV83GWSw", test).is_ok());

        // Changing a character breaks the checksum.
        assert!(Address::decode("t3JZe8uVCra9T1mot8DC99s7GVsDKFy2Xa3", main).is_err());
        assert!(Address::decode("not an address", main).is_err());
    }
}
