//! Consensus parameters for each Juno Cash network.
//!
//! There are exactly three networks. Main and test are immutable once built.
//! Regtest can be reparametrized by tests, but only through [`RegtestParams`].

use std::{fmt, net::SocketAddr, ops::Deref, str::FromStr, sync::Arc};

use crate::{
    amount::{Amount, NegativeAllowed},
    block,
};

use super::{
    address_prefixes::{self, AddressPrefixes},
    checkpoint::{CheckpointList, ValuePoolCheckpoint},
    constants::magics,
    genesis::{GenesisBlock, GenesisCommitments, GenesisParams, GENESIS_MERKLE_ROOT},
    ConsensusParams, ParamsError,
};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

mod mainnet;
pub mod regtest;
mod testnet;

pub use regtest::RegtestParams;

/// The three Juno Cash networks.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum NetworkKind {
    /// The production network.
    #[default]
    #[serde(rename = "main")]
    Mainnet,

    /// The public test network.
    #[serde(rename = "test")]
    Testnet,

    /// Local regression test networks.
    #[serde(rename = "regtest")]
    Regtest,
}

impl NetworkKind {
    /// Returns an iterator over the networks, in construction order.
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Mainnet, Self::Testnet, Self::Regtest].into_iter()
    }

    /// Returns the network id string, `main`, `test` or `regtest`.
    pub fn id(&self) -> &'static str {
        match self {
            NetworkKind::Mainnet => "main",
            NetworkKind::Testnet => "test",
            NetworkKind::Regtest => "regtest",
        }
    }

    /// Returns the address and key encoding prefixes of this network.
    pub fn address_prefixes(&self) -> &'static AddressPrefixes {
        match self {
            NetworkKind::Mainnet => &address_prefixes::MAINNET,
            NetworkKind::Testnet => &address_prefixes::TESTNET,
            NetworkKind::Regtest => &address_prefixes::REGTEST,
        }
    }

    /// Returns the message start bytes of this network.
    pub fn magic(&self) -> Magic {
        match self {
            NetworkKind::Mainnet => magics::MAINNET,
            NetworkKind::Testnet => magics::TESTNET,
            NetworkKind::Regtest => magics::REGTEST,
        }
    }

    /// Returns `true` if this network is a testing network.
    pub fn is_a_test_network(&self) -> bool {
        *self != NetworkKind::Mainnet
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NetworkKind {
    type Err = ParamsError;

    /// Parses a network id. Only the exact ids are accepted.
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "main" => Ok(NetworkKind::Mainnet),
            "test" => Ok(NetworkKind::Testnet),
            "regtest" => Ok(NetworkKind::Regtest),
            _ => Err(ParamsError::UnknownNetwork(string.to_owned())),
        }
    }
}

/// A magic number identifying the network.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Magic(pub [u8; 4]);

impl fmt::Debug for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Magic").field(&hex::encode(self.0)).finish()
    }
}

/// A DNS seed for peer discovery.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DnsSeed {
    /// The operator of the seed.
    pub name: &'static str,
    /// The seed hostname.
    pub host: &'static str,
}

/// Node policy defaults that differ between networks.
///
/// These are not consensus rules, but they are tied to the network.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PolicyFlags {
    /// Mining needs at least one connected peer.
    pub mining_requires_peers: bool,
    /// Expensive internal consistency checks are on by default.
    pub default_consistency_checks: bool,
    /// Only standard transactions are relayed and mined.
    pub require_standard: bool,
    /// Blocks are only mined when requested over RPC.
    pub mine_blocks_on_demand: bool,
    /// RPC responses include the deprecated `testnet` field.
    pub testnet_to_be_deprecated_field_rpc: bool,
    /// The wallet must be backed up before it can be used.
    pub require_wallet_backup: bool,
}

/// Every parameter of one network.
///
/// Built once per process, and checked before it is used.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkParams {
    kind: NetworkKind,
    currency_units: &'static str,
    bip44_coin_type: u32,
    magic: Magic,
    default_port: u16,
    prune_after_height: u64,
    address_prefixes: &'static AddressPrefixes,
    dns_seeds: Vec<DnsSeed>,
    fixed_seeds: Vec<SocketAddr>,
    checkpoints: CheckpointList,
    founders_reward_addresses: Vec<String>,
    default_donation_address: Option<&'static str>,
    alert_pub_key: Option<Vec<u8>>,
    policy: PolicyFlags,
    value_pool_checkpoint: Option<ValuePoolCheckpoint>,
    zip209_enabled: bool,
    consensus: ConsensusParams,
    genesis: GenesisBlock,
}

impl NetworkParams {
    /// Builds and checks the production network parameters.
    pub fn mainnet() -> Result<Self, ParamsError> {
        mainnet::params()
    }

    /// Builds and checks the public test network parameters.
    pub fn testnet() -> Result<Self, ParamsError> {
        testnet::params()
    }

    /// Checks the parameters that are not checked during construction.
    ///
    /// Every founders' reward address must decode to a P2SH script, the
    /// consensus tables must be consistent, and the genesis block must be
    /// the first checkpoint.
    pub(crate) fn validate(&self) -> Result<(), ParamsError> {
        let network = self.kind.id();

        self.consensus.validate(network)?;

        for stream in self.consensus.funding_streams.values() {
            stream.validate(&self.consensus)?;
        }

        for disbursement in self.consensus.lockbox_disbursements.values() {
            disbursement.validate(&self.consensus)?;
        }

        let founders_reward = self.founders_reward();
        for address in founders_reward.addresses() {
            founders_reward.script_for(address)?;
        }

        if self.checkpoints.hash(block::Height(0)) != Some(self.genesis.hash()) {
            return Err(ParamsError::InvalidCheckpointList(
                "the genesis checkpoint does not match the genesis hash",
            ));
        }

        Ok(())
    }

    /// Returns which network these parameters are for.
    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    /// Returns the network id string, `main`, `test` or `regtest`.
    pub fn network_id(&self) -> &'static str {
        self.kind.id()
    }

    /// Returns the ticker symbol shown for amounts on this network.
    pub fn currency_units(&self) -> &'static str {
        self.currency_units
    }

    /// Returns the BIP-44 coin type used for key derivation.
    pub fn bip44_coin_type(&self) -> u32 {
        self.bip44_coin_type
    }

    /// Returns the message start bytes.
    pub fn magic(&self) -> Magic {
        self.magic
    }

    /// Returns the default peer-to-peer port.
    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Returns the height below which blocks are never pruned.
    pub fn prune_after_height(&self) -> u64 {
        self.prune_after_height
    }

    /// Returns the address and key encoding prefixes.
    pub fn address_prefixes(&self) -> &'static AddressPrefixes {
        self.address_prefixes
    }

    /// Returns the DNS seeds.
    pub fn dns_seeds(&self) -> &[DnsSeed] {
        &self.dns_seeds
    }

    /// Returns the fixed peer addresses.
    pub fn fixed_seeds(&self) -> &[SocketAddr] {
        &self.fixed_seeds
    }

    /// Returns the hard-coded checkpoints.
    pub fn checkpoints(&self) -> &CheckpointList {
        &self.checkpoints
    }

    /// Returns the legacy founders' reward addresses, in rotation order.
    pub fn founders_reward_addresses(&self) -> &[String] {
        &self.founders_reward_addresses
    }

    /// Returns the address wallets suggest for donations, if the network has
    /// one.
    pub fn default_donation_address(&self) -> Option<&'static str> {
        self.default_donation_address
    }

    /// Returns the public key that signs network alerts, if the network has
    /// one.
    pub fn alert_pub_key(&self) -> Option<&[u8]> {
        self.alert_pub_key.as_deref()
    }

    /// Returns the policy defaults of this network.
    pub fn policy(&self) -> &PolicyFlags {
        &self.policy
    }

    /// Returns the Sprout value pool checkpoint, if the network has one.
    pub fn value_pool_checkpoint(&self) -> Option<&ValuePoolCheckpoint> {
        self.value_pool_checkpoint.as_ref()
    }

    /// Returns `true` if the ZIP-209 Sprout value pool guard is enabled.
    pub fn zip209_enabled(&self) -> bool {
        self.zip209_enabled
    }

    /// Checks the observed Sprout pool balance after the block at `height`
    /// with `hash` against the value pool checkpoint.
    pub fn check_value_pool(
        &self,
        height: block::Height,
        hash: &block::Hash,
        observed: Amount<NegativeAllowed>,
    ) -> Result<(), ParamsError> {
        match &self.value_pool_checkpoint {
            Some(checkpoint) => checkpoint.check(self.zip209_enabled, height, hash, observed),
            None => Ok(()),
        }
    }

    /// Returns the consensus parameters.
    pub fn consensus(&self) -> &ConsensusParams {
        &self.consensus
    }

    /// Returns the genesis block.
    pub fn genesis(&self) -> &GenesisBlock {
        &self.genesis
    }

    /// Returns the hash of the genesis block.
    pub fn genesis_hash(&self) -> block::Hash {
        self.consensus.genesis_hash
    }

    /// Returns these parameters with `addresses` as the founders' reward
    /// addresses. The addresses are not checked.
    #[cfg(test)]
    pub(crate) fn with_founders_reward_addresses(mut self, addresses: &[&str]) -> Self {
        self.founders_reward_addresses = addresses.iter().map(ToString::to_string).collect();
        self
    }
}

impl fmt::Display for NetworkParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

/// Builds the genesis block of `kind` and checks it against `expected_hash`,
/// `expected_header_digest` and the shared genesis merkle root.
fn verified_genesis(
    kind: NetworkKind,
    params: GenesisParams,
    expected_hash: &str,
    expected_header_digest: &str,
) -> Result<GenesisBlock, ParamsError> {
    let expected =
        GenesisCommitments::from_hex(expected_hash, GENESIS_MERKLE_ROOT, expected_header_digest);

    let genesis = params.build();
    genesis.verify(kind.id(), &expected)?;

    Ok(genesis)
}

/// A selected network, with its parameters.
///
/// Mutators are only reachable through the [`Network::Regtest`] variant's
/// [`RegtestParams`].
#[derive(Clone, Debug, PartialEq)]
pub enum Network {
    /// The production network.
    Mainnet(Arc<NetworkParams>),
    /// The public test network.
    Testnet(Arc<NetworkParams>),
    /// A snapshot of the local regression test network.
    Regtest(Arc<RegtestParams>),
}

impl Network {
    /// Returns which network this is.
    pub fn kind(&self) -> NetworkKind {
        match self {
            Network::Mainnet(_) => NetworkKind::Mainnet,
            Network::Testnet(_) => NetworkKind::Testnet,
            Network::Regtest(_) => NetworkKind::Regtest,
        }
    }

    /// Returns the regtest parameters, if this is regtest.
    pub fn as_regtest(&self) -> Option<&RegtestParams> {
        match self {
            Network::Regtest(params) => Some(&**params),
            _ => None,
        }
    }
}

impl Deref for Network {
    type Target = NetworkParams;

    fn deref(&self) -> &NetworkParams {
        match self {
            Network::Mainnet(params) | Network::Testnet(params) => params,
            Network::Regtest(params) => params,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind(), f)
    }
}
