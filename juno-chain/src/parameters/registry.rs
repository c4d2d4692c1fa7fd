//! The network parameter registry, and the process-wide network selection.
//!
//! All three networks are built and checked when the registry is created.
//! A network is then selected exactly once, and every later reader gets the
//! same parameters.

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::OnceCell;

use super::{
    config::{Config, RegtestConfig},
    Network, NetworkKind, NetworkParams, ParamsError, RegtestParams,
};

/// Owns the parameters of every network, and the selected network.
#[derive(Debug)]
pub struct Registry {
    mainnet: Arc<NetworkParams>,
    testnet: Arc<NetworkParams>,

    /// The latest regtest snapshot.
    ///
    /// Updates replace the whole snapshot, so readers holding an older
    /// snapshot never see a partial update.
    regtest: RwLock<Arc<RegtestParams>>,

    selected: OnceCell<NetworkKind>,
}

impl Registry {
    /// Builds and checks the parameters of every network, in a fixed order.
    ///
    /// An error means the compiled-in tables are corrupt. The process must
    /// not start.
    #[instrument]
    pub fn new() -> Result<Self, ParamsError> {
        let mainnet = Arc::new(NetworkParams::mainnet()?);
        let testnet = Arc::new(NetworkParams::testnet()?);
        let regtest = Arc::new(RegtestParams::new()?);

        info!(
            mainnet_genesis = %mainnet.genesis_hash(),
            testnet_genesis = %testnet.genesis_hash(),
            regtest_genesis = %regtest.genesis_hash(),
            "built network parameters"
        );

        Ok(Self {
            mainnet,
            testnet,
            regtest: RwLock::new(regtest),
            selected: OnceCell::new(),
        })
    }

    /// Selects the network called `name`, and returns its parameters.
    ///
    /// Only `main`, `test` and `regtest` are recognised. A network can only be
    /// selected once.
    #[instrument(skip(self))]
    pub fn select_network(&self, name: &str) -> Result<Network, ParamsError> {
        let kind: NetworkKind = name.parse()?;

        self.select(kind)
    }

    /// Selects the configured network, after applying the regtest options if
    /// regtest is selected.
    #[instrument(skip(self, config), fields(network = %config.network))]
    pub fn select_with_config(&self, config: &Config) -> Result<Network, ParamsError> {
        self.check_unselected()?;

        if config.network == NetworkKind::Regtest {
            self.try_update_regtest(|regtest| regtest.apply_config(&config.regtest))?;
        } else if config.regtest != RegtestConfig::default() {
            warn!(
                network = %config.network,
                "ignoring regtest options, because regtest is not selected"
            );
        }

        self.select(config.network)
    }

    fn check_unselected(&self) -> Result<(), ParamsError> {
        match self.selected.get() {
            Some(selected) => Err(ParamsError::AlreadySelected(selected.id())),
            None => Ok(()),
        }
    }

    fn select(&self, kind: NetworkKind) -> Result<Network, ParamsError> {
        self.selected
            .set(kind)
            .map_err(|_| ParamsError::AlreadySelected(self.selected_id()))?;

        info!(network = %kind, "selected network");

        Ok(self.network(kind))
    }

    fn selected_id(&self) -> &'static str {
        self.selected.get().map_or("none", NetworkKind::id)
    }

    /// Returns the selected network, or `None` if no network was selected.
    pub fn selected(&self) -> Option<NetworkKind> {
        self.selected.get().copied()
    }

    /// Returns the parameters of the selected network.
    ///
    /// # Panics
    ///
    /// If no network was selected.
    pub fn current(&self) -> Network {
        self.try_current()
            .expect("a network must be selected before reading its parameters")
    }

    /// Returns the parameters of the selected network, or an error if no
    /// network was selected.
    pub fn try_current(&self) -> Result<Network, ParamsError> {
        let kind = self.selected().ok_or(ParamsError::NotSelected)?;

        Ok(self.network(kind))
    }

    /// Returns the parameters of the network called `name`, without changing
    /// the selection.
    pub fn lookup(&self, name: &str) -> Result<Network, ParamsError> {
        let kind: NetworkKind = name.parse()?;

        Ok(self.network(kind))
    }

    /// Returns the parameters of `kind`.
    ///
    /// Regtest returns the latest snapshot.
    pub fn network(&self, kind: NetworkKind) -> Network {
        match kind {
            NetworkKind::Mainnet => Network::Mainnet(self.mainnet.clone()),
            NetworkKind::Testnet => Network::Testnet(self.testnet.clone()),
            NetworkKind::Regtest => Network::Regtest(self.regtest()),
        }
    }

    /// Returns the latest regtest snapshot.
    pub fn regtest(&self) -> Arc<RegtestParams> {
        // Updates swap whole snapshots, so a poisoned lock still holds a
        // complete snapshot.
        self.regtest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Updates the regtest parameters, and returns the result of `update`.
    ///
    /// `update` changes a copy of the latest snapshot, which then replaces it.
    pub fn update_regtest<R>(&self, update: impl FnOnce(&mut RegtestParams) -> R) -> R {
        let mut regtest = self.regtest.write().unwrap_or_else(PoisonError::into_inner);

        let mut updated = RegtestParams::clone(&regtest);
        let result = update(&mut updated);
        *regtest = Arc::new(updated);

        result
    }

    /// Updates the regtest parameters, keeping the latest snapshot if
    /// `update` fails.
    pub fn try_update_regtest<E>(
        &self,
        update: impl FnOnce(&mut RegtestParams) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut regtest = self.regtest.write().unwrap_or_else(PoisonError::into_inner);

        let mut updated = RegtestParams::clone(&regtest);
        update(&mut updated)?;
        *regtest = Arc::new(updated);

        Ok(())
    }
}

/// The process-wide registry.
static REGISTRY: OnceCell<Registry> = OnceCell::new();

/// Builds the process-wide registry, if it has not been built yet.
///
/// Call this at startup, so corrupt parameter tables stop the process before
/// any work starts.
pub fn init() -> Result<&'static Registry, ParamsError> {
    REGISTRY.get_or_try_init(Registry::new)
}

/// Selects the process-wide network called `name`.
///
/// See [`Registry::select_network`].
pub fn select_network(name: &str) -> Result<Network, ParamsError> {
    init()?.select_network(name)
}

/// Selects the process-wide network using `config`.
///
/// See [`Registry::select_with_config`].
pub fn select_with_config(config: &Config) -> Result<Network, ParamsError> {
    init()?.select_with_config(config)
}

/// Returns the parameters of the process-wide selected network.
///
/// # Panics
///
/// If no network was selected.
pub fn current() -> Network {
    try_current().expect("a network must be selected before reading its parameters")
}

/// Returns the parameters of the process-wide selected network, or an error
/// if no network was selected.
pub fn try_current() -> Result<Network, ParamsError> {
    REGISTRY
        .get()
        .ok_or(ParamsError::NotSelected)?
        .try_current()
}

/// Returns the parameters of the network called `name`, without changing the
/// process-wide selection.
pub fn lookup(name: &str) -> Result<Network, ParamsError> {
    init()?.lookup(name)
}

/// Updates the process-wide regtest parameters.
///
/// See [`Registry::update_regtest`].
pub fn update_regtest<R>(update: impl FnOnce(&mut RegtestParams) -> R) -> Result<R, ParamsError> {
    Ok(init()?.update_regtest(update))
}
