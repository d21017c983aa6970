use crate::config::ConfigError;
use crate::impl_err;
use crate::network::NetworkError;
use crate::router::RouterError;

/// The crate-level error, wrapping the error of each concern.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid mapping configuration: {0}")]
    Config(ConfigError),

    #[error("invalid network: {0}")]
    Network(NetworkError),

    #[error("router failure: {0}")]
    Router(RouterError),
}

impl_err!(ConfigError, Config);
impl_err!(NetworkError, Network);
impl_err!(RouterError, Router);

pub type Result<T> = std::result::Result<T, Error>;
