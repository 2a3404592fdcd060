//! A client for the Web Aurion API.
//!
//! Web Aurion is not publicly available: it only exposes "favorites", queries registered by the
//! administrator of an instance, which are executed with an account holding special permissions.

pub mod base;
pub mod modules;
pub mod utils;

pub use base::client::AurionClient;
pub use base::config::{AurionConfig, Favorites};

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, thiserror::Error)]
pub enum Error {
    /// The client can't be used with the given configuration (e.g. no URL)
    #[error("Invalid configuration! ({0})")]
    Configuration(String),
    /// Anything that went wrong during the HTTP exchange
    #[error("Network error! ({0})")]
    Network(String),
    /// Happens if the response (or the request envelope) is not well-formed XML
    #[error("Parsing failed! ({0})")]
    Parsing(String),
    /// A row of the response doesn't contain an expected field (the [String] contains the field name)
    #[error("Missing field! ({0})")]
    MissingField(String),
}
