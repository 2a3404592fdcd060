use std::str::FromStr;
use std::time::Duration;
use crate::utils::constants::{Env, Favorite};
use crate::Error;

/// Ids of the favorites (server side stored queries) used by the client. <br>
/// They are deployment specific and must match the target Aurion instance
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Favorites {
    pub unites: u64,
    pub users_groups: u64,
}

impl Default for Favorites {
    fn default() -> Self {
        Self { unites: Favorite::UNITES, users_groups: Favorite::USERS_GROUPS }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AurionConfig {
    /// URL of the Aurion server
    pub url: String,
    pub login: String,
    pub password: String,
    /// Database the favorites are executed against
    pub database: String,
    pub favorites: Favorites,
    /// [None] lets a request block until the server answers
    pub timeout: Option<Duration>,
    /// How many times a failed request is sent again
    pub retries: u32,
}

impl AurionConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Credentials are stored as is, the server decides whether they are correct
    pub fn new(url: impl Into<String>, login: impl Into<String>, password: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            login: login.into(),
            password: password.into(),
            database: database.into(),
            favorites: Favorites::default(),
            timeout: Some(Self::DEFAULT_TIMEOUT),
            retries: 0,
        }
    }

    pub fn with_favorites(mut self, favorites: Favorites) -> Self {
        self.favorites = favorites;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Reads the configuration from the `AURION_*` environment variables
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [AurionConfig::from_env] but with a custom source for the variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(Env::URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Configuration(format!("'{}' is not set", Env::URL)))?;

        let mut config = Self::new(
            url,
            lookup(Env::LOGIN).unwrap_or_default(),
            lookup(Env::PASSWORD).unwrap_or_default(),
            lookup(Env::DATABASE).unwrap_or_default(),
        );

        if let Some(unites) = parse_var(&lookup, Env::UNITES_FAVORITE)? {
            config.favorites.unites = unites;
        }
        if let Some(users_groups) = parse_var(&lookup, Env::GROUPS_FAVORITE)? {
            config.favorites.users_groups = users_groups;
        }
        if let Some(seconds) = parse_var::<u64, _>(&lookup, Env::TIMEOUT_SECS)? {
            // 0 disables the timeout
            config.timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        }
        if let Some(retries) = parse_var(&lookup, Env::RETRIES)? {
            config.retries = retries;
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Configuration(format!("failed to parse '{}' ('{}'): {}", key, value, e))),
        _ => Ok(None),
    }
}
