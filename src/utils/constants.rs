/// Favorites registered on the Aurion instance this crate was written for
pub struct Favorite;

impl Favorite {
    pub const UNITES: u64 = 18152939;
    pub const USERS_GROUPS: u64 = 18152763;
}

/// Just a collection of field names used by the favorites (they are part of the wire format)
pub struct Field;

impl Field {
    pub const ROW: &'static str = "row";

    pub const UNITE_CODE: &'static str = "Code.Unité";
    pub const UNITE_LABEL: &'static str = "Libellé.Unité";

    pub const USER_LOGIN: &'static str = "login.Individu";
    pub const USER_EMAIL: &'static str = "Coordonnée.Coordonnée";
    pub const GROUP_CODE: &'static str = "Code.Groupe";
}

/// Names of the environment variables read by [crate::AurionConfig::from_env]
pub struct Env;

impl Env {
    pub const URL: &'static str = "AURION_URL";
    pub const LOGIN: &'static str = "AURION_LOGIN";
    pub const PASSWORD: &'static str = "AURION_PASSWORD";
    pub const DATABASE: &'static str = "AURION_DATABASE";
    pub const UNITES_FAVORITE: &'static str = "AURION_UNITES_FAVORITE";
    pub const GROUPS_FAVORITE: &'static str = "AURION_GROUPS_FAVORITE";
    pub const TIMEOUT_SECS: &'static str = "AURION_TIMEOUT_SECS";
    pub const RETRIES: &'static str = "AURION_RETRIES";
}
