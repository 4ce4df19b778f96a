pub const DEFAULT_CONFIG_FILE: &str = "tourbook.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "TOURBOOK_";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";
pub const DEFAULT_CREDENTIAL_FILE: &str = ".tourbook/credentials.toml";
