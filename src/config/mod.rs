// Configuration module entry point
// Loads layered configuration and exposes the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Environment variable prefix, e.g. `FILESTORE_SERVER__PORT=9000`
const ENV_PREFIX: &str = "FILESTORE";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the optional file,
    /// then `FILESTORE_*` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, Self::env_source())
    }

    /// `FILESTORE_*` variables, `__` separating nested keys
    fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(
        config_path: &str,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let cfg = Config::load_from("definitely/not/a/config/file").unwrap();
        assert_eq!(cfg.storage.collection_path, "/api/file");
        assert_eq!(cfg.storage.upload_root, "api/file");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.shutdown_grace_period, 10);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filestore.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9191\n\n[storage]\nupload_root = \"/srv/files\"\n",
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9191);
        assert_eq!(cfg.storage.upload_root, "/srv/files");
        // Untouched keys keep their defaults
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.storage.index_file, "html/index.html");
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filestore.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9191\n\n[storage]\nupload_root = \"/srv/files\"\n",
        )
        .unwrap();

        // Injected variables never touch the process environment
        let vars: config::Map<String, String> = [
            ("FILESTORE_SERVER__PORT", "9300"),
            ("FILESTORE_STORAGE__UPLOAD_ROOT", "/env/files"),
            ("FILESTORE_STORAGE__INDEX_FILE", "/env/index.html"),
            ("UNRELATED_SERVER__PORT", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let env = Config::env_source().source(Some(vars));
        let cfg = Config::load_with_env(path.to_str().unwrap(), env).unwrap();

        // Environment beats the file...
        assert_eq!(cfg.server.port, 9300);
        assert_eq!(cfg.storage.upload_root, "/env/files");
        // ...and the defaults
        assert_eq!(cfg.storage.index_file, "/env/index.html");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.storage.collection_path, "/api/file");
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
