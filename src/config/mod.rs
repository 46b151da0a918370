// Configuration module entry point
// Loads layered configuration (file, environment, defaults)

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

pub use state::AppState;
pub use types::{
    AppOptions, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    StaticFilesConfig, DEFAULT_HOST, DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT, DEFAULT_PUBLIC_DIR,
};

#[allow(clippy::cast_possible_wrap)]
const DEFAULT_MAX_BODY_SIZE_I64: i64 = DEFAULT_MAX_BODY_SIZE as i64;

/// Environment variable prefix, e.g. `PLAINROUTE_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "PLAINROUTE";

impl Config {
    /// Load configuration from the given file (extension optional)
    ///
    /// The file may be missing; environment variables override it and
    /// defaults fill whatever is left.
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .set_default("server.host", types::DEFAULT_HOST)?
            .set_default("server.port", i64::from(types::DEFAULT_PORT))?
            .set_default("static_files.enabled", true)?
            .set_default("static_files.public_dir", types::DEFAULT_PUBLIC_DIR)?
            .set_default("http.server_name", types::DEFAULT_SERVER_NAME)?
            .set_default("http.max_body_size", DEFAULT_MAX_BODY_SIZE_I64)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", types::DEFAULT_ACCESS_LOG_FORMAT)?
            .set_default("performance.keep_alive", true)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load `config.toml` from the working directory
    ///
    /// The name is passed without extension, so `config.json` or
    /// `config.yaml` are picked up too.
    pub fn load() -> Result<Self, ServerError> {
        Self::load_from("config")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            port: self.server.port,
            static_enabled: self.static_files.enabled,
            public_dir: self.static_files.public_dir.clone(),
        }
    }
}

impl From<AppOptions> for Config {
    fn from(options: AppOptions) -> Self {
        let mut config = Self::default();
        config.server.port = options.port;
        config.static_files.enabled = options.static_enabled;
        config.static_files.public_dir = options.public_dir;
        config
    }
}
