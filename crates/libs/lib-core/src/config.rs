//! # Application Configuration
//!
//! The dashboard runs in the browser, so there is no process environment at
//! runtime. Settings are baked in at build time through `option_env!` and
//! validated once on startup to fail fast if misconfigured.
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust
//! use lib_core::config::core_config;
//!
//! let config = core_config();
//! assert!(config.api_base_url.starts_with("http"));
//! ```
//!
//! The web entry point calls [`init_config()`] once. Library code and tests
//! that never initialize it get [`Config::default()`].
//!
//! ## Build-time variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `RISK_GUARDIAN_API_URL` | `http://localhost:8000` |
//! | `RISK_GUARDIAN_NETWORK` | `testnet` |
//! | `RISK_GUARDIAN_VERIFY_NETWORK` | `true` |

use std::sync::OnceLock;

use crate::model::Network;

/// Delays (ms from page load) at which extensions are probed.
pub const DEFAULT_DETECTION_DELAYS_MS: [u32; 7] = [0, 250, 500, 1000, 2000, 3500, 5000];

/// Application configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Risk API origin, without the `/api/v1` prefix
    pub api_base_url: String,

    /// Network used for manual tracking and demo mode
    pub default_network: Network,

    pub horizon_mainnet_url: String,
    pub horizon_testnet_url: String,

    /// Check that connected accounts exist on the selected network
    pub verify_network: bool,

    /// Upper bound for a single API request
    ///
    /// Valid range: 1000-120000 ms
    pub request_timeout_ms: u32,

    /// How long a protected view waits for session restoration before
    /// redirecting to the landing page
    pub restore_grace_ms: u32,

    /// Extension probing schedule, strictly increasing
    pub detection_delays_ms: Vec<u32>,

    /// Interval of the "is the extension still connected" poll
    pub extension_check_interval_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            default_network: Network::Testnet,
            horizon_mainnet_url: Network::Mainnet.default_horizon_url().to_string(),
            horizon_testnet_url: Network::Testnet.default_horizon_url().to_string(),
            verify_network: true,
            request_timeout_ms: 15_000,
            restore_grace_ms: 1_000,
            detection_delays_ms: DEFAULT_DETECTION_DELAYS_MS.to_vec(),
            extension_check_interval_ms: 30_000,
        }
    }
}

impl Config {
    /// Load configuration from build-time environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(
            option_env!("RISK_GUARDIAN_API_URL"),
            option_env!("RISK_GUARDIAN_NETWORK"),
            option_env!("RISK_GUARDIAN_VERIFY_NETWORK"),
        )
    }

    fn from_vars(api_url: Option<&str>, network: Option<&str>, verify: Option<&str>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(url) = api_url {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(network) = network {
            config.default_network = network
                .parse()
                .map_err(|e| format!("RISK_GUARDIAN_NETWORK is invalid: {}", e))?;
        }

        if let Some(verify) = verify {
            config.verify_network = match verify.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => return Err(format!("RISK_GUARDIAN_VERIFY_NETWORK must be a boolean, got '{}'", other)),
            };
        }

        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("RISK_GUARDIAN_API_URL", &self.api_base_url),
            ("horizon_mainnet_url", &self.horizon_mainnet_url),
            ("horizon_testnet_url", &self.horizon_testnet_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        if !(1_000..=120_000).contains(&self.request_timeout_ms) {
            return Err("request_timeout_ms must be between 1000 and 120000".to_string());
        }

        if self.detection_delays_ms.is_empty() {
            return Err("detection_delays_ms must not be empty".to_string());
        }

        if self.detection_delays_ms.windows(2).any(|w| w[0] >= w[1]) {
            return Err("detection_delays_ms must be strictly increasing".to_string());
        }

        Ok(())
    }

    /// Horizon endpoint for `network`.
    pub fn horizon_url(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => &self.horizon_mainnet_url,
            Network::Testnet => &self.horizon_testnet_url,
        }
    }

    /// Versioned API root, e.g. `http://localhost:8000/api/v1`.
    pub fn api_root(&self) -> String {
        format!("{}/api/v1", self.api_base_url.trim_end_matches('/'))
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - A build-time variable is invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<(), String> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get a reference to the global configuration, or the defaults if
/// [`init_config()`] was never called.
pub fn core_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
