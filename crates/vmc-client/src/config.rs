use std::env;
use std::fmt;
use std::str::FromStr;

/// Build/runtime mode of the console deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!("unknown run mode: {other}")),
        }
    }
}

/// API access configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub servers_api_url: String,
    pub agent_api_url: String,
    pub use_mock: bool,
    pub mode: RunMode,
}

impl ApiConfig {
    /// Read config from env vars: `SERVERS_API_URL`, `AGENT_API_URL`,
    /// `USE_MOCK`, `RUN_MODE`. All have defaults; unknown `RUN_MODE` values
    /// fall back to development with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mode = match env::var("RUN_MODE") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(run_mode = %raw, "unknown RUN_MODE, defaulting to development");
                RunMode::Development
            }),
            Err(_) => RunMode::Development,
        };

        Self {
            servers_api_url: env::var("SERVERS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            agent_api_url: env::var("AGENT_API_URL")
                .unwrap_or_else(|_| "http://localhost:3001".into()),
            use_mock: env::var("USE_MOCK").is_ok_and(|v| v == "true"),
            mode,
        }
    }

    /// Which backend this config resolves to: mock only in development with
    /// the mock flag set, the real HTTP client otherwise.
    pub fn backend(&self) -> BackendKind {
        if self.mode == RunMode::Development && self.use_mock {
            BackendKind::Mock
        } else {
            BackendKind::Http
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            servers_api_url: "http://localhost:8080".into(),
            agent_api_url: "http://localhost:3001".into(),
            use_mock: false,
            mode: RunMode::Development,
        }
    }
}

/// The two interchangeable API backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Mock,
    Http,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Http => "http",
        }
    }
}
