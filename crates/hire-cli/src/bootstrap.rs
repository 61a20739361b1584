use anyhow::Context as _;
use hire_api::{ApiClient, ExtractionClient, PollSettings};
use hire_config::HireConfig;

/// Everything a command handler needs, built once per invocation.
#[derive(Debug)]
pub struct Context {
    pub api: ApiClient,
    pub extraction: ExtractionClient,
}

impl Context {
    pub fn from_config(config: &HireConfig) -> anyhow::Result<Self> {
        let api = ApiClient::from_config(config).context("failed to build HTTP client")?;
        let extraction =
            ExtractionClient::new(api.clone(), PollSettings::from_config(&config.extraction));
        Ok(Self { api, extraction })
    }
}

/// Load `.env` (if any), then the layered config.
pub fn load_config() -> anyhow::Result<HireConfig> {
    HireConfig::load_with_dotenv().context("failed to load hire configuration")
}
