pub mod api;
mod error;
mod models;
pub mod reference;

pub use error::{LobbyError, Result};
pub use models::{
  LobbyAggregate, PlayerStatus, PlayerSummary, StatusReport, aggregate_lobbies,
};
pub use reference::{ProfileReference, parse_reference};

use reqwest::Client;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP settings for the Steam Web API
#[derive(Debug, Clone)]
pub struct ClientOptions {
  /// Scheme and host the ISteamUser paths are appended to
  pub base_url: String,
  /// Per-request timeout
  pub timeout: Duration,
}

impl Default for ClientOptions {
  fn default() -> Self {
    Self {
      base_url: api::DEFAULT_BASE_URL.to_string(),
      timeout: Duration::from_secs(7),
    }
  }
}

/// Client for a fixed set of tracked Steam accounts.
#[derive(Clone)]
pub struct LobbyClient {
  http: Client,
  base_url: String,
  api_key: String,
  /// alias -> steamid
  registry: HashMap<String, String>,
}

impl fmt::Debug for LobbyClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LobbyClient")
      .field("base_url", &self.base_url)
      .field("api_key", &"<redacted>")
      .field("registry", &self.registry)
      .finish()
  }
}

impl LobbyClient {
  /// Create a client against the public Steam Web API.
  pub fn new(api_key: impl Into<String>, registry: HashMap<String, String>) -> Result<Self> {
    Self::with_options(api_key, registry, ClientOptions::default())
  }

  /// Create a client with explicit HTTP settings. No request is sent here.
  pub fn with_options(
    api_key: impl Into<String>,
    registry: HashMap<String, String>,
    options: ClientOptions,
  ) -> Result<Self> {
    let http = Client::builder().timeout(options.timeout).build()?;
    let client = Self {
      http,
      base_url: options.base_url.trim_end_matches('/').to_string(),
      api_key: api_key.into(),
      registry,
    };
    info!(
      tracked = client.registry.len(),
      base_url = %client.base_url,
      "lobby client ready"
    );
    Ok(client)
  }

  /// Tracked players, alias -> steamid.
  pub fn registry(&self) -> &HashMap<String, String> {
    &self.registry
  }

  /// Distinct steamids of all tracked players, sorted.
  pub fn steamids(&self) -> Vec<&str> {
    self
      .registry
      .values()
      .map(String::as_str)
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect()
  }

  /// Turn a steamid, profile URL or vanity name into a steamid.
  /// Numeric references are returned without contacting the API.
  pub async fn resolve_identifier(&self, reference: &str) -> Result<String> {
    match parse_reference(reference)? {
      ProfileReference::SteamId(steamid) => Ok(steamid),
      ProfileReference::Vanity(name) => {
        api::resolve_vanity(&self.http, &self.base_url, &self.api_key, &name).await
      }
    }
  }

  /// Raw summary of a single player.
  pub async fn get_single_user_data(&self, steamid: &str) -> Result<PlayerSummary> {
    api::fetch_summaries(&self.http, &self.base_url, &self.api_key, &[steamid])
      .await?
      .into_iter()
      .next()
      .ok_or_else(|| LobbyError::NotFound(steamid.to_string()))
  }

  /// Display name -> condensed status of a single player.
  pub async fn get_player_status(&self, steamid: &str) -> Result<StatusReport> {
    self.get_single_user_data(steamid).await?.status_report()
  }

  /// Every lobby any tracked player is currently sitting in.
  pub async fn get_all_current_lobbies(&self) -> Result<LobbyAggregate> {
    let steamids = self.steamids();
    if steamids.is_empty() {
      return Ok(LobbyAggregate::new());
    }

    let players =
      api::fetch_summaries(&self.http, &self.base_url, &self.api_key, &steamids).await?;
    let lobbies = aggregate_lobbies(&players)?;

    debug!(
      requested = steamids.len(),
      returned = players.len(),
      games = lobbies.len(),
      "aggregated lobbies"
    );
    Ok(lobbies)
  }
}
