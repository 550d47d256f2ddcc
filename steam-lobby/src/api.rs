//! Stateless helpers around the two ISteamUser endpoints.
//!
//! None of these hold a credential or registry; the caller passes everything
//! a request needs.

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LobbyError, Result};
use crate::models::PlayerSummary;
use crate::reference::is_steamid;

pub const DEFAULT_BASE_URL: &str = "http://api.steampowered.com";
pub const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v0002/";
pub const RESOLVE_VANITY_PATH: &str = "/ISteamUser/ResolveVanityURL/v0001/";

/// Every ISteamUser payload is wrapped in `{"response": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct PlayersPayload {
    players: Vec<PlayerSummary>,
}

/// `success` is 1 on a match, 42 when nothing matched.
#[derive(Debug, Deserialize)]
struct VanityPayload {
    success: i32,
    #[serde(default)]
    steamid: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// GET `url` with query parameters and decode the JSON body.
///
/// The query carries the API key, so the URL is stripped from every
/// transport error before it leaves this function.
pub async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    params: &[(&str, &str)],
) -> Result<T> {
    let body = http
        .get(url)
        .query(params)
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(reqwest::Error::without_url)?
        .text()
        .await
        .map_err(reqwest::Error::without_url)?;
    // Decoded separately so a bad body is a Decode error, not an Http one
    Ok(serde_json::from_str(&body)?)
}

/// Fetch summaries for every id in one request. Steam silently drops unknown ids.
pub async fn fetch_summaries(
    http: &Client,
    base_url: &str,
    api_key: &str,
    steamids: &[&str],
) -> Result<Vec<PlayerSummary>> {
    let joined = steamids.join(",");
    debug!(count = steamids.len(), steamids = %joined, "fetching player summaries");

    let url = format!("{}{}", base_url, PLAYER_SUMMARIES_PATH);
    let envelope: Envelope<PlayersPayload> =
        get_json(http, &url, &[("key", api_key), ("steamids", joined.as_str())]).await?;
    Ok(envelope.response.players)
}

/// Resolve a vanity name into a steamid.
pub async fn resolve_vanity(
    http: &Client,
    base_url: &str,
    api_key: &str,
    name: &str,
) -> Result<String> {
    debug!(%name, "resolving vanity name");

    let url = format!("{}{}", base_url, RESOLVE_VANITY_PATH);
    let envelope: Envelope<VanityPayload> =
        get_json(http, &url, &[("key", api_key), ("vanityurl", name)]).await?;
    let payload = envelope.response;

    match payload.steamid {
        Some(steamid) if payload.success == 1 && is_steamid(&steamid) => Ok(steamid),
        _ => Err(LobbyError::UnresolvedName {
            name: name.to_string(),
            message: payload
                .message
                .unwrap_or_else(|| format!("lookup returned status {}", payload.success)),
        }),
    }
}
