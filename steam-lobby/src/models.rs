use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{LobbyError, Result};

/// Lobbies grouped by game name, then join address, then member display name -> steamid.
pub type LobbyAggregate = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// Single-entry map from a player's display name to their status.
pub type StatusReport = BTreeMap<String, PlayerStatus>;

/// One record of the `players` list returned by GetPlayerSummaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
  /// 64-bit steamid as a decimal string
  pub steamid: String,
  /// Profile display name
  #[serde(rename = "personaname")]
  pub display_name: String,
  /// 1 = private, 2 = friends only, 3 = public
  #[serde(rename = "communityvisibilitystate")]
  pub visibility: i32,
  /// Name of the game currently being played
  #[serde(rename = "gameextrainfo", default, skip_serializing_if = "Option::is_none")]
  pub game_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gameid: Option<String>,
  /// Only present while the player sits in a joinable lobby
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lobbysteamid: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profileurl: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatarfull: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub personastate: Option<i32>,
}

impl PlayerSummary {
  /// `steam://joinlobby/<gameid>/<lobbyid>` if the player is in a joinable lobby.
  pub fn join_address(&self) -> Result<Option<String>> {
    let Some(lobby_id) = &self.lobbysteamid else {
      return Ok(None);
    };
    let game_id = self.gameid.as_ref().ok_or_else(|| {
      LobbyError::MalformedResponse(format!(
        "player {} has a lobby but no gameid",
        self.steamid
      ))
    })?;
    Ok(Some(format!("steam://joinlobby/{}/{}", game_id, lobby_id)))
  }

  /// Reshape into the display-name keyed status report.
  pub fn status_report(&self) -> Result<StatusReport> {
    let status = PlayerStatus {
      playing: self.game_name.clone(),
      steamid: self.steamid.clone(),
      has_lobby: self.join_address()?,
      visibility: self.visibility,
    };
    Ok(BTreeMap::from([(self.display_name.clone(), status)]))
  }
}

/// Condensed view of a single player. Absent values serialize as `false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatus {
  #[serde(serialize_with = "some_or_false")]
  pub playing: Option<String>,
  pub steamid: String,
  #[serde(serialize_with = "some_or_false")]
  pub has_lobby: Option<String>,
  pub visibility: i32,
}

fn some_or_false<S: Serializer>(
  value: &Option<String>,
  serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
  match value {
    Some(v) => serializer.serialize_str(v),
    None => serializer.serialize_bool(false),
  }
}

/// Group every player that holds a lobby token under game and join address.
/// Players outside a lobby are skipped.
pub fn aggregate_lobbies(players: &[PlayerSummary]) -> Result<LobbyAggregate> {
  let mut lobbies = LobbyAggregate::new();
  for player in players {
    let Some(join_address) = player.join_address()? else {
      continue;
    };
    let game = player.game_name.clone().ok_or_else(|| {
      LobbyError::MalformedResponse(format!(
        "player {} has a lobby but no gameextrainfo",
        player.steamid
      ))
    })?;
    lobbies
      .entry(game)
      .or_default()
      .entry(join_address)
      .or_default()
      .insert(player.display_name.clone(), player.steamid.clone());
  }
  Ok(lobbies)
}
