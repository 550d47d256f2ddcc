//! Text rendering of client results for Discord embeds.

use steam_lobby::{LobbyAggregate, LobbyError, StatusReport};

/// Human readable communityvisibilitystate.
pub fn visibility_label(visibility: i32) -> &'static str {
    match visibility {
        1 => "private",
        2 => "friends only",
        3 => "public",
        _ => "unknown",
    }
}

/// One line per field of every player in the report.
pub fn status_lines(report: &StatusReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (name, status) in report {
        lines.push(format!("**{}** (`{}`)", name, status.steamid));
        lines.push(format!(
            "Playing: {}",
            status.playing.as_deref().unwrap_or("nothing")
        ));
        lines.push(match &status.has_lobby {
            Some(address) => format!("Lobby: {}", address),
            None => "Lobby: none".to_string(),
        });
        lines.push(format!("Profile: {}", visibility_label(status.visibility)));
    }
    lines
}

/// Discord caps an embed at 25 fields of at most 1024 characters each.
pub const MAX_EMBED_FIELDS: usize = 25;
pub const MAX_FIELD_VALUE: usize = 1024;

/// Room kept for the "...and N more" trailer.
const MORE_RESERVE: usize = 32;

/// Online state from the summary's `personastate`.
pub fn persona_state_label(state: i32) -> &'static str {
    match state {
        0 => "offline",
        1 => "online",
        2 => "busy",
        3 => "away",
        4 => "snooze",
        5 => "looking to trade",
        6 => "looking to play",
        _ => "unknown",
    }
}

/// Extra status line for profiles that expose their online state.
pub fn presence_line(state: Option<i32>) -> Option<String> {
    state.map(|s| format!("Presence: {}", persona_state_label(s)))
}

/// (game, body) pairs, one lobby per body line, trimmed to embed limits.
pub fn lobby_fields(lobbies: &LobbyAggregate) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = lobbies
        .iter()
        .map(|(game, rooms)| {
            let lines: Vec<String> = rooms
                .iter()
                .map(|(address, members)| {
                    let names: Vec<&str> = members.keys().map(String::as_str).collect();
                    format!("{} - {}", address, names.join(", "))
                })
                .collect();
            (game.clone(), fit_lines(&lines, MAX_FIELD_VALUE))
        })
        .collect();

    if fields.len() > MAX_EMBED_FIELDS {
        let hidden: Vec<String> = fields
            .split_off(MAX_EMBED_FIELDS - 1)
            .into_iter()
            .map(|(game, _)| game)
            .collect();
        fields.push(("More games".to_string(), fit_lines(&hidden, MAX_FIELD_VALUE)));
    }
    fields
}

/// Join as many whole lines as fit in `limit` characters, then summarize the rest.
fn fit_lines(lines: &[String], limit: usize) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut used = 0;
    for (i, line) in lines.iter().enumerate() {
        let cost = line.chars().count() + usize::from(!kept.is_empty());
        let reserve = if i + 1 < lines.len() { MORE_RESERVE } else { 0 };
        if used + cost + reserve <= limit {
            kept.push(line.clone());
            used += cost;
            continue;
        }

        let hidden = if kept.is_empty() {
            // a single line too long on its own is cut short
            let room = limit - reserve - 1;
            kept.push(line.chars().take(room).chain(std::iter::once('…')).collect());
            lines.len() - i - 1
        } else {
            lines.len() - i
        };
        if hidden > 0 {
            kept.push(format!("…and {} more", hidden));
        }
        break;
    }
    kept.join("\n")
}

/// User-facing message for a failed client call.
pub fn format_error(err: &LobbyError) -> String {
    match err {
        LobbyError::NotFound(steamid) => format!("No Steam account found for `{}`", steamid),
        LobbyError::UnresolvedName { name, .. } => {
            format!("Could not find a Steam profile named `{}`", name)
        }
        LobbyError::InvalidReference(reference) => {
            format!("`{}` is not a Steam profile link, id or name", reference)
        }
        LobbyError::Http(e) if e.is_timeout() => "Steam took too long to answer".to_string(),
        LobbyError::Http(_) => "Steam is unreachable right now".to_string(),
        LobbyError::Decode(_) | LobbyError::MalformedResponse(_) => {
            "Steam returned an unexpected response".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use steam_lobby::PlayerStatus;

    #[test]
    fn test_visibility_label() {
        assert_eq!(visibility_label(1), "private");
        assert_eq!(visibility_label(3), "public");
        assert_eq!(visibility_label(9), "unknown");
    }

    #[test]
    fn test_status_lines() {
        let report = BTreeMap::from([(
            "gabe".to_string(),
            PlayerStatus {
                playing: Some("Dota 2".to_string()),
                steamid: "1".to_string(),
                has_lobby: Some("steam://joinlobby/570/9".to_string()),
                visibility: 3,
            },
        )]);
        assert_eq!(
            status_lines(&report),
            vec![
                "**gabe** (`1`)",
                "Playing: Dota 2",
                "Lobby: steam://joinlobby/570/9",
                "Profile: public",
            ]
        );
    }

    #[test]
    fn test_status_lines_idle() {
        let report = BTreeMap::from([(
            "idle".to_string(),
            PlayerStatus {
                playing: None,
                steamid: "2".to_string(),
                has_lobby: None,
                visibility: 1,
            },
        )]);
        let lines = status_lines(&report);
        assert_eq!(lines[1], "Playing: nothing");
        assert_eq!(lines[2], "Lobby: none");
        assert_eq!(lines[3], "Profile: private");
    }

    #[test]
    fn test_lobby_fields() {
        let mut lobbies = LobbyAggregate::new();
        let cs = lobbies.entry("Counter-Strike 2".to_string()).or_default();
        cs.entry("steam://joinlobby/730/1".to_string())
            .or_default()
            .extend([
                ("bob".to_string(), "2".to_string()),
                ("alice".to_string(), "1".to_string()),
            ]);
        cs.entry("steam://joinlobby/730/2".to_string())
            .or_default()
            .insert("carol".to_string(), "3".to_string());

        let fields = lobby_fields(&lobbies);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "Counter-Strike 2");
        assert_eq!(
            fields[0].1,
            "steam://joinlobby/730/1 - alice, bob\nsteam://joinlobby/730/2 - carol"
        );
    }

    fn crowded_game(lobby_count: usize) -> LobbyAggregate {
        let mut lobbies = LobbyAggregate::new();
        let rooms = lobbies.entry("Team Fortress 2".to_string()).or_default();
        for i in 0..lobby_count {
            rooms
                .entry(format!("steam://joinlobby/440/{:020}", i))
                .or_default()
                .insert(format!("player{}", i), i.to_string());
        }
        lobbies
    }

    #[test]
    fn test_presence_line() {
        assert_eq!(presence_line(Some(1)).as_deref(), Some("Presence: online"));
        assert_eq!(presence_line(Some(6)).as_deref(), Some("Presence: looking to play"));
        assert_eq!(presence_line(None), None);
        assert_eq!(persona_state_label(42), "unknown");
    }

    #[test]
    fn test_lobby_field_value_is_capped() {
        let fields = lobby_fields(&crowded_game(100));
        assert_eq!(fields.len(), 1);
        let value = &fields[0].1;
        assert!(value.chars().count() <= MAX_FIELD_VALUE);
        assert!(value.starts_with("steam://joinlobby/440/"));
        assert!(value.ends_with(" more"), "missing trailer: {value}");
    }

    #[test]
    fn test_oversized_single_lobby_is_cut() {
        let mut lobbies = LobbyAggregate::new();
        let members = lobbies
            .entry("Left 4 Dead 2".to_string())
            .or_default()
            .entry("steam://joinlobby/550/1".to_string())
            .or_default();
        for i in 0..300 {
            members.insert(format!("survivor_{:04}", i), i.to_string());
        }

        let fields = lobby_fields(&lobbies);
        assert!(fields[0].1.chars().count() <= MAX_FIELD_VALUE);
        assert!(fields[0].1.ends_with('…'));
    }

    #[test]
    fn test_lobby_fields_are_capped() {
        let mut lobbies = LobbyAggregate::new();
        for i in 0..30 {
            lobbies
                .entry(format!("Game {:02}", i))
                .or_default()
                .entry(format!("steam://joinlobby/{}/1", i))
                .or_default()
                .insert("p".to_string(), "1".to_string());
        }

        let fields = lobby_fields(&lobbies);
        assert_eq!(fields.len(), MAX_EMBED_FIELDS);
        assert_eq!(fields[23].0, "Game 23");
        let (name, value) = &fields[24];
        assert_eq!(name, "More games");
        assert_eq!(value.lines().count(), 6);
        assert!(value.starts_with("Game 24\nGame 25"));
    }

    #[test]
    fn test_format_error() {
        assert_eq!(
            format_error(&LobbyError::NotFound("42".to_string())),
            "No Steam account found for `42`"
        );
        assert_eq!(
            format_error(&LobbyError::UnresolvedName {
                name: "ghost".to_string(),
                message: "No match".to_string(),
            }),
            "Could not find a Steam profile named `ghost`"
        );
        assert_eq!(
            format_error(&LobbyError::MalformedResponse("x".to_string())),
            "Steam returned an unexpected response"
        );
    }
}
