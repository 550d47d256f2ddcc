use crate::Context;
use poise::CreateReply;
use poise::command;
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter};
use steam_lobby::LobbyError;
use steam_lobby_bot::format::{format_error, lobby_fields, presence_line, status_lines};

pub(crate) type Error = Box<dyn std::error::Error + Send + Sync>;

const EMBED_COLOR: u32 = 0x1B2838;

/// Reply with a plain message for client failures, keep other errors for poise.
async fn reply_failure(ctx: Context<'_>, err: LobbyError) -> Result<(), Error> {
    tracing::warn!(error = %err, command = %ctx.command().name, "steam request failed");
    ctx.say(format_error(&err)).await?;
    Ok(())
}

/// Look up the steamid behind a profile link or custom name
#[command(slash_command, prefix_command)]
pub async fn steamid(
    ctx: Context<'_>,
    #[description = "Profile link, steamid or custom name"] profile: String,
) -> Result<(), Error> {
    match ctx.data().client.resolve_identifier(&profile).await {
        Ok(id) => {
            ctx.say(format!("`{}` -> `{}`", profile, id)).await?;
            Ok(())
        }
        Err(err) => reply_failure(ctx, err).await,
    }
}

/// Show what a Steam player is doing right now
#[command(slash_command, prefix_command)]
pub async fn status(
    ctx: Context<'_>,
    #[description = "Profile link, steamid or custom name"] profile: String,
) -> Result<(), Error> {
    let client = &ctx.data().client;
    let fetched = match client.resolve_identifier(&profile).await {
        Ok(id) => client.get_single_user_data(&id).await,
        Err(err) => Err(err),
    }
    .and_then(|summary| {
        let report = summary.status_report()?;
        Ok((summary, report))
    });
    let (summary, report) = match fetched {
        Ok(fetched) => fetched,
        Err(err) => return reply_failure(ctx, err).await,
    };

    let mut lines = status_lines(&report);
    lines.extend(presence_line(summary.personastate));
    let mut embed = CreateEmbed::default()
        .title("Player Status")
        .description(lines.join("\n"))
        .color(EMBED_COLOR);
    if let Some(url) = &summary.profileurl {
        embed = embed.url(url);
    }
    if let Some(avatar) = &summary.avatarfull {
        embed = embed.thumbnail(avatar);
    }
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// List every open lobby of the tracked players
#[command(slash_command, prefix_command)]
pub async fn lobbies(ctx: Context<'_>) -> Result<(), Error> {
    let client = &ctx.data().client;
    let lobbies = match client.get_all_current_lobbies().await {
        Ok(lobbies) => lobbies,
        Err(err) => return reply_failure(ctx, err).await,
    };

    let embed = CreateEmbed::default()
        .title("Open Lobbies")
        .color(EMBED_COLOR)
        .footer(CreateEmbedFooter::new(format!(
            "Tracking {} players",
            client.registry().len()
        )));
    let embed = if lobbies.is_empty() {
        embed.description("Nobody is in a lobby right now.")
    } else {
        embed.fields(
            lobby_fields(&lobbies)
                .into_iter()
                .map(|(game, body)| (game, body, false)),
        )
    };
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
