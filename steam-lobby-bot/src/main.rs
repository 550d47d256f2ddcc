mod discord_commands;
use poise::{Framework, FrameworkOptions, PrefixFrameworkOptions, serenity_prelude as serenity};
use steam_lobby::LobbyClient;
use steam_lobby_bot::config::{Config, load_registry};

type Context<'a> = poise::Context<'a, crate::Data, crate::discord_commands::Error>;

pub(crate) struct Data {
    pub(crate) client: LobbyClient,
}

#[tokio::main]
async fn main() {
    // Initialize tracing for structured logging
    #[cfg(debug_assertions)]
    let log_level = tracing::Level::DEBUG;
    #[cfg(not(debug_assertions))]
    let log_level = tracing::Level::INFO;

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();
    tracing::info!("Starting steam lobby bot...");

    let config = Config::from_env();
    tracing::info!(
        "Configuration: profiles={}, steam_api={}, timeout={}s, prefix={}",
        config.profiles_path.display(),
        config.steam_api_base_url,
        config.steam_request_timeout.as_secs(),
        config.discord_command_prefix
    );

    let registry = load_registry(&config.profiles_path).expect("Could not load tracked profiles");
    let api_key = config
        .steam_api_key
        .clone()
        .expect("STEAM_API_KEY environment variable is required");
    let client = LobbyClient::with_options(api_key, registry, config.client_options())
        .expect("Error creating Steam client");

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: vec![
                discord_commands::steamid(),
                discord_commands::status(),
                discord_commands::lobbies(),
            ],
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(config.discord_command_prefix.clone()),
                ..Default::default()
            },
            pre_command: |ctx| {
                Box::pin(async move {
                    tracing::info!(
                        "Executing command '{}' by user '{}'",
                        ctx.command().name,
                        ctx.author().name
                    );
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    tracing::info!(
                        "Finished command '{}' by user '{}'",
                        ctx.command().name,
                        ctx.author().name
                    );
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data { client })
            })
        })
        .build();

    let token = config
        .discord_token
        .expect("DISCORD_TOKEN environment variable is required");
    let mut discord = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .expect("Error creating Discord client");
    if let Err(e) = discord.start().await {
        tracing::error!("Discord client error: {:?}", e);
    }
}
