use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use minigame_hub::commands::{config, help, ping, setup};
use minigame_hub::config::BotSettings;
use minigame_hub::events::{handle_channel_delete, handle_interaction, handle_message};
use minigame_hub::managers::{GameManager, TicketManager};
use minigame_hub::state::{create_shared_guild_config_store, create_shared_session_store, GuildConfigStore};
use minigame_hub::{hooks, logging, Data, Error};

/// Discord minigame hub with forbidden-word moderation and tickets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding configs.json (defaults to $DATA_PATH or ./data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Register commands in this guild only instead of globally (faster for testing)
    #[arg(long)]
    guild_id: Option<u64>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            if let Err(e) = handle_message(ctx, new_message, data).await {
                error!("Failed to handle message: {}", e);
            }
        }
        serenity::FullEvent::InteractionCreate { interaction } => {
            if let Err(e) = handle_interaction(ctx, interaction, data).await {
                error!("Failed to handle interaction: {}", e);
            }
        }
        serenity::FullEvent::ChannelDelete { channel, .. } => {
            handle_channel_delete(channel, data);
        }
        _ => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    logging::init(&args.log_level);

    let token = std::env::var("DISCORD_TOKEN")
        .map_err(|_| anyhow::anyhow!("Missing DISCORD_TOKEN environment variable"))?;

    if let Some(bot_id) = logging::bot_id_from_token(&token) {
        info!(
            "Bot ID: {} (configure intents at https://discord.com/developers/applications/{}/bot)",
            bot_id, bot_id
        );
    }

    let settings = BotSettings::new(BotSettings::resolve_data_dir(args.data_dir.as_deref()));

    info!("Loading guild configurations from {}...", settings.configs_path().display());
    let guild_configs = GuildConfigStore::load(settings.configs_path())
        .await
        .unwrap_or_else(|e| {
            warn!("Could not load guild configurations: {}, using empty store", e);
            GuildConfigStore::new(settings.configs_path())
        });
    info!("Loaded configuration for {} guilds", guild_configs.guild_count());
    let guild_configs = create_shared_guild_config_store(guild_configs);

    let sessions = create_shared_session_store();
    let ticket_manager = Arc::new(TicketManager::new(&settings));
    let target_guild_id = args.guild_id;

    if let Some(gid) = target_guild_id {
        info!("--guild-id: Registering commands to guild {} only", gid);
    } else {
        info!("Registering commands globally by default (takes up to 1 hour to propagate)");
    }

    let setup_sessions = sessions.clone();
    let setup_tickets = ticket_manager.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![setup(), config(), ping(), help()],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            pre_command: hooks::pre_command,
            post_command: hooks::post_command,
            on_error: hooks::on_error,
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            let settings = settings.clone();
            let guild_configs = guild_configs.clone();
            let setup_sessions = setup_sessions.clone();
            let setup_tickets = setup_tickets.clone();

            Box::pin(async move {
                info!("Bot logged in as: {}", ready.user.name);

                match target_guild_id {
                    Some(gid) => {
                        let guild_id = serenity::GuildId::new(gid);
                        if let Err(e) = poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            guild_id,
                        )
                        .await
                        {
                            error!("Failed to register commands for guild {}: {}", guild_id, e);
                        } else {
                            info!(
                                "Successfully registered {} commands for guild {}",
                                framework.options().commands.len(),
                                guild_id
                            );
                        }
                    }
                    None => {
                        if let Err(e) =
                            poise::builtins::register_globally(ctx, &framework.options().commands)
                                .await
                        {
                            error!("Failed to register commands globally: {}", e);
                        } else {
                            info!(
                                "Successfully registered {} commands globally",
                                framework.options().commands.len()
                            );
                        }
                    }
                }

                Ok(Data {
                    settings,
                    game_manager: GameManager::new(setup_sessions),
                    guild_configs,
                    ticket_manager: setup_tickets,
                })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot...");
    let result = client.start().await;

    ticket_manager.shutdown();
    sessions.clear();

    if let Err(e) = result {
        let err_str = e.to_string();
        if err_str.contains("Disallowed") || err_str.contains("intents") {
            error!("Failed to start bot: {}", e);
            error!("Enable MESSAGE_CONTENT and GUILD_MEMBERS under Bot -> Privileged Gateway Intents in the Discord Developer Portal");
            return Err(anyhow::anyhow!("Disallowed gateway intents: {}", e));
        }
        return Err(e.into());
    }
    warn!("Bot ended.");

    Ok(())
}
