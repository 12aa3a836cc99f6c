use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use std::path::PathBuf;
use tracing::{error, info, warn};

use minigame_hub::commands::{add, remove, see};
use minigame_hub::config::BotSettings;
use minigame_hub::state::{create_shared_candy_ledger, CandyLedger};
use minigame_hub::{hooks, logging, CandyBotData};

/// Discord bot counting Halloween candies per user and server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding candies.json (defaults to $DATA_PATH or ./data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Register commands in this guild only instead of globally (faster for testing)
    #[arg(long)]
    guild_id: Option<u64>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    logging::init(&args.log_level);

    let token = std::env::var("DISCORD_TOKEN")
        .map_err(|_| anyhow::anyhow!("Missing DISCORD_TOKEN environment variable"))?;

    if let Some(bot_id) = logging::bot_id_from_token(&token) {
        info!("Bot ID: {}", bot_id);
    }

    let settings = BotSettings::new(BotSettings::resolve_data_dir(args.data_dir.as_deref()));

    info!("Loading candy ledger from {}...", settings.candies_path().display());
    let ledger = CandyLedger::load(settings.candies_path())
        .await
        .unwrap_or_else(|e| {
            warn!("Could not load candy ledger: {}, starting empty", e);
            CandyLedger::new(settings.candies_path())
        });
    let ledger = create_shared_candy_ledger(ledger);
    let target_guild_id = args.guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![add(), remove(), see()],
            pre_command: hooks::pre_command,
            post_command: hooks::post_command,
            on_error: hooks::on_error,
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            let ledger = ledger.clone();

            Box::pin(async move {
                info!("🎃 Bot ready as {}", ready.user.name);

                let registered = match target_guild_id {
                    Some(gid) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(gid),
                        )
                        .await
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await
                    }
                };
                match registered {
                    Ok(()) => info!(
                        "Successfully registered {} commands",
                        framework.options().commands.len()
                    ),
                    Err(e) => error!("Failed to register commands: {}", e),
                }

                Ok(CandyBotData { ledger })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot...");
    client.start().await?;
    warn!("Bot ended.");

    Ok(())
}
