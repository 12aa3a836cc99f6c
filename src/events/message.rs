use poise::serenity_prelude::{self as serenity, GuildId, RoleId};
use tracing::{debug, info, warn};

use crate::managers::TextReply;
use crate::messages::{self, NumberReply, WordleReply};
use crate::moderation::{self, FilterVerdict};
use crate::{Data, Error};

/// Handle incoming messages: the forbidden-word filter first, then game guesses
pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    // Ignore bot messages
    if msg.author.bot {
        return Ok(());
    }

    if let Some(guild_id) = msg.guild_id {
        if moderate_message(ctx, msg, guild_id, data).await? {
            return Ok(());
        }
    }

    reply_to_guesses(ctx, msg, data).await
}

/// Returns true when the message was flagged and handed to the ticket system
async fn moderate_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    guild_id: GuildId,
    data: &Data,
) -> Result<bool, Error> {
    let config = data
        .guild_configs
        .read()
        .await
        .get(&guild_id.to_string())
        .cloned();

    let Some(config) = config.filter(|c| c.bad_words.is_some()) else {
        return Ok(false);
    };

    let roles = sender_roles(ctx, msg, guild_id).await;
    let word = match moderation::check_message(Some(&config), &msg.content, &roles) {
        FilterVerdict::Flagged { word } => word,
        verdict => {
            debug!("Message {} from {}: {:?}", msg.id, msg.author.name, verdict);
            return Ok(false);
        }
    };

    info!(
        "Forbidden word '{}' from {} ({}) in guild {}",
        word, msg.author.name, msg.author.id, guild_id
    );

    if let Err(e) = msg.delete(ctx).await {
        warn!("Failed to delete flagged message {}: {}", msg.id, e);
    }

    data.ticket_manager
        .open_ticket(&ctx.http, guild_id, &msg.author, &msg.content, &config)
        .await?;
    Ok(true)
}

async fn sender_roles(ctx: &serenity::Context, msg: &serenity::Message, guild_id: GuildId) -> Vec<RoleId> {
    if let Some(member) = &msg.member {
        return member.roles.clone();
    }

    match guild_id.member(ctx, msg.author.id).await {
        Ok(member) => member.roles,
        Err(e) => {
            warn!("Could not fetch roles of {}: {}", msg.author.id, e);
            Vec::new()
        }
    }
}

async fn reply_to_guesses(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    for reply in data.game_manager.handle_text(msg.author.id, &msg.content) {
        match reply {
            TextReply::Wordle { guess, target } => match messages::wordle_reply(&guess, &target) {
                WordleReply::Progress(text) => {
                    msg.reply(ctx, text).await?;
                }
                WordleReply::Finished(embed) => {
                    msg.channel_id
                        .send_message(ctx, serenity::CreateMessage::new().embed(embed))
                        .await?;
                }
            },
            TextReply::Number { outcome, target } => match messages::number_reply(outcome, target) {
                NumberReply::Hint(text) => {
                    msg.reply(ctx, text).await?;
                }
                NumberReply::Solved(embed) => {
                    msg.channel_id
                        .send_message(ctx, serenity::CreateMessage::new().embed(embed))
                        .await?;
                }
            },
        }
    }
    Ok(())
}
