use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::error::BotError;
use crate::messages;
use crate::{CandyContext, Error};

/// 🎃 Add Halloween candies
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "MANAGE_CHANNELS"
)]
pub async fn add(
    ctx: CandyContext<'_>,
    #[description = "Number of candies to add"]
    #[min = 1]
    amount: u64,
    #[description = "User to give candies to (optional)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(BotError::NoGuild)?;
    // Defaults to the caller
    let recipient = user.as_ref().unwrap_or_else(|| ctx.author());

    let total = {
        let mut ledger = ctx.data().ledger.write().await;
        let total = ledger.credit(
            &guild_id.to_string(),
            &recipient.id.to_string(),
            &recipient.name,
            amount,
        );
        if let Err(e) = ledger.save().await {
            error!("Failed to save candy ledger: {}", e);
        }
        total
    };

    info!(
        "{} added {} candies to {} in guild {} (total {})",
        ctx.author().name,
        amount,
        recipient.name,
        guild_id,
        total
    );

    let named = user.as_ref().map(|u| u.name.as_str());
    ctx.say(messages::candy_added(&ctx.author().name, named, amount, total))
        .await?;
    Ok(())
}

/// 🎃 Remove Halloween candies
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "MANAGE_CHANNELS"
)]
pub async fn remove(
    ctx: CandyContext<'_>,
    #[description = "Number of candies to remove"]
    #[min = 1]
    amount: u64,
    #[description = "User to take candies from (optional)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(BotError::NoGuild)?;
    let holder = user.as_ref().unwrap_or_else(|| ctx.author());

    let total = {
        let mut ledger = ctx.data().ledger.write().await;
        let total = ledger.debit(
            &guild_id.to_string(),
            &holder.id.to_string(),
            &holder.name,
            amount,
        );
        if total.is_some() {
            if let Err(e) = ledger.save().await {
                error!("Failed to save candy ledger: {}", e);
            }
        }
        total
    };

    let Some(total) = total else {
        ctx.send(
            poise::CreateReply::default()
                .content(messages::candy_missing(&holder.name))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    info!(
        "{} removed {} candies from {} in guild {} (total {})",
        ctx.author().name,
        amount,
        holder.name,
        guild_id,
        total
    );

    let named = user.as_ref().map(|u| u.name.as_str());
    ctx.say(messages::candy_removed(&ctx.author().name, named, amount, total))
        .await?;
    Ok(())
}

/// 👻 See the candies collected in this server
#[poise::command(slash_command, guild_only)]
pub async fn see(ctx: CandyContext<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(BotError::NoGuild)?;
    let board = ctx.data().ledger.read().await.leaderboard(&guild_id.to_string());

    if board.entries.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content(messages::CANDY_EMPTY)
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    ctx.send(poise::CreateReply::default().embed(messages::candy_leaderboard(&board)))
        .await?;
    Ok(())
}
