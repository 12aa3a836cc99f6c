//! Framework hooks shared by both bots: command logging and error replies.

use tracing::{error, info};

use crate::Error;

pub fn pre_command<U: Send + Sync + 'static>(
    ctx: poise::Context<'_, U, Error>,
) -> poise::BoxFuture<'_, ()> {
    Box::pin(async move {
        info!(
            "Command '{}' invoked by {} (ID: {}) in {}",
            ctx.command().qualified_name,
            ctx.author().name,
            ctx.author().id,
            ctx.guild_id()
                .map(|g| g.to_string())
                .unwrap_or_else(|| "DM".to_string())
        );
    })
}

pub fn post_command<U: Send + Sync + 'static>(
    ctx: poise::Context<'_, U, Error>,
) -> poise::BoxFuture<'_, ()> {
    Box::pin(async move {
        info!(
            "Command '{}' completed for {}",
            ctx.command().qualified_name,
            ctx.author().name
        );
    })
}

pub fn on_error<U: Send + Sync + 'static>(
    error: poise::FrameworkError<'_, U, Error>,
) -> poise::BoxFuture<'_, ()> {
    Box::pin(async move {
        match error {
            poise::FrameworkError::Command { error, ctx, .. } => {
                error!("Error in command '{}': {}", ctx.command().qualified_name, error);
                let _ = ctx
                    .send(
                        poise::CreateReply::default()
                            .content(format!("An error occurred: {}", error))
                            .ephemeral(true),
                    )
                    .await;
            }
            poise::FrameworkError::ArgumentParse { error, input, ctx, .. } => {
                error!(
                    "Argument parse error in '{}': {} (input: {:?})",
                    ctx.command().qualified_name,
                    error,
                    input
                );
            }
            poise::FrameworkError::MissingBotPermissions { missing_permissions, ctx, .. } => {
                error!(
                    "Bot missing permissions for '{}': {:?}",
                    ctx.command().qualified_name,
                    missing_permissions
                );
                let _ = ctx
                    .say(format!("Bot is missing permissions: {:?}", missing_permissions))
                    .await;
            }
            poise::FrameworkError::MissingUserPermissions { missing_permissions, ctx, .. } => {
                error!(
                    "User {} missing permissions for '{}': {:?}",
                    ctx.author().name,
                    ctx.command().qualified_name,
                    missing_permissions
                );
            }
            poise::FrameworkError::GuildOnly { ctx, .. } => {
                error!(
                    "Command '{}' is guild-only, used in DM by {}",
                    ctx.command().qualified_name,
                    ctx.author().name
                );
            }
            other => {
                error!("Other framework error: {}", other);
            }
        }
    })
}
