use poise::serenity_prelude::{self as serenity, RoleId};
use tracing::{debug, error, info, warn};

use crate::error::BotError;
use crate::games::{GameKind, MoveOutcome};
use crate::interaction_id::{ComponentId, ModalId};
use crate::managers::{BoardReply, GameStart, JoinReply, StartReply};
use crate::messages;
use crate::state::{parse_role_list, parse_word_list};
use crate::{Data, Error};

/// Route button clicks, select menu choices and modal submissions.
/// Slash commands are handled by the framework and ignored here.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: &serenity::Interaction,
    data: &Data,
) -> Result<(), Error> {
    match interaction {
        serenity::Interaction::Component(component) => handle_component(ctx, component, data).await,
        serenity::Interaction::Modal(modal) => handle_modal(ctx, modal, data).await,
        _ => Ok(()),
    }
}

fn ephemeral(content: impl Into<String>) -> serenity::CreateInteractionResponse {
    serenity::CreateInteractionResponse::Message(
        serenity::CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Replace the clicked message in place
fn update(
    embed: serenity::CreateEmbed,
    components: Vec<serenity::CreateActionRow>,
) -> serenity::CreateInteractionResponse {
    serenity::CreateInteractionResponse::UpdateMessage(
        serenity::CreateInteractionResponseMessage::new()
            .embed(embed)
            .components(components),
    )
}

async fn handle_component(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let id: ComponentId = match component.data.custom_id.parse() {
        Ok(id) => id,
        Err(e) => {
            debug!("Ignoring component interaction: {}", e);
            return Ok(());
        }
    };

    let response = match id {
        ComponentId::SelectGame => {
            let serenity::ComponentInteractionDataKind::StringSelect { values } = &component.data.kind
            else {
                return Ok(());
            };
            let Some(kind) = selected_game(values) else {
                warn!("Unknown game selected: {:?}", values);
                return Ok(());
            };
            start_game(kind, component, data)
        }
        ComponentId::TicTacToeCell { session, cell } => {
            match data.game_manager.play_tictactoe(&session, cell, component.user.id) {
                BoardReply::Moved { game, outcome } => match outcome {
                    MoveOutcome::Continue { .. } => {
                        let (embed, rows) = messages::tictactoe_board(session, &game);
                        update(embed, rows)
                    }
                    MoveOutcome::Won(_) | MoveOutcome::Draw => {
                        info!("Tic Tac Toe {} finished: {:?}", session, outcome);
                        update(messages::tictactoe_finished(&game, outcome), vec![])
                    }
                },
                BoardReply::Rejected(e) => ephemeral(messages::move_rejected(e)),
                BoardReply::Missing => ephemeral(messages::SESSION_MISSING),
            }
        }
        ComponentId::QuizAnswer { session, option } => {
            match data.game_manager.answer_quiz(&session, option) {
                Some(outcome) => update(messages::quiz_result(&outcome), vec![]),
                None => ephemeral(messages::SESSION_MISSING),
            }
        }
        ComponentId::EliminationJoin { session } => {
            match data.game_manager.join_elimination(&session, component.user.id) {
                JoinReply::Joined { players } => {
                    let (embed, rows) = messages::elimination_lobby(session, &players);
                    update(embed, rows)
                }
                JoinReply::Rejected(e) => ephemeral(messages::join_rejected(e)),
                JoinReply::Missing => ephemeral(messages::SESSION_MISSING),
            }
        }
        ComponentId::EliminationStart { session } => {
            match data.game_manager.start_elimination(&session) {
                StartReply::Resolved(result) => {
                    info!("Elimination {} eliminated {}", session, result.eliminated);
                    update(messages::elimination_result(&result), vec![])
                }
                StartReply::Rejected(e) => ephemeral(messages::start_rejected(e)),
                StartReply::Missing => ephemeral(messages::SESSION_MISSING),
            }
        }
        ComponentId::ConfigBadWords => {
            serenity::CreateInteractionResponse::Modal(messages::config_modal(ModalId::BadWords))
        }
        ComponentId::ConfigTicketRoles => {
            serenity::CreateInteractionResponse::Modal(messages::config_modal(ModalId::TicketRoles))
        }
        ComponentId::ConfigBypassRole => {
            serenity::CreateInteractionResponse::Modal(messages::config_modal(ModalId::BypassRole))
        }
        ComponentId::CloseTicket { user } => return close_ticket(ctx, component, user, data).await,
    };

    component.create_response(ctx, response).await?;
    Ok(())
}

/// First valid game value of a select menu choice
fn selected_game(values: &[String]) -> Option<GameKind> {
    values.iter().find_map(|value| value.parse().ok())
}

fn start_game(
    kind: GameKind,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> serenity::CreateInteractionResponse {
    match data
        .game_manager
        .start(kind, component.user.id, component.channel_id)
    {
        GameStart::TicTacToe { session, game } => {
            let (embed, rows) = messages::tictactoe_board(session, &game);
            update(embed, rows)
        }
        GameStart::Wordle { max_attempts, .. } => update(messages::wordle_intro(max_attempts), vec![]),
        GameStart::Quiz { session, quiz } => {
            let (embed, rows) = messages::quiz_question(session, &quiz);
            update(embed, rows)
        }
        GameStart::Elimination { session } => {
            let (embed, rows) = messages::elimination_lobby(session, &[]);
            update(embed, rows)
        }
        GameStart::NumberGuess { .. } => update(messages::number_intro(), vec![]),
        GameStart::CoinFlip(face) => update(messages::coin_flip(face), vec![]),
    }
}

/// Permissions are only resolved on interactions sent from a guild
fn can_manage_channels(permissions: Option<serenity::Permissions>) -> bool {
    permissions.is_some_and(|p| p.manage_channels())
}

async fn close_ticket(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    owner: serenity::UserId,
    data: &Data,
) -> Result<(), Error> {
    if !can_manage_channels(component.member.as_ref().and_then(|m| m.permissions)) {
        component
            .create_response(
                ctx,
                ephemeral("❌ You need the Manage Channels permission to close tickets."),
            )
            .await?;
        return Ok(());
    }

    let guild_id = component.guild_id.ok_or(BotError::NoGuild)?;
    let tickets = &data.ticket_manager;

    if tickets.is_deletion_pending(component.channel_id) {
        component
            .create_response(ctx, ephemeral("🔒 This ticket is already closing."))
            .await?;
        return Ok(());
    }

    if let Err(e) = tickets.release_member(&ctx.http, guild_id, owner).await {
        warn!("Failed to release ticket owner {}: {}", owner, e);
    }

    component
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .embed(messages::ticket_closed(component.user.id, tickets.close_delay())),
            ),
        )
        .await?;

    if tickets.schedule_deletion(ctx.http.clone(), component.channel_id) {
        info!(
            "Ticket {} closed by {}, deleting in {:?}",
            component.channel_id,
            component.user.name,
            tickets.close_delay()
        );
    }
    Ok(())
}

/// Value of the text input `input_id` in a submitted modal
fn input_value(modal: &serenity::ModalInteraction, input_id: &str) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            serenity::ActionRowComponent::InputText(input) if input.custom_id == input_id => {
                input.value.clone()
            }
            _ => None,
        })
}

async fn handle_modal(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), Error> {
    let modal_id: ModalId = match modal.data.custom_id.parse() {
        Ok(id) => id,
        Err(e) => {
            debug!("Ignoring modal submission: {}", e);
            return Ok(());
        }
    };

    let guild_id = modal.guild_id.ok_or(BotError::NoGuild)?;
    let guild_key = guild_id.to_string();
    let value = input_value(modal, modal_id.input_id()).unwrap_or_default();

    let reply = match modal_id {
        ModalId::BadWords => {
            let mut store = data.guild_configs.write().await;
            let count = store.set_bad_words(&guild_key, parse_word_list(&value));
            if let Err(e) = store.save().await {
                error!("Failed to save guild configs: {}", e);
            }
            info!("Guild {} configured {} forbidden words", guild_id, count);
            format!("✅ {} forbidden words configured.", count)
        }
        ModalId::TicketRoles => {
            let mut store = data.guild_configs.write().await;
            let count = store.set_ticket_roles(&guild_key, parse_role_list(&value));
            if let Err(e) = store.save().await {
                error!("Failed to save guild configs: {}", e);
            }
            info!("Guild {} configured {} ticket roles", guild_id, count);
            format!("✅ {} ticket roles configured.", count)
        }
        ModalId::BypassRole => {
            let roles = guild_id.roles(&ctx.http).await?;
            let role = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|id| *id != 0)
                .and_then(|id| roles.get(&RoleId::new(id)));

            match role {
                Some(role) => {
                    let mut store = data.guild_configs.write().await;
                    store.set_bypass_role(&guild_key, &role.id.to_string());
                    if let Err(e) = store.save().await {
                        error!("Failed to save guild configs: {}", e);
                    }
                    info!("Guild {} bypass role set to {} ({})", guild_id, role.name, role.id);
                    format!("✅ The role **{}** can now use forbidden words.", role.name)
                }
                None => "❌ No role with that ID exists in this server.".to_string(),
            }
        }
    };

    modal.create_response(ctx, ephemeral(reply)).await?;
    Ok(())
}
