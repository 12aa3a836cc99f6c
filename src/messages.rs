// src/messages.rs
//! Embeds, components and reply texts for both bots.

use poise::serenity_prelude::{self as serenity, UserId};
use std::time::Duration;

use crate::games::{
    CoinFace, EliminationResult, GameKind, Hint, JoinError, MoveError, MoveOutcome,
    NumberOutcome, Quiz, QuizOutcome, StartError, TicTacToe, WordleGuess, WordleStatus,
};
use crate::games::elimination::MIN_PLAYERS;
use crate::interaction_id::{ComponentId, ModalId, SessionId};
use crate::state::Leaderboard;

const GREEN: u32 = 0x00ff00;
const YELLOW: u32 = 0xffff00;
const RED: u32 = 0xff0000;
const BLUE: u32 = 0x0099ff;
const PURPLE: u32 = 0x9900ff;
const ORANGE: u32 = 0xff9900;
const PUMPKIN: u32 = 0xff6600;

const BLANK_LABEL: &str = "\u{200b}";

fn mention(user: UserId) -> String {
    format!("<@{}>", user)
}

fn unicode(emoji: &str) -> serenity::ReactionType {
    serenity::ReactionType::Unicode(emoji.to_string())
}

// ========== Game menu ==========

pub fn game_menu() -> (serenity::CreateEmbed, Vec<serenity::CreateActionRow>) {
    let embed = serenity::CreateEmbed::new()
        .title("🎮 Available Minigames")
        .description("Pick a minigame to start:")
        .color(GREEN);

    let options = GameKind::ALL
        .iter()
        .map(|kind| {
            serenity::CreateSelectMenuOption::new(kind.label(), kind.as_str())
                .description(kind.description())
                .emoji(unicode(kind.emoji()))
        })
        .collect();

    let menu = serenity::CreateSelectMenu::new(
        ComponentId::SelectGame.to_string(),
        serenity::CreateSelectMenuKind::String { options },
    )
    .placeholder("Choose a minigame");

    (embed, vec![serenity::CreateActionRow::SelectMenu(menu)])
}

// ========== Tic Tac Toe ==========

pub fn tictactoe_board(
    session: SessionId,
    game: &TicTacToe,
) -> (serenity::CreateEmbed, Vec<serenity::CreateActionRow>) {
    let embed = serenity::CreateEmbed::new()
        .title("❌ Tic Tac Toe ⭕")
        .description(format!("Turn: {}\n\n{}", game.turn().emoji(), game.render()))
        .color(GREEN);

    let rows = (0..3)
        .map(|row| {
            let buttons = (0..3)
                .map(|col| {
                    let cell = row * 3 + col;
                    let button = serenity::CreateButton::new(
                        ComponentId::TicTacToeCell { session, cell }.to_string(),
                    )
                    .style(serenity::ButtonStyle::Secondary);
                    match game.board()[cell] {
                        Some(mark) => button.emoji(unicode(mark.emoji())),
                        None => button.label(BLANK_LABEL),
                    }
                })
                .collect();
            serenity::CreateActionRow::Buttons(buttons)
        })
        .collect();

    (embed, rows)
}

pub fn tictactoe_finished(game: &TicTacToe, outcome: MoveOutcome) -> serenity::CreateEmbed {
    let (result, colour) = match outcome {
        MoveOutcome::Won(mark) => (format!("Winner: {}", mark.emoji()), GREEN),
        _ => ("Draw!".to_string(), YELLOW),
    };

    serenity::CreateEmbed::new()
        .title("🎉 Game Over!")
        .description(format!("{}\n\n**{}**", game.render(), result))
        .color(colour)
}

// ========== Wordle ==========

pub fn wordle_intro(max_attempts: usize) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("📝 Wordle")
        .description(
            "Guess the 5-letter word!\n\n\
            🟩 = right letter, right spot\n\
            🟨 = right letter, wrong spot\n\
            ⬜ = letter is not in the word\n\n\
            Type your guess in the chat.",
        )
        .field(
            "Attempts left",
            format!("{}/{}", max_attempts, max_attempts),
            false,
        )
        .color(YELLOW)
}

/// Either a plain progress line or a final embed
pub enum WordleReply {
    Progress(String),
    Finished(serenity::CreateEmbed),
}

pub fn wordle_reply(guess: &WordleGuess, target: &str) -> WordleReply {
    match guess.status {
        WordleStatus::Guessing { attempts_left } => WordleReply::Progress(format!(
            "{}\nAttempts left: {}",
            guess.render_feedback(),
            attempts_left
        )),
        WordleStatus::Won { attempts } => WordleReply::Finished(
            serenity::CreateEmbed::new()
                .title("🎉 You won!")
                .description(format!(
                    "The word was: **{}**\nAttempts used: {}",
                    target, attempts
                ))
                .color(GREEN),
        ),
        WordleStatus::Lost => WordleReply::Finished(
            serenity::CreateEmbed::new()
                .title("😢 You lost")
                .description(format!(
                    "{}\nThe word was: **{}**",
                    guess.render_feedback(),
                    target
                ))
                .color(RED),
        ),
    }
}

// ========== Quiz ==========

pub fn quiz_question(
    session: SessionId,
    quiz: &Quiz,
) -> (serenity::CreateEmbed, Vec<serenity::CreateActionRow>) {
    let embed = serenity::CreateEmbed::new()
        .title("❓ Quiz")
        .description(quiz.question())
        .color(BLUE);

    let buttons = quiz
        .options()
        .iter()
        .enumerate()
        .map(|(option, label)| {
            serenity::CreateButton::new(ComponentId::QuizAnswer { session, option }.to_string())
                .label(label)
                .style(serenity::ButtonStyle::Primary)
        })
        .collect();

    (embed, vec![serenity::CreateActionRow::Buttons(buttons)])
}

pub fn quiz_result(outcome: &QuizOutcome) -> serenity::CreateEmbed {
    if outcome.correct {
        serenity::CreateEmbed::new()
            .title("✅ Correct!")
            .description("Well done, that's the right answer.")
            .color(GREEN)
    } else {
        serenity::CreateEmbed::new()
            .title("❌ Wrong")
            .description(format!("The correct answer was: **{}**", outcome.correct_option))
            .color(RED)
    }
}

// ========== Elimination ==========

pub fn elimination_lobby(
    session: SessionId,
    players: &[UserId],
) -> (serenity::CreateEmbed, Vec<serenity::CreateActionRow>) {
    let mut description = format!("Join the game!\n\nPlayers: {}", players.len());
    if players.is_empty() {
        description.push_str("\n\n⚠️ The game can start once at least 2 players have joined.");
    } else {
        let list: Vec<String> = players.iter().copied().map(mention).collect();
        description.push('\n');
        description.push_str(&list.join("\n"));
    }

    let embed = serenity::CreateEmbed::new()
        .title("🔫 Russian Roulette")
        .description(description)
        .color(RED);

    let buttons = vec![
        serenity::CreateButton::new(ComponentId::EliminationJoin { session }.to_string())
            .label("Join")
            .style(serenity::ButtonStyle::Success)
            .emoji(unicode("✅")),
        serenity::CreateButton::new(ComponentId::EliminationStart { session }.to_string())
            .label("Start")
            .style(serenity::ButtonStyle::Danger)
            .emoji(unicode("🔫")),
    ];

    (embed, vec![serenity::CreateActionRow::Buttons(buttons)])
}

pub fn elimination_result(result: &EliminationResult) -> serenity::CreateEmbed {
    let survivors: Vec<String> = result.survivors.iter().copied().map(mention).collect();
    serenity::CreateEmbed::new()
        .title("💥 BANG!")
        .description(format!(
            "{} has been eliminated!\n\n**Survivors:**\n{}",
            mention(result.eliminated),
            survivors.join("\n")
        ))
        .color(RED)
}

// ========== Number guess ==========

pub fn number_intro() -> serenity::CreateEmbed {
    let range = crate::games::number_guess::RANGE;
    serenity::CreateEmbed::new()
        .title("🔢 Guess the Number")
        .description(format!(
            "I picked a number between {} and {}.\n\nType your guess in the chat!",
            range.start(),
            range.end()
        ))
        .field("Attempts", "0", false)
        .color(PURPLE)
}

/// Hint line for a wrong guess, embed for the solving guess
pub enum NumberReply {
    Hint(String),
    Solved(serenity::CreateEmbed),
}

pub fn number_reply(outcome: NumberOutcome, target: u32) -> NumberReply {
    match outcome {
        NumberOutcome::Wrong { hint, attempts } => {
            let direction = match hint {
                Hint::Higher => "higher",
                Hint::Lower => "lower",
            };
            NumberReply::Hint(format!(
                "❌ Wrong. The number is **{}**. Attempts: {}",
                direction, attempts
            ))
        }
        NumberOutcome::Solved { attempts } => NumberReply::Solved(
            serenity::CreateEmbed::new()
                .title("🎉 Correct!")
                .description(format!("The number was **{}**\nAttempts: {}", target, attempts))
                .color(GREEN),
        ),
    }
}

// ========== Coin flip ==========

pub fn coin_flip(face: CoinFace) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("🪙 Coin Flip")
        .description(format!("{} It landed on **{}**!", face.emoji(), face.name()))
        .color(face.colour())
}

// ========== Rejections ==========

pub const SESSION_MISSING: &str = "❌ This game is no longer active.";

pub fn move_rejected(error: MoveError) -> &'static str {
    match error {
        MoveError::Occupied(_) => "❌ That cell is already taken!",
        MoveError::OutOfRange(_) => "❌ That cell does not exist.",
    }
}

pub fn join_rejected(error: JoinError) -> &'static str {
    match error {
        JoinError::AlreadyJoined => "❌ You are already in the game!",
        JoinError::AlreadyStarted => "❌ The game has already started.",
    }
}

pub fn start_rejected(error: StartError) -> String {
    match error {
        StartError::NotEnoughPlayers { joined } => format!(
            "❌ At least {} players are needed to start ({} joined).",
            MIN_PLAYERS, joined
        ),
        StartError::AlreadyStarted => "❌ The game has already started.".to_string(),
    }
}

// ========== Moderation config ==========

pub fn config_menu() -> (serenity::CreateEmbed, Vec<serenity::CreateActionRow>) {
    let embed = serenity::CreateEmbed::new()
        .title("⚙️ Server Configuration")
        .description("Configure the moderation system")
        .color(ORANGE);

    let buttons = vec![
        serenity::CreateButton::new(ComponentId::ConfigBadWords.to_string())
            .label("Forbidden Words")
            .style(serenity::ButtonStyle::Danger)
            .emoji(unicode("🚫")),
        serenity::CreateButton::new(ComponentId::ConfigTicketRoles.to_string())
            .label("Ticket Roles")
            .style(serenity::ButtonStyle::Primary)
            .emoji(unicode("🎫")),
        serenity::CreateButton::new(ComponentId::ConfigBypassRole.to_string())
            .label("Bypass Role")
            .style(serenity::ButtonStyle::Success)
            .emoji(unicode("✅")),
    ];

    (embed, vec![serenity::CreateActionRow::Buttons(buttons)])
}

pub fn config_modal(modal: ModalId) -> serenity::CreateModal {
    let (title, label, style, placeholder) = match modal {
        ModalId::BadWords => (
            "Configure Forbidden Words",
            "Forbidden words (comma separated)",
            serenity::InputTextStyle::Paragraph,
            "darn, heck, fiddlesticks",
        ),
        ModalId::TicketRoles => (
            "Configure Ticket Roles",
            "Role IDs (comma separated)",
            serenity::InputTextStyle::Short,
            "123456789, 987654321",
        ),
        ModalId::BypassRole => (
            "Configure Bypass Role",
            "ID of the role allowed to use forbidden words",
            serenity::InputTextStyle::Short,
            "123456789012345678",
        ),
    };

    let input = serenity::CreateInputText::new(style, label, modal.input_id())
        .placeholder(placeholder)
        .required(true);

    serenity::CreateModal::new(modal.to_string(), title)
        .components(vec![serenity::CreateActionRow::InputText(input)])
}

// ========== Tickets ==========

pub fn ticket_opened(user: UserId, content: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("🎫 Moderation Ticket")
        .description(format!(
            "{} used a forbidden word.\n\n**Message:** {}\n\nA moderator will review your case soon.",
            mention(user),
            content
        ))
        .color(RED)
        .timestamp(serenity::Timestamp::now())
}

pub fn ticket_close_row(user: UserId) -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![serenity::CreateButton::new(
        ComponentId::CloseTicket { user }.to_string(),
    )
    .label("Close Ticket")
    .style(serenity::ButtonStyle::Danger)
    .emoji(unicode("🔒"))])
}

pub fn ticket_closed(closed_by: UserId, delay: Duration) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("🔒 Ticket Closed")
        .description(format!(
            "Ticket closed by {}\n\nThis channel will be deleted in {} seconds...",
            mention(closed_by),
            delay.as_secs()
        ))
        .color(RED)
        .timestamp(serenity::Timestamp::now())
}

// ========== Candy ledger ==========

pub fn candy_added(giver: &str, target: Option<&str>, amount: u64, total: u64) -> String {
    match target {
        Some(name) => format!(
            "🍬 **{}** gave **{}** candies to **{}**! 🎃\n{}'s total: **{}** candies 👻",
            giver, amount, name, name, total
        ),
        None => format!(
            "🍬 **{}** added **{}** candies! 🎃\nRunning total: **{}** candies 👻",
            giver, amount, total
        ),
    }
}

pub fn candy_removed(remover: &str, target: Option<&str>, amount: u64, total: u64) -> String {
    match target {
        Some(name) => format!(
            "🎃 **{}** took **{}** candies from **{}**! 👻\n{}'s total: **{}** candies",
            remover, amount, name, name, total
        ),
        None => format!(
            "🎃 **{}** lost **{}** candies! 👻\nRemaining total: **{}** candies",
            remover, amount, total
        ),
    }
}

pub fn candy_missing(username: &str) -> String {
    format!("❌ **{}** has no candies registered in this server! 👻", username)
}

pub const CANDY_EMPTY: &str =
    "👻 No candies have been collected in this server yet... go trick-or-treating! 🎃";

fn medal(rank: usize) -> &'static str {
    match rank {
        0 => "🥇",
        1 => "🥈",
        2 => "🥉",
        _ => "🍬",
    }
}

pub fn candy_leaderboard_lines(board: &Leaderboard) -> String {
    board
        .entries
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            format!(
                "{} **{}**: {} candies\n",
                medal(rank),
                entry.username,
                entry.total
            )
        })
        .collect()
}

pub fn candy_leaderboard(board: &Leaderboard) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("🎃 HALLOWEEN CANDIES 🎃")
        .description(candy_leaderboard_lines(board))
        .thumbnail("https://i.imgur.com/z6VIY1h.gif")
        .field(
            "👻 Server Total",
            format!("🍭 **{}** candies collected", board.server_total),
            false,
        )
        .footer(serenity::CreateEmbedFooter::new("Happy Halloween! 🎃"))
        .color(PUMPKIN)
        .timestamp(serenity::Timestamp::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RankedEntry;

    fn entry(name: &str, total: u64) -> RankedEntry {
        RankedEntry {
            user_id: name.to_string(),
            username: name.to_string(),
            total,
        }
    }

    #[test]
    fn test_leaderboard_medals() {
        let board = Leaderboard {
            entries: vec![
                entry("ana", 9),
                entry("ben", 5),
                entry("cy", 3),
                entry("dee", 1),
            ],
            server_total: 18,
        };
        assert_eq!(
            candy_leaderboard_lines(&board),
            "🥇 **ana**: 9 candies\n🥈 **ben**: 5 candies\n🥉 **cy**: 3 candies\n🍬 **dee**: 1 candies\n"
        );
    }

    #[test]
    fn test_candy_texts_mention_target() {
        assert!(candy_added("mod", Some("kid"), 3, 10).contains("gave **3** candies to **kid**"));
        assert!(candy_added("kid", None, 3, 10).contains("Running total: **10**"));
        assert!(candy_removed("mod", Some("kid"), 2, 0).contains("kid's total: **0**"));
    }

    #[test]
    fn test_rejection_texts() {
        assert_eq!(move_rejected(MoveError::Occupied(4)), "❌ That cell is already taken!");
        assert_eq!(join_rejected(JoinError::AlreadyJoined), "❌ You are already in the game!");
        assert!(start_rejected(StartError::NotEnoughPlayers { joined: 1 }).contains("(1 joined)"));
    }

    #[test]
    fn test_number_hint_text() {
        match number_reply(
            NumberOutcome::Wrong {
                hint: Hint::Higher,
                attempts: 1,
            },
            250,
        ) {
            NumberReply::Hint(text) => assert!(text.contains("**higher**")),
            NumberReply::Solved(_) => panic!("expected a hint"),
        }
    }
}
