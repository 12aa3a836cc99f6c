pub mod game_manager;
pub mod scheduler;
pub mod ticket_manager;

pub use game_manager::{BoardReply, GameManager, GameStart, JoinReply, StartReply, TextReply};
pub use scheduler::DelayedTasks;
pub use ticket_manager::TicketManager;
