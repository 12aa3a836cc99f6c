pub mod channel;
pub mod interaction;
pub mod message;

pub use channel::handle_channel_delete;
pub use interaction::handle_interaction;
pub use message::handle_message;
