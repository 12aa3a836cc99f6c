pub mod candy;
pub mod config;
pub mod general;
pub mod setup;

pub use candy::{add, remove, see};
pub use config::config;
pub use general::{help, ping};
pub use setup::setup;
