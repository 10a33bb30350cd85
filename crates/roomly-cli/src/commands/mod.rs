pub mod available;
pub mod common;
pub mod completions;
pub mod config;
pub mod reserve;
pub mod rooms;
pub mod upcoming;
