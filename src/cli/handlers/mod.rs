//! Command handlers for CLI operations
//!
//! Each handler owns what its command needs and keeps execution separate
//! from parsing and configuration loading.

pub mod channels;
pub mod check;
pub mod multiply;
pub mod send;

pub use channels::ChannelsCommandHandler;
pub use check::CheckCommandHandler;
pub use multiply::MultiplyCommandHandler;
pub use send::SendCommandHandler;
