//! High-level clients for the bot's two actors.

pub mod dispatch_client;
pub mod session_client;

pub use dispatch_client::DispatchClient;
pub use session_client::SessionClient;
