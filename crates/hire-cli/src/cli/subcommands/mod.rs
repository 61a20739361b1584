pub mod auth;
pub mod extract;

pub use auth::AuthCommands;
pub use extract::ExtractCommands;
