pub mod app_config;
pub mod session;

pub use app_config::{BusinessRules, Config};
pub use session::{InMemorySessionStore, SessionRepository, SessionUser};
