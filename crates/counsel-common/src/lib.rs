pub mod errors;
pub mod events;
pub mod id;

pub use errors::{ApiError, ChatError, ConfigError};
pub use events::{ChatEvent, EventBus};
pub use id::{ClientId, SessionId, UserId};
