mod api;
mod auth;
mod event;
mod message;
mod session;
mod textarea;

pub use api::*;
pub use auth::*;
pub use event::*;
pub use message::*;
pub use session::*;
pub use textarea::*;
