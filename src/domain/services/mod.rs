mod app_state;
mod bubble;
mod bubble_list;
mod chat;
mod credentials;
pub mod events;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat::*;
pub use credentials::*;
pub use scroll::*;
