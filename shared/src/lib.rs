pub mod api;
pub mod client;
pub mod constants;
pub mod session;
pub mod slot_game;
pub mod validation;

pub use api::{ApiError, GameApi};
pub use client::HttpGameApi;
pub use session::{Renderer, SessionController, UiState, View};
pub use slot_game::{Symbol, SpinOutcome};
