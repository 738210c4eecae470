pub mod app;
pub mod components;
pub mod config;
pub mod renderer;
pub mod styles;

pub use app::App;
