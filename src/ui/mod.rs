pub mod app;
mod draft;
mod reflection;
mod status_bar;
pub mod theme;
mod widgets;

pub use app::render;
