// Theme system
pub mod data;
pub mod io;
pub mod listener;
pub mod manager;

pub use data::{ColorId, FontId, Theme, ThemeType};
pub use listener::{ChannelListener, ThemeEvent};
pub use manager::ThemeManager;
