// Data Models
pub mod file_entry;
pub mod panel_state;
pub mod tab_state;

pub use panel_state::{PanelState, SortBy};
pub use tab_state::PanelTabs;
