// UI Components
pub mod command_bar;
pub mod panel;
pub mod popup;
pub mod status_bar;

pub use command_bar::{CommandBar, CommandItem};
pub use panel::{Panel, PanelStatus, PANEL_HEADER_LINES};
pub use popup::{ConfirmPurpose, InputPurpose, ListPurpose, Popup, PopupKind, TextInput};
pub use status_bar::StatusBar;
