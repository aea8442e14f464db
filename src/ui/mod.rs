//! UI layer: App orchestrator, main window, color menu, custom color dialog,
//! transparency panel and the window backend they drive.

pub mod app;
pub mod color_dialog;
pub mod color_menu;
pub mod colors;
pub mod main_window;
pub mod transparency;
pub mod window;
