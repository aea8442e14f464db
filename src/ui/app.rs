//! Application orchestrator: owns the main window and drives it each frame.

use log::{error, info};

use crate::config::Settings;
use crate::ui::main_window::MainWindow;
use crate::ui::window::{Capabilities, ViewportBackend};

/// The top-level application, implementing [`eframe::App`].
///
/// eframe keeps a new native window hidden until its first frame is drawn,
/// so fullscreen is entered on that first frame before the window appears.
pub struct App {
    main: MainWindow,
    caps: Capabilities,
    initialized: bool,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings, initial_color: &str) -> Self {
        let caps = Capabilities::detect();
        info!("window capabilities: {caps:?}");
        Self {
            main: MainWindow::new(&settings, initial_color),
            caps,
            initialized: false,
        }
    }
}

impl eframe::App for App {
    /// The canvas paints its own (possibly translucent) fill.
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut backend = ViewportBackend::root(ctx, self.caps);

        if !self.initialized {
            self.initialized = true;
            if let Err(e) = self.main.initialize(&mut backend) {
                error!("could not enter fullscreen: {e}");
            }
        }

        if let Err(e) = self.main.show(ctx, &mut backend) {
            error!("{e}");
        }
    }
}
