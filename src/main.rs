// GUI-subsystem binary so Windows never allocates a console window.
#![windows_subsystem = "windows"]

use eframe::egui;

use easel::app::EaselApp;
use easel::logger;

fn main() -> Result<(), eframe::Error> {
    // Session log first so every later step can report into it.
    logger::init();

    // Wide enough for the 1000x700 canvas plus the control panel.
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 768.0])
            .with_title("Easel"),
        ..Default::default()
    };

    eframe::run_native(
        "Easel",
        options,
        Box::new(|cc| Box::new(EaselApp::new(cc))),
    )
}
