#![warn(clippy::all, rust_2018_idioms)]

use click_draw::OverlayApp;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Click Draw")
            .with_transparent(true)
            .with_decorations(false)
            .with_always_on_top()
            .with_inner_size(click_draw::app::CONTROL_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Click Draw",
        options,
        Box::new(|cc| Ok(Box::new(OverlayApp::new(cc)))),
    )
}
