#![warn(clippy::all, rust_2018_idioms)]

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Kid Studio")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        kid_studio::app::APP_ID,
        native_options,
        Box::new(|cc| Ok(Box::new(kid_studio::StudioApp::new(cc)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
