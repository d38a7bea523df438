mod app;
mod download;
mod upload;
mod utils;

use app::GifConverter;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([500.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conversor de GIF para PNG",
        options,
        Box::new(|cc| Box::new(GifConverter::new(cc))),
    )
}
