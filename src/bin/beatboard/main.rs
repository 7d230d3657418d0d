//! beatboard - sticker sequencer in the terminal
//!
//! Drop stickers on the board, drag them around, and let the transport
//! play them in step order. Run with: cargo run

mod app;
mod ui;

use app::Beatboard;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut app = Beatboard::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tempo" => {
                if let Some(bpm) = args.next().and_then(|v| v.parse::<f64>().ok()) {
                    app = app.tempo(bpm);
                }
            }
            "--volume" => {
                if let Some(vol) = args.next().and_then(|v| v.parse::<f32>().ok()) {
                    app = app.master_volume(vol);
                }
            }
            other => {
                eprintln!("unknown option: {other}");
                eprintln!("usage: beatboard [--tempo BPM] [--volume 0..1]");
                std::process::exit(2);
            }
        }
    }

    app.run()
}
