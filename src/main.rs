use clap::Parser;

use glyph_export::{run, Args};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(manifest) => {
            log::info!("Ok. {} images in {}", manifest.glyphs.len(), args.out.display());
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
