//! Headless gallery renderer
//!
//! Loads an image, builds every configured filter page, fits each page into the
//! display box and writes it out as a PNG.
//!
//! Usage:
//!   cargo run --example render_pages -- <image.tif> [gallery.json] [output_dir]
//!
//! Examples:
//!   cargo run --example render_pages -- scans/photo.tif
//!   RUST_LOG=debug cargo run --example render_pages -- scans/photo.tif gallery.json output/

use gallery::{Gallery, GalleryConfig};
use log::info;
use raster_core::CpuTextureFactory;
use std::path::PathBuf;

fn slug(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image.tif> [gallery.json] [output_dir]", args[0]);
        std::process::exit(1);
    }

    let source = &args[1];
    let config = match args.get(2) {
        Some(path) => GalleryConfig::from_file(path)?,
        None => GalleryConfig::default(),
    };
    let output_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));
    std::fs::create_dir_all(&output_dir)?;

    let mut gallery: Gallery = Gallery::build(config, source)?;
    let mut factory = CpuTextureFactory;

    loop {
        let index = gallery.current_index();
        let title = gallery.current().title.clone();
        let file = output_dir.join(format!("{index}_{}.png", slug(&title)));

        match gallery.display_current(&mut factory)? {
            Some(handle) => {
                handle.texture.save_resized(&file, handle.size)?;
                info!(
                    "{title}: {:.2}x{:.2} -> {}",
                    handle.size.width,
                    handle.size.height,
                    file.display()
                );
            }
            None => info!("{title}: nothing to display"),
        }

        if !gallery.next_page() {
            break;
        }
    }

    Ok(())
}
