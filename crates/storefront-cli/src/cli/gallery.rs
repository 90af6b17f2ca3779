use anyhow::Result;
use clap::Args;
use std::path::Path;
use storefront::gallery::{GalleryImage, Lightbox};

#[derive(Args)]
pub struct GalleryArgs {
    /// Image paths in gallery order
    #[arg(required = true)]
    images: Vec<String>,

    /// Image to open first (1-based)
    #[arg(long, default_value = "1")]
    open: usize,

    /// Navigation steps: next, prev, close, or a 1-based image number
    #[arg(long = "nav")]
    steps: Vec<String>,
}

fn caption(src: &str) -> String {
    Path::new(src)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(src)
        .replace(['-', '_'], " ")
}

fn print_current(lightbox: &Lightbox) {
    match (lightbox.current(), lightbox.counter()) {
        (Some(image), Some(counter)) => println!("{}  {}  ({})", counter, image.src, image.alt),
        _ => println!("closed"),
    }
}

pub async fn execute(args: GalleryArgs) -> Result<()> {
    let images = args
        .images
        .iter()
        .map(|src| GalleryImage::new(src.clone(), caption(src)))
        .collect();
    let mut lightbox = Lightbox::new(images);

    lightbox.open(args.open.saturating_sub(1))?;
    print_current(&lightbox);

    for step in &args.steps {
        match step.as_str() {
            "next" => {
                lightbox.next();
            },
            "prev" | "previous" => {
                lightbox.previous();
            },
            "close" => lightbox.close(),
            number => {
                let index: usize = number
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid navigation step: {}", number))?;
                lightbox.jump_to(index.saturating_sub(1))?;
            },
        }
        print_current(&lightbox);
    }

    Ok(())
}
