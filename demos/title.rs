//! Writes a title into the lower part of an image, as large as it will fit.
//!
//! ```text
//! cargo run --example title -- <font.ttf> <image.png> <out.png> [text] [chars|classify]
//! ```

use boxfit::layout::{LayoutConfig, TextLayout, TokenizerKind};
use boxfit::{candidate_sizes, colours, Font, FontMetrics, PixmapCanvas, Px, Rect};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(font_path), Some(image_path), Some(out_path)) = (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: title <font.ttf> <image.png> <out.png> [text] [chars|classify]");
        std::process::exit(2);
    };
    let text = args
        .next()
        .unwrap_or_else(|| "谋杀我的完美偶像一二三四五六七八九十".to_string());
    let tokenizer: TokenizerKind = args
        .next()
        .map(|s| s.parse().expect("valid tokenizer name"))
        .unwrap_or_default();

    let font = Font::open(&font_path).expect("can load font");
    let mut canvas = PixmapCanvas::open(&image_path).expect("can load image");

    // a box across the middle 80% of the image, 60% of the way down
    let rect = Rect::from_fractions(canvas.width(), canvas.height(), 0.1, 0.6, 0.8, 0.2);

    // no font taller than the box can possibly fit
    let sizes = candidate_sizes(5, rect.height.0 as u32, 3);
    let candidates = font.at_sizes(&sizes);

    let config = LayoutConfig::for_box(&rect)
        .with_line_space(Px(10.0))
        .with_right_padding(Px(10.0));
    let layout = TextLayout::new(&text, &candidates, &tokenizer, config);

    match layout.draw_in(&mut canvas, &rect, colours::WHITE) {
        Ok(()) => {
            let font = layout.font().expect("layout was drawn");
            let lines = layout.lines().expect("layout was drawn");
            println!(
                "{} lines at size {}, {} tall",
                lines.len(),
                font.size,
                layout.height().expect("layout was drawn")
            );
            for line in lines {
                println!("  {:?} ({} wide)", line.text(), font.width(&line.text()));
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    canvas.save(&out_path).expect("can save image");
}
