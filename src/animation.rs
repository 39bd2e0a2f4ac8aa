use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat, Rgba, RgbaImage, imageops};

use crate::engine::{Layout, LayoutEngine, OutputFormat};
use crate::error::{Error, Result};
use crate::fixed_diagram::{ClusteredDiagram, FixedDiagram};

pub fn render_frames(engine: &dyn LayoutEngine, diagram: &FixedDiagram) -> Result<Vec<RgbaImage>> {
    diagram.validate()?;
    let total = diagram.frame_count();
    (0..total)
        .map(|i| -> Result<RgbaImage> {
            tracing::info!(diagram = diagram.name, "rendering frame {}/{}", i + 1, total);
            let png = engine.pipe(&diagram.frame_source(i), Layout::Neato, OutputFormat::Png)?;
            let img = image::load_from_memory_with_format(&png, ImageFormat::Png)?;
            Ok(img.to_rgba8())
        })
        .collect()
}

pub fn pad_frames(frames: Vec<RgbaImage>, background: [u8; 3]) -> Vec<RgbaImage> {
    let width = frames.iter().map(|f| f.width()).max().unwrap_or(0);
    let height = frames.iter().map(|f| f.height()).max().unwrap_or(0);
    let [r, g, b] = background;

    frames
        .into_iter()
        .map(|frame| {
            if frame.width() == width && frame.height() == height {
                return frame;
            }
            let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
            let x = (width - frame.width()) / 2;
            let y = (height - frame.height()) / 2;
            imageops::overlay(&mut canvas, &frame, i64::from(x), i64::from(y));
            canvas
        })
        .collect()
}

pub fn write_gif(frames: Vec<RgbaImage>, fps: f64, path: &Path) -> Result<()> {
    if frames.is_empty() {
        return Err(Error::NoFrames);
    }
    let delay = Delay::from_saturating_duration(Duration::from_secs_f64(1.0 / fps));
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new_with_speed(file, 10);
    encoder.set_repeat(Repeat::Infinite)?;
    encoder.encode_frames(frames.into_iter().map(|f| Frame::from_parts(f, 0, 0, delay)))?;
    Ok(())
}

pub fn render_gif(engine: &dyn LayoutEngine, diagram: &FixedDiagram, path: &Path) -> Result<()> {
    let frames = render_frames(engine, diagram)?;
    let frames = pad_frames(frames, diagram.background);
    write_gif(frames, diagram.fps, path)?;
    tracing::info!(path = %path.display(), "animation written");
    Ok(())
}

pub fn render_png(engine: &dyn LayoutEngine, diagram: &ClusteredDiagram, path: &Path) -> Result<()> {
    let png = engine.pipe(&diagram.source(), Layout::Dot, OutputFormat::Png)?;
    std::fs::write(path, png)?;
    tracing::info!(path = %path.display(), "diagram written");
    Ok(())
}
