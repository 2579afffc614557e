//! Synthetic frame source.
//!
//! A white canvas with a handful of filled shapes drifting around and
//! bouncing off the edges. Each call to [`FrameSource::next_frame`] advances
//! every shape one step and returns the scene as a JPEG.

use std::f64::consts::TAU;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use rand::Rng;

use crate::config::SceneConfig;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: u32,
    pub color: Rgb<u8>,
}

impl Shape {
    fn random<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let size = rng.random_range(config.min_size..=config.max_size);
        let x = random_position(rng, size, config.width);
        let y = random_position(rng, size, config.height);
        let speed = rng.random_range(config.min_speed..=config.max_speed);
        let angle = rng.random_range(0.0..TAU);
        let kind = match rng.random_range(0..3) {
            0 => ShapeKind::Circle,
            1 => ShapeKind::Rectangle,
            _ => ShapeKind::Triangle,
        };
        Self {
            kind,
            x,
            y,
            vx: speed * angle.cos(),
            vy: speed * angle.sin(),
            size,
            color: Rgb([rng.random(), rng.random(), rng.random()]),
        }
    }

    /// Advance one step, reflecting off the frame edges.
    pub fn step(&mut self, width: u32, height: u32) {
        let size = f64::from(self.size);
        self.x += self.vx;
        self.y += self.vy;
        (self.x, self.vx) = bounce(self.x, self.vx, size, f64::from(width));
        (self.y, self.vy) = bounce(self.y, self.vy, size, f64::from(height));
    }

    fn draw(&self, frame: &mut RgbImage) {
        #[allow(clippy::cast_possible_truncation)]
        let (cx, cy) = (self.x as i64, self.y as i64);
        let s = i64::from(self.size);
        for py in cy - s..=cy + s {
            let (dy, row) = (py - cy, py - (cy - s));
            for px in cx - s..=cx + s {
                let dx = px - cx;
                let inside = match self.kind {
                    ShapeKind::Circle => dx * dx + dy * dy <= s * s,
                    ShapeKind::Rectangle => true,
                    // Apex at the top, base spanning the full width at the bottom.
                    ShapeKind::Triangle => 2 * dx.abs() <= row,
                };
                if inside {
                    put(frame, px, py, self.color);
                }
            }
        }
    }
}

fn random_position<R: Rng + ?Sized>(rng: &mut R, size: u32, extent: u32) -> f64 {
    let low = f64::from(size);
    let high = f64::from(extent.saturating_sub(size).max(size + 1));
    rng.random_range(low..high)
}

fn bounce(position: f64, velocity: f64, size: f64, extent: f64) -> (f64, f64) {
    if position - size < 0.0 {
        (size, -velocity)
    } else if position + size > extent {
        (extent - size, -velocity)
    } else {
        (position, velocity)
    }
}

fn put(frame: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x < frame.width() && y < frame.height() {
        frame.put_pixel(x, y, color);
    }
}

pub struct Scene {
    width: u32,
    height: u32,
    shapes: Vec<Shape>,
}

impl Scene {
    /// Populate a scene with `config.shapes` random shapes (at least one).
    pub fn random<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let shapes = (0..config.shapes.max(1)).map(|_| Shape::random(config, rng)).collect();
        Self { width: config.width, height: config.height, shapes }
    }

    #[must_use]
    pub fn with_shapes(width: u32, height: u32, shapes: Vec<Shape>) -> Self {
        Self { width, height, shapes }
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn step(&mut self) {
        for shape in &mut self.shapes {
            shape.step(self.width, self.height);
        }
    }

    #[must_use]
    pub fn render(&self) -> RgbImage {
        let mut frame = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        for shape in &self.shapes {
            shape.draw(&mut frame);
        }
        frame
    }
}

/// Scene plus encoder settings: one JPEG per call.
pub struct FrameSource {
    scene: Scene,
    quality: u8,
}

impl FrameSource {
    #[must_use]
    pub fn new(scene: Scene, quality: u8) -> Self {
        Self { scene, quality }
    }

    /// Step the scene and encode it.
    ///
    /// # Errors
    ///
    /// Returns the encoder's error if the frame cannot be written as JPEG.
    pub fn next_frame(&mut self) -> Result<Vec<u8>, image::ImageError> {
        self.scene.step();
        encode_jpeg(&self.scene.render(), self.quality)
    }
}

/// Encode `frame` as baseline JPEG at `quality` (1–100).
///
/// # Errors
///
/// Returns the encoder's error for images it cannot represent.
pub fn encode_jpeg(frame: &RgbImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).encode_image(frame)?;
    Ok(out)
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod tests;
