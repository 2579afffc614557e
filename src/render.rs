//! Frame renderer.
//!
//! Holds the latest received blob and draws it onto the canvas. There is no
//! queue: a blob that arrives before the previous one was drawn replaces it.
//! At most one draw runs at a time; a draw started while another is in
//! flight returns [`DrawOutcome::Busy`] without touching anything, and the
//! blob it would have drawn stays pending for the next trigger.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use canvas::Canvas;
use image::RgbaImage;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Bytes;

use crate::error::ClientError;

/// A decoded frame, ready to be drawn.
pub type Bitmap = RgbaImage;

/// Turns an opaque blob into a bitmap.
#[async_trait::async_trait]
pub trait FrameDecoder: Send + Sync {
    async fn decode(&self, blob: Bytes) -> Result<Bitmap, ClientError>;
}

/// Decodes any format the `image` crate was built with (JPEG and PNG here),
/// on the blocking pool.
pub struct ImageDecoder;

#[async_trait::async_trait]
impl FrameDecoder for ImageDecoder {
    async fn decode(&self, blob: Bytes) -> Result<Bitmap, ClientError> {
        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&blob)).await??;
        Ok(decoded.into_rgba8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Another draw is in flight.
    Busy,
    /// No canvas is attached.
    NoSurface,
    /// Nothing pending.
    Idle,
    /// A frame of this size was drawn.
    Drawn { width: u32, height: u32 },
}

/// Clears the in-flight flag when dropped, whichever way the draw ends.
struct DrawGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> DrawGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self { flag })
    }
}

impl Drop for DrawGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct Renderer {
    decoder: Arc<dyn FrameDecoder>,
    pending: Mutex<Option<Bytes>>,
    drawing: AtomicBool,
    surface: Mutex<Option<Canvas>>,
    frames_drawn: watch::Sender<u64>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Renderer {
    /// Renderer drawing onto `surface` (or nowhere, if `None`) with the
    /// default [`ImageDecoder`].
    #[must_use]
    pub fn new(surface: Option<Canvas>) -> Self {
        Self::with_decoder(surface, Arc::new(ImageDecoder))
    }

    #[must_use]
    pub fn with_decoder(surface: Option<Canvas>, decoder: Arc<dyn FrameDecoder>) -> Self {
        Self {
            decoder,
            pending: Mutex::new(None),
            drawing: AtomicBool::new(false),
            surface: Mutex::new(surface),
            frames_drawn: watch::Sender::new(0),
        }
    }

    /// Record `blob` as the next frame to draw, replacing any undrawn one.
    pub fn submit(&self, blob: Bytes) {
        if lock(&self.pending).replace(blob).is_some() {
            tracing::trace!("undrawn frame replaced");
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        *self.frames_drawn.borrow()
    }

    /// Resolve once at least `count` frames have been drawn in total.
    pub async fn wait_for_frames(&self, count: u64) {
        let mut drawn = self.frames_drawn.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        if let Err(error) = drawn.wait_for(|drawn| *drawn >= count).await {
            tracing::debug!(%error, "frame counter closed");
        }
    }

    /// Current canvas size, if a canvas is attached.
    #[must_use]
    pub fn surface_dimensions(&self) -> Option<(u32, u32)> {
        lock(&self.surface).as_ref().map(Canvas::dimensions)
    }

    /// Run `f` against the attached canvas.
    pub fn with_surface<R>(&self, f: impl FnOnce(&Canvas) -> R) -> Option<R> {
        lock(&self.surface).as_ref().map(f)
    }

    /// Draw the pending frame, if any.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error when the pending blob is not a readable
    /// image. The blob is consumed either way and the in-flight flag is
    /// cleared.
    pub async fn draw(&self) -> Result<DrawOutcome, ClientError> {
        let Some(_guard) = DrawGuard::acquire(&self.drawing) else {
            return Ok(DrawOutcome::Busy);
        };
        if lock(&self.surface).is_none() {
            return Ok(DrawOutcome::NoSurface);
        }
        let Some(blob) = lock(&self.pending).take() else {
            return Ok(DrawOutcome::Idle);
        };

        let bitmap = self.decoder.decode(blob).await?;
        let (width, height) = bitmap.dimensions();
        {
            let mut surface = lock(&self.surface);
            let Some(canvas) = surface.as_mut() else {
                return Ok(DrawOutcome::NoSurface);
            };
            if canvas.resize_to(width, height) {
                tracing::debug!(width, height, "canvas resized");
            }
            canvas.draw_image(&bitmap, 0, 0);
        }
        drop(bitmap);

        self.frames_drawn.send_modify(|drawn| *drawn += 1);
        Ok(DrawOutcome::Drawn { width, height })
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
