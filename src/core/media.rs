//! Media-capture device boundary for the face verification step.
//!
//! The step only needs four things from a camera: open it, grab a still
//! frame into memory, and release it. [`MediaSession`] wraps an open stream
//! so the device is released on every exit path, including drop.

use std::fmt;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{ImageFormat, Rgb, RgbImage};

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("No camera available: {0}")]
    Unavailable(String),

    #[error("Camera stream already stopped")]
    Stopped,

    #[error("Failed to encode captured frame: {0}")]
    Encode(#[from] image::ImageError),
}

/// A still frame, encoded in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

impl fmt::Debug for CapturedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A live video feed.
pub trait MediaStream: Send {
    fn capture_frame(&mut self) -> Result<CapturedFrame, DeviceError>;

    /// Stop all tracks. Idempotent.
    fn stop(&mut self);

    fn is_live(&self) -> bool;
}

/// A device that can hand out video streams.
pub trait MediaDevice: Send + Sync {
    fn name(&self) -> &str;

    fn open(&self) -> Result<Box<dyn MediaStream>, DeviceError>;
}

/// An open stream that is stopped when dropped.
pub struct MediaSession {
    stream: Box<dyn MediaStream>,
}

impl MediaSession {
    pub fn open(device: &dyn MediaDevice) -> Result<Self, DeviceError> {
        let stream = device.open()?;
        log::info!("Camera '{}' opened", device.name());
        Ok(Self { stream })
    }

    pub fn capture(&mut self) -> Result<CapturedFrame, DeviceError> {
        if !self.stream.is_live() {
            return Err(DeviceError::Stopped);
        }
        self.stream.capture_frame()
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_live()
    }

    /// Release the device now.
    pub fn release(mut self) {
        self.stream.stop();
    }
}

impl Drop for MediaSession {
    fn drop(&mut self) {
        if self.stream.is_live() {
            self.stream.stop();
            log::info!("Camera released");
        }
    }
}

impl fmt::Debug for MediaSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaSession")
            .field("live", &self.stream.is_live())
            .finish()
    }
}

// ============================================================================
// SimulatedCamera
// ============================================================================

/// Counts currently open streams so tests and the status bar can see leaks.
#[derive(Debug, Clone, Default)]
pub struct StreamCounter(Arc<AtomicUsize>);

impl StreamCounter {
    pub fn open_streams(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Camera that renders a test card instead of reading hardware.
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    width: u32,
    height: u32,
    open: StreamCounter,
}

impl SimulatedCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            open: StreamCounter::default(),
        }
    }

    pub fn stream_counter(&self) -> StreamCounter {
        self.open.clone()
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new(64, 48)
    }
}

impl MediaDevice for SimulatedCamera {
    fn name(&self) -> &str {
        "simulated"
    }

    fn open(&self) -> Result<Box<dyn MediaStream>, DeviceError> {
        self.open.0.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(SimulatedStream {
            width: self.width,
            height: self.height,
            frame_no: 0,
            live: true,
            open: self.open.clone(),
        }))
    }
}

struct SimulatedStream {
    width: u32,
    height: u32,
    frame_no: u32,
    live: bool,
    open: StreamCounter,
}

impl MediaStream for SimulatedStream {
    fn capture_frame(&mut self) -> Result<CapturedFrame, DeviceError> {
        if !self.live {
            return Err(DeviceError::Stopped);
        }
        self.frame_no = self.frame_no.wrapping_add(1);
        let shift = self.frame_no;
        let (w, h) = (self.width.max(1), self.height.max(1));
        let img = RgbImage::from_fn(w, h, |x, y| {
            let r = ((x * 255) / w) as u8;
            let g = ((y * 255) / h) as u8;
            let b = (shift.wrapping_mul(40) & 0xFF) as u8;
            Rgb([r, g, b])
        });

        let mut data = Cursor::new(Vec::new());
        img.write_to(&mut data, ImageFormat::Png)?;
        Ok(CapturedFrame {
            width: w,
            height: h,
            format: ImageFormat::Png,
            data: data.into_inner(),
        })
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.open.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

/// Camera whose permission request is always refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCamera;

impl MediaDevice for UnavailableCamera {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn open(&self) -> Result<Box<dyn MediaStream>, DeviceError> {
        Err(DeviceError::PermissionDenied)
    }
}
