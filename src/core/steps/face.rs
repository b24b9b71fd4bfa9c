//! Face verification: four still captures from different head angles.
//!
//! No face matching happens; four captured frames open the gate.

use crate::core::media::{CapturedFrame, DeviceError, MediaDevice, MediaSession};

use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAngle {
    Front,
    Left,
    Right,
    Upward,
}

impl CaptureAngle {
    pub const ALL: [CaptureAngle; 4] = [
        CaptureAngle::Front,
        CaptureAngle::Left,
        CaptureAngle::Right,
        CaptureAngle::Upward,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CaptureAngle::Front => "Front",
            CaptureAngle::Left => "Left",
            CaptureAngle::Right => "Right",
            CaptureAngle::Upward => "Upward",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            CaptureAngle::Front => "Look straight at the camera",
            CaptureAngle::Left => "Turn your head slightly to the left",
            CaptureAngle::Right => "Turn your head slightly to the right",
            CaptureAngle::Upward => "Tilt your head slightly upward",
        }
    }
}

pub const CAPTURE_COUNT: usize = CaptureAngle::ALL.len();

#[derive(Debug, Default)]
pub struct FaceCapture {
    camera: Option<MediaSession>,
    captures: [Option<CapturedFrame>; CAPTURE_COUNT],
    current: usize,
}

impl FaceCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_camera_active(&self) -> bool {
        self.camera.as_ref().is_some_and(MediaSession::is_live)
    }

    /// Acquire the camera. Failures are reported to the caller and leave the
    /// step without a camera.
    pub fn start_camera(&mut self, device: &dyn MediaDevice) -> Result<(), DeviceError> {
        if self.is_camera_active() {
            return Ok(());
        }
        match MediaSession::open(device) {
            Ok(session) => {
                self.camera = Some(session);
                Ok(())
            }
            Err(e) => {
                log::warn!("Error accessing camera '{}': {e}", device.name());
                Err(e)
            }
        }
    }

    pub fn current_angle(&self) -> CaptureAngle {
        CaptureAngle::ALL[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn captures(&self) -> &[Option<CapturedFrame>; CAPTURE_COUNT] {
        &self.captures
    }

    pub fn captured_count(&self) -> usize {
        self.captures.iter().filter(|c| c.is_some()).count()
    }

    pub fn all_captured(&self) -> bool {
        self.captured_count() == CAPTURE_COUNT
    }

    /// Grab a frame into the current slot, then move to the next slot unless
    /// already on the last one.
    pub fn capture(&mut self) -> Result<CaptureAngle, DeviceError> {
        let Some(camera) = self.camera.as_mut() else {
            return Err(DeviceError::Stopped);
        };
        let frame = camera.capture()?;
        let angle = self.current_angle();
        log::debug!("Captured {} angle ({} bytes)", angle.label(), frame.data.len());
        self.captures[self.current] = Some(frame);
        if self.current < CAPTURE_COUNT - 1 {
            self.current += 1;
        }
        Ok(angle)
    }

    /// Point the next capture at `index`. Used to retake a single angle.
    pub fn select_angle(&mut self, index: usize) -> bool {
        if index >= CAPTURE_COUNT {
            return false;
        }
        self.current = index;
        true
    }

    /// Step back one angle. Only offered while captures are outstanding.
    pub fn back(&mut self) -> bool {
        if self.all_captured() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Release the camera. Safe to call repeatedly.
    pub fn stop_camera(&mut self) {
        if let Some(session) = self.camera.take() {
            session.release();
            log::info!("Face capture camera stopped");
        }
    }

    /// Finish the step. The camera is released once the gate is open; a
    /// closed gate leaves it running for further captures.
    pub fn finish(&mut self) -> Result<(), ValidationError> {
        self.validate()?;
        self.stop_camera();
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let captured = self.captured_count();
        if captured < CAPTURE_COUNT {
            return Err(ValidationError::MissingCaptures {
                captured,
                expected: CAPTURE_COUNT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::media::{SimulatedCamera, UnavailableCamera};

    use super::*;

    fn started(camera: &SimulatedCamera) -> FaceCapture {
        let mut face = FaceCapture::new();
        face.start_camera(camera).unwrap();
        face
    }

    #[test]
    fn test_capture_requires_camera() {
        let mut face = FaceCapture::new();
        assert!(matches!(face.capture(), Err(DeviceError::Stopped)));
        assert_eq!(face.captured_count(), 0);
    }

    #[test]
    fn test_four_captures_open_gate() {
        let camera = SimulatedCamera::default();
        let mut face = started(&camera);

        let angles: Vec<CaptureAngle> = (0..3).map(|_| face.capture().unwrap()).collect();
        assert_eq!(angles, vec![CaptureAngle::Front, CaptureAngle::Left, CaptureAngle::Right]);
        assert!(!face.is_valid());
        assert_eq!(
            face.validate(),
            Err(ValidationError::MissingCaptures { captured: 3, expected: 4 })
        );

        assert_eq!(face.capture().unwrap(), CaptureAngle::Upward);
        assert!(face.is_valid());
        assert_eq!(face.current_index(), 3);
    }

    #[test]
    fn test_recapture_overwrites_single_slot() {
        let camera = SimulatedCamera::default();
        let mut face = started(&camera);
        for _ in 0..3 {
            face.capture().unwrap();
        }
        let before = face.captures().clone();

        face.select_angle(2);
        face.capture().unwrap();

        assert_eq!(face.captures()[0], before[0]);
        assert_eq!(face.captures()[1], before[1]);
        assert_ne!(face.captures()[2], before[2]);
        assert!(face.captures()[3].is_none());
        assert_eq!(face.captured_count(), 3);
    }

    #[test]
    fn test_back_only_while_incomplete() {
        let camera = SimulatedCamera::default();
        let mut face = started(&camera);
        assert!(!face.back());
        face.capture().unwrap();
        assert!(face.back());
        assert_eq!(face.current_angle(), CaptureAngle::Front);

        for _ in 0..4 {
            face.capture().unwrap();
        }
        assert!(face.all_captured());
        assert!(!face.back());
    }

    #[test]
    fn test_finish_releases_camera() {
        let camera = SimulatedCamera::default();
        let counter = camera.stream_counter();
        let mut face = started(&camera);
        for _ in 0..4 {
            face.capture().unwrap();
        }
        assert_eq!(counter.open_streams(), 1);
        face.finish().unwrap();
        assert_eq!(counter.open_streams(), 0);
        assert!(!face.is_camera_active());
    }

    #[test]
    fn test_abandoning_step_releases_camera() {
        let camera = SimulatedCamera::default();
        let counter = camera.stream_counter();
        {
            let mut face = started(&camera);
            face.capture().unwrap();
            assert_eq!(counter.open_streams(), 1);
        }
        assert_eq!(counter.open_streams(), 0);
    }

    #[test]
    fn test_permission_denied_is_local() {
        let mut face = FaceCapture::new();
        assert!(face.start_camera(&UnavailableCamera).is_err());
        assert!(!face.is_camera_active());
        assert!(!face.is_valid());
    }
}
