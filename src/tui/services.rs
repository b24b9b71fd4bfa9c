use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{AppConfig, CameraKind, WizardConfig};
use crate::core::media::{MediaDevice, SimulatedCamera, UnavailableCamera};

use super::events::{AppEvent, Notification, NotificationLevel};

/// Centralized handle to the collaborators step views need.
///
/// Created once at startup, then passed by reference to the active step
/// view. Views clone `event_tx` into the timers they own.
pub struct Services {
    pub config: AppConfig,
    pub camera: Arc<dyn MediaDevice>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    pub fn new(config: AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let camera = camera_for(config.wizard.camera);
        log::info!("Using '{}' camera", camera.name());
        Self {
            config,
            camera,
            event_tx,
        }
    }

    pub fn wizard(&self) -> &WizardConfig {
        &self.config.wizard
    }

    /// Queue a notification for the overlay.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self
            .event_tx
            .send(AppEvent::Notification(Notification::new(message, level)));
    }
}

/// Build the configured media device.
pub fn camera_for(kind: CameraKind) -> Arc<dyn MediaDevice> {
    match kind {
        CameraKind::Simulated => Arc::new(SimulatedCamera::default()),
        CameraKind::Unavailable => Arc::new(UnavailableCamera),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_for_kind() {
        assert_eq!(camera_for(CameraKind::Simulated).name(), "simulated");
        assert_eq!(camera_for(CameraKind::Unavailable).name(), "unavailable");
    }

    #[test]
    fn test_notify_sends_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let services = Services::new(AppConfig::default(), tx);
        services.notify("hello", NotificationLevel::Info);
        match rx.try_recv() {
            Ok(AppEvent::Notification(n)) => {
                assert_eq!(n.message, "hello");
                assert_eq!(n.level, NotificationLevel::Info);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
