//! Mock camera implementation
//!
//! Implements `Camera`, generates a gradient test pattern in the configured
//! resolution and channel order. Lifecycle violations fail like a real
//! driver would.

use bytes::Bytes;
use contracts::{Camera, CameraConfig, CapturedFrame, ContractError, PixelLayout};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CameraState {
    Unconfigured,
    Configured,
    Streaming,
}

/// Mock camera
pub struct MockCamera {
    name: String,
    config: Option<CameraConfig>,
    state: CameraState,
    frames_captured: u64,
}

impl MockCamera {
    /// Create new unconfigured mock camera
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: None,
            state: CameraState::Unconfigured,
            frames_captured: 0,
        }
    }

    /// Frames produced so far
    pub fn frames_captured(&self) -> u64 {
        self.frames_captured
    }

    /// Whether `start` has been called without a matching `stop`
    pub fn is_streaming(&self) -> bool {
        self.state == CameraState::Streaming
    }

    /// Red ramps left to right, green top to bottom, blue shifts per frame.
    fn render(config: &CameraConfig, frame_no: u64) -> Vec<u8> {
        let (w, h) = (config.width as usize, config.height as usize);
        let blue = ((frame_no * 37) % 256) as u8;
        let mut data = Vec::with_capacity(w * h * 3);

        for y in 0..h {
            let green = (y * 255 / h.max(1)) as u8;
            for x in 0..w {
                let red = (x * 255 / w.max(1)) as u8;
                match config.layout {
                    PixelLayout::Rgb8 => data.extend_from_slice(&[red, green, blue]),
                    PixelLayout::Bgr8 => data.extend_from_slice(&[blue, green, red]),
                }
            }
        }
        data
    }
}

impl Camera for MockCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(&mut self, config: &CameraConfig) -> Result<(), ContractError> {
        if self.state == CameraState::Streaming {
            return Err(ContractError::camera(
                &self.name,
                "cannot configure while streaming",
            ));
        }
        self.config = Some(config.clone());
        self.state = CameraState::Configured;
        debug!(
            camera = %self.name,
            width = config.width,
            height = config.height,
            layout = ?config.layout,
            "mock camera configured"
        );
        Ok(())
    }

    async fn start(&mut self) -> Result<(), ContractError> {
        match self.state {
            CameraState::Unconfigured => Err(ContractError::camera(
                &self.name,
                "start called before configure",
            )),
            CameraState::Configured | CameraState::Streaming => {
                self.state = CameraState::Streaming;
                debug!(camera = %self.name, "mock camera started");
                Ok(())
            }
        }
    }

    async fn capture_frame(&mut self) -> Result<CapturedFrame, ContractError> {
        let config = match (&self.config, self.state) {
            (Some(config), CameraState::Streaming) => config.clone(),
            _ => {
                return Err(ContractError::camera(&self.name, "camera is not streaming"));
            }
        };

        self.frames_captured += 1;
        let data = Self::render(&config, self.frames_captured);
        trace!(camera = %self.name, frame = self.frames_captured, "mock frame captured");

        Ok(CapturedFrame {
            width: config.width,
            height: config.height,
            layout: config.layout,
            data: Bytes::from(data),
        })
    }

    async fn stop(&mut self) -> Result<(), ContractError> {
        if self.state == CameraState::Streaming {
            self.state = CameraState::Configured;
            debug!(camera = %self.name, frames = self.frames_captured, "mock camera stopped");
        }
        Ok(())
    }
}
