use crate::error::AppError;
use crate::image_processing;
use crate::models::ImageFile;
use crate::picker;

/// Seconds shown before an automatic capture
pub const COUNTDOWN_SECONDS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// Front camera, captures get mirrored
    #[default]
    User,
    Environment,
}

impl FacingMode {
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }
}

/// Handle of an acquired camera stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHandle(pub u64);

/// Something that can hand out exactly one camera stream at a time
pub trait CameraDevice {
    fn open_stream(&mut self, facing: FacingMode) -> Result<StreamHandle, AppError>;
    fn stop_stream(&mut self, handle: StreamHandle);
    fn capture_frame(&mut self, handle: StreamHandle) -> Result<ImageFile, AppError>;
}

/// Exclusive camera access; the stream is released on stop, capture or drop
pub struct CameraSession<D: CameraDevice> {
    device: D,
    facing: FacingMode,
    active: Option<StreamHandle>,
}

impl<D: CameraDevice> CameraSession<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            facing: FacingMode::default(),
            active: None,
        }
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Stops any prior stream before acquiring a new one
    pub fn start(&mut self) -> Result<(), AppError> {
        self.stop();
        let handle = self.device.open_stream(self.facing)?;
        log::debug!("Camera stream {:?} started ({:?})", handle, self.facing);
        self.active = Some(handle);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            self.device.stop_stream(handle);
            log::debug!("Camera stream {:?} stopped", handle);
        }
    }

    /// Restarts the stream with the other camera if one was running
    pub fn switch_facing(&mut self) -> Result<(), AppError> {
        self.facing = self.facing.toggled();
        if self.active.is_some() {
            self.start()?;
        }
        Ok(())
    }

    /// Takes one frame and releases the stream
    pub fn capture(&mut self) -> Result<ImageFile, AppError> {
        let handle = self
            .active
            .ok_or_else(|| AppError::Other("Camera is not running".to_string()))?;
        let result = self.device.capture_frame(handle);
        self.stop();

        let image = result?;
        if self.facing == FacingMode::User {
            image_processing::mirror_image(&image)
        } else {
            Ok(image)
        }
    }

    #[cfg(test)]
    fn device(&self) -> &D {
        &self.device
    }
}

impl<D: CameraDevice> Drop for CameraSession<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Remaining(u32),
    Capture,
}

/// Counts down once per second, then signals the capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_SECONDS)
    }
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self) -> CountdownTick {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            CountdownTick::Capture
        } else {
            CountdownTick::Remaining(self.remaining)
        }
    }
}

/// Camera backed by the platform camera intent
///
/// The intent owns the preview; a "stream" here is the permission to launch it.
#[derive(Debug, Default)]
pub struct SystemCamera {
    next_handle: u64,
    open: Option<StreamHandle>,
}

impl CameraDevice for SystemCamera {
    fn open_stream(&mut self, _facing: FacingMode) -> Result<StreamHandle, AppError> {
        if !picker::has_camera_permission()? {
            return Err(AppError::PermissionDenied(
                "Camera access was not granted".to_string(),
            ));
        }
        self.next_handle += 1;
        let handle = StreamHandle(self.next_handle);
        self.open = Some(handle);
        Ok(handle)
    }

    fn stop_stream(&mut self, handle: StreamHandle) {
        if self.open == Some(handle) {
            self.open = None;
        }
    }

    fn capture_frame(&mut self, handle: StreamHandle) -> Result<ImageFile, AppError> {
        if self.open != Some(handle) {
            return Err(AppError::Other("Camera stream was released".to_string()));
        }
        let path = picker::capture_photo()?;
        image_processing::image_file_from_path(&path)
    }
}
