//! Error types for physketch.
//!
//! The simulation itself never fails; these errors cover the edges where the
//! sketch touches the outside world: the window, the GPU and configuration
//! files.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter(e) => write!(f, "No compatible GPU adapter found: {}", e),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::NoAdapter(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for GpuError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        GpuError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur while loading or validating a [`SketchConfig`](crate::SketchConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    Io(std::io::Error),
    /// The file is not valid JSON for a sketch config.
    Parse(serde_json::Error),
    /// A value parsed fine but is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur when running a sketch.
#[derive(Debug)]
pub enum SketchError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// Configuration could not be loaded.
    Config(ConfigError),
    /// The container has no area to lay a canvas out in.
    DegenerateContainer { width: f32, height: f32 },
}

impl fmt::Display for SketchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SketchError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            SketchError::Window(e) => write!(f, "Failed to create window: {}", e),
            SketchError::Gpu(e) => write!(f, "GPU error: {}", e),
            SketchError::Config(e) => write!(f, "{}", e),
            SketchError::DegenerateContainer { width, height } => write!(
                f,
                "Container is {}x{}; a canvas needs a positive width and height",
                width, height
            ),
        }
    }
}

impl std::error::Error for SketchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SketchError::EventLoop(e) => Some(e),
            SketchError::Window(e) => Some(e),
            SketchError::Gpu(e) => Some(e),
            SketchError::Config(e) => Some(e),
            SketchError::DegenerateContainer { .. } => None,
        }
    }
}

impl From<winit::error::EventLoopError> for SketchError {
    fn from(e: winit::error::EventLoopError) -> Self {
        SketchError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for SketchError {
    fn from(e: winit::error::OsError) -> Self {
        SketchError::Window(e)
    }
}

impl From<GpuError> for SketchError {
    fn from(e: GpuError) -> Self {
        SketchError::Gpu(e)
    }
}

impl From<ConfigError> for SketchError {
    fn from(e: ConfigError) -> Self {
        SketchError::Config(e)
    }
}
