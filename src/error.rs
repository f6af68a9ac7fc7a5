//! Error types for the application layer.
//!
//! The voxel core never fails: out-of-range lookups answer air and missing chunks
//! answer `None`. Everything that talks to the window system, the GPU or the file
//! system reports through [`VoxelWorldError`].

use std::path::PathBuf;

/// Errors raised while bringing up or running the renderer.
#[derive(Debug, thiserror::Error)]
pub enum VoxelWorldError {
    /// The winit event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// No surface could be created for the window.
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter can drive the surface.
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// The adapter refused the device request.
    #[error("GPU device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The surface offers no texture format.
    #[error("surface reports no supported formats")]
    UnsupportedSurface,

    /// The shader file could not be read.
    #[error("failed to read shader {}: {source}", path.display())]
    Shader {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`crate::config::EngineConfig`].
    #[error("invalid config {}: {source}", path.display())]
    Config {
        /// File that failed
        path: PathBuf,
        /// Parse error with line and column
        #[source]
        source: serde_json::Error,
    },

    /// A buffer was used before it was created.
    #[error("buffer not found: {0}")]
    MissingBuffer(String),

    /// A write would run past the end of a buffer.
    #[error("write to {label} ends at byte {end}, buffer holds {size}")]
    BufferOverflow {
        /// Debug label of the buffer
        label: String,
        /// Byte the write would end at
        end: u64,
        /// Size of the buffer in bytes
        size: u64,
    },

    /// The event loop went away before graphics were handed over.
    #[error("graphics initialisation did not complete")]
    GraphicsUnavailable,
}

/// Result alias for the application layer.
pub type VoxelWorldResult<T> = Result<T, VoxelWorldError>;
