use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::properties::Scope;

/// One sample format the device can register or support.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamFormat {
    pub sample_rate: f64,
    pub channels_per_frame: u32,
    pub bits_per_channel: u32,
}

impl Default for StreamFormat {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            channels_per_frame: 2,
            bits_per_channel: 32,
        }
    }
}

/// A value that differs between the input and output side of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerScope<T> {
    pub input: T,
    pub output: T,
}

impl<T: Copy> PerScope<T> {
    /// Resolve for a request scope. Global resolves to the output leg, the
    /// primary direction for a playback-facing virtual device.
    pub fn value_for(&self, scope: Scope) -> T {
        match scope {
            Scope::Input => self.input,
            Scope::Output | Scope::Global => self.output,
        }
    }

    pub fn uniform(value: T) -> Self {
        Self {
            input: value,
            output: value,
        }
    }
}

/// Immutable descriptor a device is constructed from.
///
/// Owned by whoever constructs the device and read-only for the device's
/// lifetime. Loading one from persisted storage is someone else's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfiguration {
    /// Persistent unique identifier of this device instance
    pub uid: String,
    /// Identifier shared by all devices of this model
    pub model_uid: String,
    /// Human-readable display name
    pub name: String,
    pub manufacturer: String,
    /// The format the device currently runs in
    pub registered_format: StreamFormat,
    /// Every format the device accepts
    pub supported_formats: Vec<StreamFormat>,
    pub safety_offsets: PerScope<u32>,
    pub latency: PerScope<u32>,
    /// Hidden devices are not listed to users by the host
    pub hidden: bool,
    pub can_be_default_device: bool,
    pub can_handle_system_audio: bool,
    pub icon_url: Option<String>,
    /// Bundle identifier of a companion configuration application
    pub configuration_app_bundle_id: Option<String>,
    /// Frames between timestamp resets; also the ring buffer length
    pub ring_buffer_frames: u32,
}

impl DeviceConfiguration {
    pub fn validate(&self) -> Result<()> {
        if self.uid.is_empty() {
            anyhow::bail!("device UID must not be empty");
        }
        if self.ring_buffer_frames == 0 {
            anyhow::bail!("ring buffer frame count must be nonzero");
        }
        if self.supported_formats.is_empty() {
            anyhow::bail!("at least one supported format is required");
        }
        if self.registered_format.channels_per_frame == 0 {
            anyhow::bail!("registered format must have at least one channel");
        }
        if !self.supported_formats.contains(&self.registered_format) {
            anyhow::bail!("registered format is not among the supported formats");
        }
        Ok(())
    }
}

impl Default for DeviceConfiguration {
    fn default() -> Self {
        Self {
            uid: "com.audioplug.device".to_string(),
            model_uid: "com.audioplug.model".to_string(),
            name: "Audioplug Device".to_string(),
            manufacturer: "Audioplug".to_string(),
            registered_format: StreamFormat::default(),
            supported_formats: vec![StreamFormat::default()],
            safety_offsets: PerScope::uniform(256),
            latency: PerScope::default(),
            hidden: false,
            can_be_default_device: true,
            can_handle_system_audio: true,
            icon_url: None,
            configuration_app_bundle_id: None,
            ring_buffer_frames: 1024,
        }
    }
}
