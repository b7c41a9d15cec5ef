//! Command handlers for the CLI application.
//!
//! - `query`: read-only inspection (check, list, resolve)
//! - `remap`: sample remapping (remap-axis, remap-button, replay)
//! - `utility`: file management (init)

pub mod query;
pub mod remap;
pub mod utility;

use rawinput::{DeviceBinding, DeviceIdentity, LoadedProfiles};
use std::sync::Arc;

use crate::cli::DeviceArgs;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

impl DeviceArgs {
    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.vid, self.pid)
    }
}

/// Bind a device the way a host would on connect, reporting the outcome on stderr
pub fn connect(
    profiles: LoadedProfiles,
    device: &DeviceArgs,
    hardware_id: &str,
) -> DeviceBinding {
    let binding =
        DeviceBinding::connect(device.identity(), hardware_id, Arc::new(profiles.registry));
    if let Some(profile) = binding.profile() {
        eprintln!("Using profile: {}", profile.label());
    } else {
        eprintln!("No profile matches {}", device.identity());
    }
    binding
}
