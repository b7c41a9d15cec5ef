//! Raw HID controller profile resolution and sample remapping
//!
//! Picks the configuration profile that applies to a connected device from
//! its vendor/product identity, then turns the device's raw axis and button
//! samples into logical key signals according to that profile.

pub mod binding;
pub mod config;
pub mod error;
pub mod identity;
pub mod key;
pub mod mapper;
pub mod registry;
pub mod rules;
pub mod snapshot;

pub use binding::{BindingState, DeviceBinding};
pub use config::{DeviceConfiguration, RegistryConfig};
pub use error::{IdField, InvalidHexId, ProfileError};
pub use identity::{format_hex_id, parse_hex_id, DeviceIdentity};
pub use key::LogicalKey;
pub use mapper::{
    remap_axis, remap_button, try_remap, try_remap_axis, try_remap_button, AxisSignal,
    ButtonSignal, RawSample, Signal, Suppressed,
};
pub use registry::{resolve, DeviceProfile, ProfileRegistry, Resolution, UnmatchedPolicy};
pub use rules::{AxisRange, AxisRule, ButtonRule};
pub use snapshot::SharedRegistry;
