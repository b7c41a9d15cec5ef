//! Persisted profile list
//!
//! Mirrors the layout of the configuration store: vendor/product ids are kept
//! as hexadecimal text (empty = wildcard) and only become a
//! [`DeviceIdentity`](crate::DeviceIdentity) when the document is turned into
//! a [`ProfileRegistry`](crate::ProfileRegistry).

use crate::error::{IdField, ProfileError};
use crate::identity::{format_hex_id, parse_hex_id, DeviceIdentity};
use crate::registry::DeviceProfile;
use crate::rules::{default_true, AxisRule, ButtonRule};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level config document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Whether a generic gamepad/joystick device should be registered for
    /// devices no configuration matches
    #[serde(default = "default_true")]
    pub register_default_device: bool,
    /// Bindings applied by vendor and product id, in order. A default entry
    /// (empty ids) belongs at the end.
    #[serde(default)]
    pub device_configurations: Vec<DeviceConfiguration>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            register_default_device: true,
            device_configurations: Vec::new(),
        }
    }
}

/// One device configuration as stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfiguration {
    /// Hexadecimal vendor id (e.g. `0x046D`); empty matches all vendors
    #[serde(default)]
    pub vendor_id: String,
    /// Hexadecimal product id (e.g. `0xC262`); empty matches all products
    #[serde(default)]
    pub product_id: String,
    /// Free-form note, only there to make the file easier to read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Use `overridden_hardware_device_id` instead of what the driver reports
    #[serde(default)]
    pub override_hardware_device_id: bool,
    #[serde(default)]
    pub overridden_hardware_device_id: String,
    #[serde(default)]
    pub axis_properties: Vec<AxisRule>,
    #[serde(default)]
    pub button_properties: Vec<ButtonRule>,
}

impl DeviceConfiguration {
    /// Validate the ids and convert into a profile. `index` is only used for error messages.
    pub fn into_profile(self, index: usize) -> Result<DeviceProfile, ProfileError> {
        let vendor_id = parse_hex_id(&self.vendor_id).map_err(|e| {
            ProfileError::MalformedIdentityString {
                profile: index,
                field: IdField::VendorId,
                value: e.0,
            }
        })?;
        let product_id = parse_hex_id(&self.product_id).map_err(|e| {
            ProfileError::MalformedIdentityString {
                profile: index,
                field: IdField::ProductId,
                value: e.0,
            }
        })?;

        Ok(DeviceProfile {
            identity: DeviceIdentity {
                vendor_id,
                product_id,
            },
            description: self.description.filter(|d| !d.trim().is_empty()),
            override_hardware_device_id: self.override_hardware_device_id,
            overridden_hardware_device_id: self.overridden_hardware_device_id,
            axes: self.axis_properties,
            buttons: self.button_properties,
        })
    }
}

impl From<&DeviceProfile> for DeviceConfiguration {
    fn from(profile: &DeviceProfile) -> Self {
        Self {
            vendor_id: format_hex_id(profile.identity.vendor_id),
            product_id: format_hex_id(profile.identity.product_id),
            description: profile.description.clone(),
            override_hardware_device_id: profile.override_hardware_device_id,
            overridden_hardware_device_id: profile.overridden_hardware_device_id.clone(),
            axis_properties: profile.axes.clone(),
            button_properties: profile.buttons.clone(),
        }
    }
}

impl RegistryConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ProfileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read a config document from disk
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProfileError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Write the document, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ProfileError::io(parent, e))?;
            }
        }
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ProfileError::io(path, e))
    }

    /// Starter document: one specific wheel followed by a catch-all gamepad entry
    pub fn template() -> Self {
        Self {
            register_default_device: true,
            device_configurations: vec![
                DeviceConfiguration {
                    vendor_id: "0x046D".to_string(),
                    product_id: "0xC262".to_string(),
                    description: Some("Logitech G920 wheel".to_string()),
                    override_hardware_device_id: false,
                    overridden_hardware_device_id: String::new(),
                    axis_properties: vec![
                        AxisRule::new("Gamepad_LeftX").bipolar(),
                        AxisRule::new("Gamepad_RightTriggerAxis").inverted(),
                        AxisRule::new("Gamepad_LeftTriggerAxis").inverted(),
                    ],
                    button_properties: vec![
                        ButtonRule::new("Gamepad_FaceButton_Bottom"),
                        ButtonRule::new("Gamepad_FaceButton_Right"),
                    ],
                },
                DeviceConfiguration {
                    description: Some("Any other gamepad".to_string()),
                    axis_properties: vec![
                        AxisRule::new("Gamepad_LeftX").bipolar(),
                        AxisRule::new("Gamepad_LeftY").bipolar().inverted(),
                    ],
                    button_properties: vec![ButtonRule::new("Gamepad_FaceButton_Bottom")],
                    ..DeviceConfiguration::default()
                },
            ],
        }
    }
}
