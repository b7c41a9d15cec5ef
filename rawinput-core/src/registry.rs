//! Profile registry
//!
//! Ordered list of device profiles looked up by the vendor/product identity a
//! driver reports. Profiles are tried in list order and the first match wins;
//! an entry with both ids empty matches every device and conventionally sits
//! at the end as the default.

use crate::config::{DeviceConfiguration, RegistryConfig};
use crate::error::ProfileError;
use crate::identity::DeviceIdentity;
use crate::rules::{AxisRule, ButtonRule};
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Remapping configuration for one kind of device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceProfile {
    /// Which devices this profile applies to
    pub identity: DeviceIdentity,
    pub description: Option<String>,
    /// Report `overridden_hardware_device_id` to higher layers instead of the
    /// identity string the driver supplies
    pub override_hardware_device_id: bool,
    pub overridden_hardware_device_id: String,
    /// Indexed by raw axis channel
    pub axes: Vec<AxisRule>,
    /// Indexed by raw button channel
    pub buttons: Vec<ButtonRule>,
}

impl DeviceProfile {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self {
            identity,
            ..Self::default()
        }
    }

    /// Profile matching every device
    pub fn fallback() -> Self {
        Self::new(DeviceIdentity::ANY)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_axis(mut self, rule: AxisRule) -> Self {
        self.axes.push(rule);
        self
    }

    pub fn with_button(mut self, rule: ButtonRule) -> Self {
        self.buttons.push(rule);
        self
    }

    pub fn with_hardware_device_id(mut self, id: impl Into<String>) -> Self {
        self.override_hardware_device_id = true;
        self.overridden_hardware_device_id = id.into();
        self
    }

    pub fn matches(&self, reported: &DeviceIdentity) -> bool {
        self.identity.matches(reported)
    }

    pub fn is_fallback(&self) -> bool {
        self.identity.is_wildcard()
    }

    /// The override string exactly as configured, if the override is
    /// switched on and the string is not blank
    pub fn hardware_device_id_override(&self) -> Option<&str> {
        let id = self.overridden_hardware_device_id.as_str();
        (self.override_hardware_device_id && !id.trim().is_empty()).then_some(id)
    }

    pub fn axis(&self, channel: usize) -> Option<&AxisRule> {
        self.axes.get(channel)
    }

    pub fn button(&self, channel: usize) -> Option<&ButtonRule> {
        self.buttons.get(channel)
    }

    /// Description if set, otherwise the identity pattern
    pub fn label(&self) -> String {
        match &self.description {
            Some(d) => d.clone(),
            None => self.identity.to_string(),
        }
    }
}

/// What the host should do with a device no profile matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// Register it as a generic gamepad/joystick
    RegisterDefaultDevice,
    /// Leave the device alone
    Ignore,
}

/// A profile selected for a reported identity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    /// Position of the profile in the registry
    pub index: usize,
    pub profile: &'a DeviceProfile,
}

impl<'a> Resolution<'a> {
    /// Identity string higher layers should see for the device: the profile's
    /// override when enabled, otherwise what the driver reported
    pub fn hardware_device_id<'s>(&'s self, driver_reported: &'s str) -> &'s str {
        self.profile
            .hardware_device_id_override()
            .unwrap_or(driver_reported)
    }
}

/// Immutable, ordered set of device profiles
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRegistry {
    profiles: Vec<DeviceProfile>,
    register_default_device: bool,
}

impl ProfileRegistry {
    pub fn new(profiles: Vec<DeviceProfile>, register_default_device: bool) -> Self {
        Self {
            profiles,
            register_default_device,
        }
    }

    /// No profiles, default device registration on
    pub fn empty() -> Self {
        Self::new(Vec::new(), true)
    }

    /// Validate a config document and build the registry.
    ///
    /// Fails on the first malformed vendor/product id, so matching never has
    /// to deal with bad text.
    pub fn from_config(config: RegistryConfig) -> Result<Self, ProfileError> {
        let profiles = config
            .device_configurations
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.into_profile(index))
            .collect::<Result<Vec<_>, _>>()?;

        let registry = Self::new(profiles, config.register_default_device);
        registry.lint();
        Ok(registry)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        Self::from_config(RegistryConfig::from_toml_str(content)?)
    }

    /// Load and validate a TOML profile file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let registry = Self::from_config(RegistryConfig::load(path)?)?;
        info!(
            "Loaded {} device profile(s) from {} (default device: {})",
            registry.len(),
            path.display(),
            registry.register_default_device
        );
        Ok(registry)
    }

    /// Convert back into the stored layout
    pub fn to_config(&self) -> RegistryConfig {
        RegistryConfig {
            register_default_device: self.register_default_device,
            device_configurations: self.profiles.iter().map(DeviceConfiguration::from).collect(),
        }
    }

    /// Warn about entries that load fine but cannot behave as written
    fn lint(&self) {
        if let Some(first_fallback) = self.profiles.iter().position(DeviceProfile::is_fallback) {
            let shadowed = self.profiles.len() - first_fallback - 1;
            if shadowed > 0 {
                warn!(
                    "Device configuration #{} matches every device; {} configuration(s) after it will never be used",
                    first_fallback, shadowed
                );
            }
        }

        for (index, profile) in self.profiles.iter().enumerate() {
            if profile.override_hardware_device_id
                && profile.hardware_device_id_override().is_none()
            {
                warn!(
                    "Device configuration #{} enables the hardware device id override but leaves it empty; the driver id will be used",
                    index
                );
            }

            let unbound_axes = profile
                .axes
                .iter()
                .filter(|r| r.enabled && r.key.is_unbound())
                .count();
            let unbound_buttons = profile
                .buttons
                .iter()
                .filter(|r| r.enabled && r.key.is_unbound())
                .count();
            if unbound_axes + unbound_buttons > 0 {
                debug!(
                    "Device configuration #{} has {} enabled axis and {} enabled button rule(s) without a key",
                    index, unbound_axes, unbound_buttons
                );
            }
        }
    }

    pub fn profiles(&self) -> &[DeviceProfile] {
        &self.profiles
    }

    pub fn get(&self, index: usize) -> Option<&DeviceProfile> {
        self.profiles.get(index)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn register_default_device(&self) -> bool {
        self.register_default_device
    }

    /// First profile in list order whose pattern accepts `identity`.
    ///
    /// Matching always uses the driver-reported ids, never a profile's
    /// hardware id override.
    pub fn resolve(&self, identity: &DeviceIdentity) -> Option<Resolution<'_>> {
        let found = self
            .profiles
            .iter()
            .enumerate()
            .find(|(_, profile)| profile.matches(identity))
            .map(|(index, profile)| Resolution { index, profile });

        match &found {
            Some(r) => trace!("{} resolved to device configuration #{}", identity, r.index),
            None => trace!("{} matched no device configuration", identity),
        }
        found
    }

    /// Policy for identities `resolve` returns `None` for
    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        if self.register_default_device {
            UnmatchedPolicy::RegisterDefaultDevice
        } else {
            UnmatchedPolicy::Ignore
        }
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

/// Free-function form of [`ProfileRegistry::resolve`]
pub fn resolve<'a>(
    identity: &DeviceIdentity,
    registry: &'a ProfileRegistry,
) -> Option<Resolution<'a>> {
    registry.resolve(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel() -> DeviceProfile {
        DeviceProfile::new(DeviceIdentity::new(0x046D, 0xC262))
            .with_axis(AxisRule::new("LeftStickX").inverted())
    }

    fn registry_with_fallback() -> ProfileRegistry {
        ProfileRegistry::new(vec![wheel(), DeviceProfile::fallback()], true)
    }

    #[test]
    fn test_exact_match_wins() {
        let registry = registry_with_fallback();
        let r = registry
            .resolve(&DeviceIdentity::new(0x046D, 0xC262))
            .unwrap();
        assert_eq!(r.index, 0);
        assert_eq!(r.profile, &wheel());
    }

    #[test]
    fn test_unknown_device_hits_fallback() {
        let registry = registry_with_fallback();
        let r = registry
            .resolve(&DeviceIdentity::new(0x1234, 0x5678))
            .unwrap();
        assert_eq!(r.index, 1);
        assert!(r.profile.is_fallback());
    }

    #[test]
    fn test_no_match_without_fallback() {
        let registry = ProfileRegistry::new(vec![wheel()], false);
        assert!(registry
            .resolve(&DeviceIdentity::new(0x1234, 0x5678))
            .is_none());
        assert_eq!(registry.unmatched_policy(), UnmatchedPolicy::Ignore);
    }

    #[test]
    fn test_first_match_wins() {
        let vendor_wide = DeviceProfile::new(DeviceIdentity {
            vendor_id: Some(0x046D),
            product_id: None,
        });
        let registry = ProfileRegistry::new(vec![vendor_wide, wheel()], true);
        let r = registry
            .resolve(&DeviceIdentity::new(0x046D, 0xC262))
            .unwrap();
        assert_eq!(r.index, 0);
    }

    #[test]
    fn test_non_matching_order_is_irrelevant() {
        let a = DeviceProfile::new(DeviceIdentity::new(0x0001, 0x0001));
        let b = DeviceProfile::new(DeviceIdentity::new(0x0002, 0x0002));
        let forward = ProfileRegistry::new(vec![a.clone(), b.clone(), wheel()], true);
        let reversed = ProfileRegistry::new(vec![b, a, wheel()], true);

        let id = DeviceIdentity::new(0x046D, 0xC262);
        assert_eq!(
            forward.resolve(&id).unwrap().profile,
            reversed.resolve(&id).unwrap().profile
        );
    }

    #[test]
    fn test_free_function_matches_method() {
        let registry = registry_with_fallback();
        let id = DeviceIdentity::new(0x046D, 0xC262);
        assert_eq!(resolve(&id, &registry), registry.resolve(&id));
    }

    #[test]
    fn test_hardware_id_override() {
        let plain = wheel();
        let overridden = wheel().with_hardware_device_id("ArcadeCabinet");
        let mut switched_off = overridden.clone();
        switched_off.override_hardware_device_id = false;
        let mut empty = wheel();
        empty.override_hardware_device_id = true;
        let blank = wheel().with_hardware_device_id("   ");
        let padded = wheel().with_hardware_device_id("  Arcade Stick ");

        let registry = ProfileRegistry::new(vec![plain], true);
        let r = registry.resolve(&DeviceIdentity::new(0x046D, 0xC262)).unwrap();
        assert_eq!(r.hardware_device_id("XboxOneGamepad"), "XboxOneGamepad");

        for (profile, expected) in [
            (overridden, "ArcadeCabinet"),
            (switched_off, "XboxOneGamepad"),
            (empty, "XboxOneGamepad"),
            (blank, "XboxOneGamepad"),
            (padded, "  Arcade Stick "),
        ] {
            let registry = ProfileRegistry::new(vec![profile], true);
            let r = registry.resolve(&DeviceIdentity::new(0x046D, 0xC262)).unwrap();
            assert_eq!(r.hardware_device_id("XboxOneGamepad"), expected);
        }
    }

    #[test]
    fn test_override_does_not_affect_matching() {
        // The override string looks like an id, but matching only uses vendor/product
        let profile = DeviceProfile::new(DeviceIdentity::new(0x046D, 0xC262))
            .with_hardware_device_id("0x1234");
        let registry = ProfileRegistry::new(vec![profile], true);
        assert!(registry
            .resolve(&DeviceIdentity::new(0x1234, 0x1234))
            .is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let registry = ProfileRegistry::from_toml_str(
            r#"
[[device_configurations]]
vendor_id = "0x046d"
product_id = "0xc262"

[[device_configurations.axis_properties]]
key = "LeftStickX"
inverted = true

[[device_configurations]]
"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.register_default_device());
        assert_eq!(registry.profiles()[0].identity, DeviceIdentity::new(0x046D, 0xC262));
        assert!(registry.profiles()[1].is_fallback());
        assert_eq!(
            registry.unmatched_policy(),
            UnmatchedPolicy::RegisterDefaultDevice
        );
    }

    #[test]
    fn test_malformed_id_fails_load() {
        let err = ProfileRegistry::from_toml_str(
            r#"
[[device_configurations]]
vendor_id = "0x046D"

[[device_configurations]]
vendor_id = "Logitech"
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::MalformedIdentityString { profile: 1, .. }
        ));
    }

    #[test]
    fn test_disabled_axis_keeps_its_settings() {
        use crate::mapper::{remap_axis, try_remap_axis, Suppressed};
        use crate::rules::AxisRange;

        let registry = ProfileRegistry::from_toml_str(
            r#"
[[device_configurations]]
vendor_id = "0x046D"
product_id = "0xC262"

[[device_configurations.axis_properties]]
enabled = false
key = "Throttle"
inverted = true
gamepad_stick = true
offset = 0.5
"#,
        )
        .unwrap();

        let profile = &registry.profiles()[0];
        assert_eq!(try_remap_axis(0, 0.25, profile), Err(Suppressed::Disabled(0)));

        let config = registry.to_config();
        let rule = &config.device_configurations[0].axis_properties[0];
        assert!(!rule.enabled);
        assert_eq!(rule.key.as_str(), "Throttle");
        assert!(rule.inverted);
        assert!(rule.bipolar);
        assert_eq!(rule.offset, 0.5);

        let mut reenabled = ProfileRegistry::from_config(config).unwrap().profiles()[0].clone();
        reenabled.axes[0].enabled = true;
        let signal = remap_axis(0, 0.75, &reenabled).unwrap();
        assert_eq!(signal.key.as_str(), "Throttle");
        assert_eq!(signal.value, -0.25);
        assert_eq!(signal.range, AxisRange::Bipolar);
    }

    #[test]
    fn test_to_config_roundtrip() {
        let registry = registry_with_fallback();
        let rebuilt = ProfileRegistry::from_config(registry.to_config()).unwrap();
        assert_eq!(rebuilt, registry);
    }
}
