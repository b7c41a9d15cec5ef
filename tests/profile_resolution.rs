//! Integration tests for profile loading and resolution.
//!
//! These go through the same path the CLI uses: a TOML profile file on disk,
//! `settings::load`, then resolution and remapping against the loaded registry.

use rawinput::settings;
use rawinput::{
    remap_axis, remap_button, AxisRange, DeviceIdentity, ProfileError, ProfileRegistry,
    UnmatchedPolicy,
};
use std::fs;

const WHEEL_AND_FALLBACK: &str = r#"
register_default_device = true

[[device_configurations]]
vendor_id = "0x046D"
product_id = "0xC262"
description = "G920"

[[device_configurations.axis_properties]]
enabled = true
key = "LeftStickX"
inverted = true
offset = 0.0

[[device_configurations.axis_properties]]
key = "LeftStickY"
inverted = true
gamepad_stick = true

[[device_configurations.button_properties]]
key = "FaceBottom"

[[device_configurations.button_properties]]
enabled = false
key = "FaceRight"

[[device_configurations]]
vendor_id = ""
product_id = ""
"#;

fn write_profiles(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profiles.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

// ── resolution through a profile file ──

#[test]
fn known_device_resolves_to_its_profile() {
    let (_dir, path) = write_profiles(WHEEL_AND_FALLBACK);
    let loaded = settings::load(Some(&path)).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(path.as_path()));

    let resolution = loaded
        .registry
        .resolve(&DeviceIdentity::new(0x046D, 0xC262))
        .unwrap();
    assert_eq!(resolution.index, 0);

    let signal = remap_axis(0, 0.25, resolution.profile).unwrap();
    assert_eq!(signal.key.as_str(), "LeftStickX");
    assert_eq!(signal.value, 0.75);
}

#[test]
fn lowercase_reported_ids_match_uppercase_config() {
    let (_dir, path) = write_profiles(WHEEL_AND_FALLBACK);
    let registry = ProfileRegistry::load_from_file(&path).unwrap();
    let reported = DeviceIdentity::parse("0x046d", "0xc262").unwrap();
    assert_eq!(registry.resolve(&reported).unwrap().index, 0);
}

#[test]
fn unknown_device_falls_back_to_wildcard_entry() {
    let (_dir, path) = write_profiles(WHEEL_AND_FALLBACK);
    let registry = settings::load(Some(&path)).unwrap().registry;

    let resolution = registry
        .resolve(&DeviceIdentity::new(0x1234, 0x5678))
        .unwrap();
    assert_eq!(resolution.index, 1);
    assert!(resolution.profile.axes.is_empty());
    assert!(remap_axis(0, 0.5, resolution.profile).is_none());
}

#[test]
fn bipolar_inversion_from_file() {
    let (_dir, path) = write_profiles(WHEEL_AND_FALLBACK);
    let registry = ProfileRegistry::load_from_file(&path).unwrap();
    let profile = registry
        .resolve(&DeviceIdentity::new(0x046D, 0xC262))
        .unwrap()
        .profile;

    let signal = remap_axis(1, 0.3, profile).unwrap();
    assert!((signal.value + 0.3).abs() < 1e-6);
    assert_eq!(signal.range, AxisRange::Bipolar);
}

#[test]
fn disabled_button_from_file_is_suppressed() {
    let (_dir, path) = write_profiles(WHEEL_AND_FALLBACK);
    let registry = ProfileRegistry::load_from_file(&path).unwrap();
    let profile = registry
        .resolve(&DeviceIdentity::new(0x046D, 0xC262))
        .unwrap()
        .profile;

    assert!(remap_button(0, true, profile).unwrap().pressed);
    assert!(remap_button(1, true, profile).is_none());
    assert!(remap_button(1, false, profile).is_none());
}

// ── load-time failures and defaults ──

#[test]
fn malformed_vendor_id_fails_at_load() {
    let (_dir, path) = write_profiles(
        r#"
[[device_configurations]]
vendor_id = "logitech"
product_id = "0xC262"
"#,
    );
    let err = ProfileRegistry::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ProfileError::MalformedIdentityString { profile: 0, .. }));
    assert!(settings::load(Some(&path)).is_err());
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let (_dir, path) = write_profiles("device_configurations = 3");
    let err = ProfileRegistry::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ProfileError::Parse(_)));
}

#[test]
fn default_device_flag_controls_unmatched_policy() {
    let (_dir, path) = write_profiles(
        r#"
register_default_device = false

[[device_configurations]]
vendor_id = "0x046D"
product_id = "0xC262"
"#,
    );
    let registry = ProfileRegistry::load_from_file(&path).unwrap();
    assert!(registry
        .resolve(&DeviceIdentity::new(0x1234, 0x5678))
        .is_none());
    assert_eq!(registry.unmatched_policy(), UnmatchedPolicy::Ignore);
}

#[test]
fn hardware_id_override_from_file() {
    let (_dir, path) = write_profiles(
        r#"
[[device_configurations]]
vendor_id = "0x045E"
product_id = "0x02EA"
override_hardware_device_id = true
overridden_hardware_device_id = "ArcadeStick"
"#,
    );
    let registry = ProfileRegistry::load_from_file(&path).unwrap();
    let resolution = registry
        .resolve(&DeviceIdentity::new(0x045E, 0x02EA))
        .unwrap();
    assert_eq!(resolution.hardware_device_id("XboxOneGamepad"), "ArcadeStick");
}

// ── template ──

#[test]
fn init_template_loads_and_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("profiles.toml");

    settings::write_template(&path, false).unwrap();
    let registry = ProfileRegistry::load_from_file(&path).unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.profiles()[1].is_fallback());

    assert!(settings::write_template(&path, false).is_err());
    settings::write_template(&path, true).unwrap();
}
