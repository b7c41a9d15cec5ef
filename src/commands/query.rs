//! Read-only commands: check, list, resolve

use super::CommandResult;
use crate::cli::DeviceArgs;
use rawinput::{AxisRule, ButtonRule, DeviceProfile, LoadedProfiles, UnmatchedPolicy};

/// Validate the profile file and print a one-line summary per profile
pub fn check(profiles: &LoadedProfiles) -> CommandResult {
    let registry = &profiles.registry;
    match &profiles.source {
        Some(path) => println!("Profile file: {}", path.display()),
        None => println!("Profile file: (none, built-in defaults)"),
    }
    println!(
        "{} profile(s), default device registration {}",
        registry.len(),
        if registry.register_default_device() {
            "on"
        } else {
            "off"
        }
    );

    for (index, profile) in registry.profiles().iter().enumerate() {
        let enabled_axes = profile.axes.iter().filter(|r| r.enabled).count();
        let enabled_buttons = profile.buttons.iter().filter(|r| r.enabled).count();
        println!(
            "  #{index} {}: {}/{} axes, {}/{} buttons enabled",
            profile.label(),
            enabled_axes,
            profile.axes.len(),
            enabled_buttons,
            profile.buttons.len()
        );
    }

    if !registry.profiles().iter().any(DeviceProfile::is_fallback) {
        println!("No catch-all profile; unmatched devices will use the default policy");
    }
    Ok(())
}

/// Print every profile with its rules, in resolution order
pub fn list(profiles: &LoadedProfiles) -> CommandResult {
    if profiles.registry.is_empty() {
        println!("No profiles configured.");
        return Ok(());
    }

    for (index, profile) in profiles.registry.profiles().iter().enumerate() {
        println!("#{index} {} [{}]", profile.label(), profile.identity);
        if let Some(id) = profile.hardware_device_id_override() {
            println!("    hardware id override: {id}");
        }
        for (channel, rule) in profile.axes.iter().enumerate() {
            println!("    axis {channel:>2}: {}", describe_axis(rule));
        }
        for (channel, rule) in profile.buttons.iter().enumerate() {
            println!("    button {channel:>2}: {}", describe_button(rule));
        }
    }
    Ok(())
}

/// Show which profile a device resolves to and the identity it is reported under
pub fn resolve(
    profiles: &LoadedProfiles,
    device: &DeviceArgs,
    hardware_id: &str,
) -> CommandResult {
    let registry = &profiles.registry;
    let identity = device.identity();

    match registry.resolve(&identity) {
        Some(resolution) => {
            println!(
                "{identity} -> #{} {}",
                resolution.index,
                resolution.profile.label()
            );
            println!(
                "Hardware device id: {}",
                display_id(resolution.hardware_device_id(hardware_id))
            );
        }
        None => {
            println!("{identity} -> no matching profile");
            match registry.unmatched_policy() {
                UnmatchedPolicy::RegisterDefaultDevice => {
                    println!("Device will be registered as a generic gamepad")
                }
                UnmatchedPolicy::Ignore => println!("Device will be ignored"),
            }
        }
    }
    Ok(())
}

fn display_id(id: &str) -> &str {
    if id.is_empty() {
        "(not reported)"
    } else {
        id
    }
}

fn describe_axis(rule: &AxisRule) -> String {
    if !rule.enabled {
        return "disabled".to_string();
    }
    let mut text = format!("{} ({})", rule.key, rule.range().as_str());
    if rule.inverted {
        text.push_str(", inverted");
    }
    if rule.offset != 0.0 {
        text.push_str(&format!(", offset {:+}", rule.offset));
    }
    text
}

fn describe_button(rule: &ButtonRule) -> String {
    if rule.enabled {
        rule.key.to_string()
    } else {
        "disabled".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_axis() {
        assert_eq!(describe_axis(&AxisRule::disabled()), "disabled");
        assert_eq!(
            describe_axis(&AxisRule::new("Gamepad_LeftY").bipolar().inverted()),
            "Gamepad_LeftY (bipolar), inverted"
        );
        assert_eq!(
            describe_axis(&AxisRule::new("Throttle").with_offset(-0.5)),
            "Throttle (unipolar), offset -0.5"
        );
    }

    #[test]
    fn test_describe_button() {
        assert_eq!(describe_button(&ButtonRule::new("Shift")), "Shift");
        assert_eq!(describe_button(&ButtonRule::default()), "<unbound>");
        assert_eq!(describe_button(&ButtonRule::disabled()), "disabled");
    }
}
