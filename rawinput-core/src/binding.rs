//! Per-connection device binding
//!
//! Resolution runs once when a device connects; every sample afterwards goes
//! straight to the remapper with the cached profile.

use crate::identity::DeviceIdentity;
use crate::mapper::{
    try_remap, try_remap_axis, try_remap_button, AxisSignal, ButtonSignal, RawSample, Signal,
    Suppressed,
};
use crate::registry::{DeviceProfile, ProfileRegistry, UnmatchedPolicy};
use std::sync::Arc;
use tracing::{debug, trace};

/// Outcome of resolving a connected device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingState {
    /// A profile matched
    Mapped {
        index: usize,
        /// Identity string reported to higher layers
        hardware_device_id: String,
    },
    /// Nothing matched; the host should register a generic device
    Default,
    /// Nothing matched and default registration is off
    Ignored,
}

/// A connected device tied to the registry snapshot it was resolved against
#[derive(Debug, Clone)]
pub struct DeviceBinding {
    identity: DeviceIdentity,
    driver_hardware_id: String,
    registry: Arc<ProfileRegistry>,
    state: BindingState,
}

impl DeviceBinding {
    /// Resolve a newly connected device
    pub fn connect(
        identity: DeviceIdentity,
        driver_hardware_id: impl Into<String>,
        registry: Arc<ProfileRegistry>,
    ) -> Self {
        let driver_hardware_id = driver_hardware_id.into();
        let state = bind(&identity, &driver_hardware_id, &registry);
        Self {
            identity,
            driver_hardware_id,
            registry,
            state,
        }
    }

    /// Re-resolve against a newer registry snapshot.
    ///
    /// Only samples remapped after this call see the new rules.
    pub fn rebind(&mut self, registry: Arc<ProfileRegistry>) {
        self.state = bind(&self.identity, &self.driver_hardware_id, &registry);
        self.registry = registry;
    }

    pub fn identity(&self) -> DeviceIdentity {
        self.identity
    }

    pub fn state(&self) -> &BindingState {
        &self.state
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.state, BindingState::Mapped { .. })
    }

    /// The matched profile, if any
    pub fn profile(&self) -> Option<&DeviceProfile> {
        match &self.state {
            BindingState::Mapped { index, .. } => self.registry.get(*index),
            _ => None,
        }
    }

    /// Effective hardware identity: the profile override if one applies,
    /// otherwise what the driver reported
    pub fn hardware_device_id(&self) -> &str {
        match &self.state {
            BindingState::Mapped {
                hardware_device_id, ..
            } => hardware_device_id,
            _ => &self.driver_hardware_id,
        }
    }

    pub fn remap_axis(&self, channel: usize, raw: f32) -> Option<AxisSignal<'_>> {
        let profile = self.profile()?;
        try_remap_axis(channel, raw, profile)
            .map_err(|reason| trace!("{} axis sample dropped: {}", self.identity, reason))
            .ok()
    }

    pub fn remap_button(&self, channel: usize, pressed: bool) -> Option<ButtonSignal<'_>> {
        let profile = self.profile()?;
        try_remap_button(channel, pressed, profile)
            .map_err(|reason| trace!("{} button sample dropped: {}", self.identity, reason))
            .ok()
    }

    pub fn remap(&self, sample: RawSample) -> Option<Signal<'_>> {
        self.try_remap(sample).ok()
    }

    /// Like [`remap`](Self::remap), but reports why a sample was dropped
    pub fn try_remap(&self, sample: RawSample) -> Result<Signal<'_>, Suppressed> {
        let profile = self.profile().ok_or(Suppressed::NoProfile)?;
        try_remap(sample, profile).inspect_err(|reason| {
            trace!("{} sample dropped: {}", self.identity, reason)
        })
    }
}

fn bind(
    identity: &DeviceIdentity,
    driver_hardware_id: &str,
    registry: &ProfileRegistry,
) -> BindingState {
    if let Some(resolution) = registry.resolve(identity) {
        let hardware_device_id = resolution.hardware_device_id(driver_hardware_id).to_string();
        debug!(
            "{} bound to device configuration #{} ({}) as \"{}\"",
            identity,
            resolution.index,
            resolution.profile.label(),
            hardware_device_id
        );
        return BindingState::Mapped {
            index: resolution.index,
            hardware_device_id,
        };
    }

    match registry.unmatched_policy() {
        UnmatchedPolicy::RegisterDefaultDevice => {
            debug!("{} has no device configuration, using default device", identity);
            BindingState::Default
        }
        UnmatchedPolicy::Ignore => {
            debug!("{} has no device configuration, ignoring", identity);
            BindingState::Ignored
        }
    }
}
