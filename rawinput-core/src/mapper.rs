//! Raw sample to logical signal remapping
//!
//! Pure functions over a resolved [`DeviceProfile`]. Samples on channels the
//! profile does not map, or maps with a disabled rule, are suppressed rather
//! than reported as errors: devices routinely expose more channels than a
//! profile author cares about. Signals borrow their key from the profile, so
//! nothing here allocates.

use crate::key::LogicalKey;
use crate::registry::DeviceProfile;
use crate::rules::AxisRange;
use thiserror::Error;

/// A raw sample as delivered by the device layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawSample {
    Axis { channel: usize, value: f32 },
    Button { channel: usize, pressed: bool },
}

/// Logical axis value ready for dispatch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSignal<'a> {
    pub key: &'a LogicalKey,
    pub value: f32,
    /// Range the producing rule declares; the value is not rescaled to it
    pub range: AxisRange,
}

/// Logical button state ready for dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSignal<'a> {
    pub key: &'a LogicalKey,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal<'a> {
    Axis(AxisSignal<'a>),
    Button(ButtonSignal<'a>),
}

impl Signal<'_> {
    pub fn key(&self) -> &LogicalKey {
        match self {
            Signal::Axis(s) => s.key,
            Signal::Button(s) => s.key,
        }
    }
}

/// Why a sample produced no signal
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppressed {
    #[error("channel {channel} has no rule (profile maps {len})")]
    ChannelOutOfRange { channel: usize, len: usize },

    #[error("channel {0} is disabled")]
    Disabled(usize),

    #[error("channel {0} has no key bound")]
    Unbound(usize),

    /// The device resolved to no profile
    #[error("no profile")]
    NoProfile,
}

/// Remap an axis sample, reporting why it was suppressed
pub fn try_remap_axis(
    channel: usize,
    raw: f32,
    profile: &DeviceProfile,
) -> Result<AxisSignal<'_>, Suppressed> {
    let rule = profile
        .axis(channel)
        .ok_or(Suppressed::ChannelOutOfRange {
            channel,
            len: profile.axes.len(),
        })?;
    if !rule.enabled {
        return Err(Suppressed::Disabled(channel));
    }
    if rule.key.is_unbound() {
        return Err(Suppressed::Unbound(channel));
    }

    Ok(AxisSignal {
        key: &rule.key,
        value: rule.apply(raw),
        range: rule.range(),
    })
}

/// Remap a button sample, reporting why it was suppressed
pub fn try_remap_button(
    channel: usize,
    pressed: bool,
    profile: &DeviceProfile,
) -> Result<ButtonSignal<'_>, Suppressed> {
    let rule = profile
        .button(channel)
        .ok_or(Suppressed::ChannelOutOfRange {
            channel,
            len: profile.buttons.len(),
        })?;
    if !rule.enabled {
        return Err(Suppressed::Disabled(channel));
    }
    if rule.key.is_unbound() {
        return Err(Suppressed::Unbound(channel));
    }

    Ok(ButtonSignal {
        key: &rule.key,
        pressed,
    })
}

pub fn try_remap(sample: RawSample, profile: &DeviceProfile) -> Result<Signal<'_>, Suppressed> {
    match sample {
        RawSample::Axis { channel, value } => {
            try_remap_axis(channel, value, profile).map(Signal::Axis)
        }
        RawSample::Button { channel, pressed } => {
            try_remap_button(channel, pressed, profile).map(Signal::Button)
        }
    }
}

/// Remap an axis sample; `None` when suppressed
pub fn remap_axis(channel: usize, raw: f32, profile: &DeviceProfile) -> Option<AxisSignal<'_>> {
    try_remap_axis(channel, raw, profile).ok()
}

/// Remap a button sample; `None` when suppressed
pub fn remap_button(
    channel: usize,
    pressed: bool,
    profile: &DeviceProfile,
) -> Option<ButtonSignal<'_>> {
    try_remap_button(channel, pressed, profile).ok()
}
