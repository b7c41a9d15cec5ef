//! Sample remapping commands: remap-axis, remap-button, replay

use super::{connect, CommandResult};
use crate::cli::DeviceArgs;
use anyhow::Context;
use rawinput::replay::{format_signal, replay as replay_samples};
use rawinput::{LoadedProfiles, RawSample};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

pub fn remap_axis(
    profiles: LoadedProfiles,
    device: &DeviceArgs,
    channel: usize,
    value: f32,
) -> CommandResult {
    remap_one(profiles, device, RawSample::Axis { channel, value })
}

pub fn remap_button(
    profiles: LoadedProfiles,
    device: &DeviceArgs,
    channel: usize,
    pressed: bool,
) -> CommandResult {
    remap_one(profiles, device, RawSample::Button { channel, pressed })
}

fn remap_one(profiles: LoadedProfiles, device: &DeviceArgs, sample: RawSample) -> CommandResult {
    let binding = connect(profiles, device, "");
    match binding.try_remap(sample) {
        Ok(signal) => println!("{}", format_signal(&signal)),
        Err(reason) => println!("suppressed ({reason})"),
    }
    Ok(())
}

/// Replay a sample file (or stdin) through the profile for a device
pub fn replay(profiles: LoadedProfiles, device: &DeviceArgs, file: Option<&Path>) -> CommandResult {
    let binding = connect(profiles, device, "");
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match file {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            replay_samples(BufReader::new(f), &binding, &mut out)?
        }
        None => replay_samples(io::stdin().lock(), &binding, &mut out)?,
    };

    eprintln!(
        "{} sample(s): {} emitted, {} suppressed, {} malformed line(s)",
        summary.samples, summary.emitted, summary.suppressed, summary.malformed
    );
    Ok(())
}
