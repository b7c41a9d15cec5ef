// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rawinput")]
#[command(author, version, about = "Raw HID controller profile resolver and remapper")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Profile file (default: ~/.config/rawinput/profiles.toml, then ./profiles.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Vendor/product identity of the device a command acts for
#[derive(clap::Args, Clone, Copy, Debug)]
pub struct DeviceArgs {
    /// Vendor id in hex (e.g. 0x046D)
    #[arg(long, value_parser = parse_id)]
    pub vid: u16,

    /// Product id in hex (e.g. 0xC262)
    #[arg(long, value_parser = parse_id)]
    pub pid: u16,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate the profile file, then summarize it
    #[command(visible_alias = "c")]
    Check,

    /// List profiles in resolution order
    #[command(visible_aliases = ["ls", "l"])]
    List,

    /// Show which profile a device resolves to
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        device: DeviceArgs,

        /// Identity string the driver reports for the device
        #[arg(long, default_value = "")]
        hardware_id: String,
    },

    /// Remap one raw axis sample
    #[command(visible_alias = "axis")]
    RemapAxis {
        #[command(flatten)]
        device: DeviceArgs,

        /// Raw axis channel index
        #[arg(long)]
        channel: usize,

        /// Raw axis value
        #[arg(long, allow_hyphen_values = true)]
        value: f32,
    },

    /// Remap one raw button sample
    #[command(visible_alias = "button")]
    RemapButton {
        #[command(flatten)]
        device: DeviceArgs,

        /// Raw button channel index
        #[arg(long)]
        channel: usize,

        /// Raw button state
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        pressed: bool,
    },

    /// Replay recorded samples ("axis <ch> <value>" / "button <ch> <0|1>") through a profile
    Replay {
        #[command(flatten)]
        device: DeviceArgs,

        /// Sample file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Write a starter profile file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse a hex vendor/product id given on the command line
fn parse_id(s: &str) -> Result<u16, String> {
    match rawinput_core::parse_hex_id(s) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err("id must not be empty".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
