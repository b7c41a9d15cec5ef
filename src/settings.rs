// Profile settings store
// Locates, loads and writes the TOML profile file

use anyhow::{bail, Context, Result};
use rawinput_core::{ProfileRegistry, RegistryConfig};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used in both the user config dir and the working directory
pub const PROFILE_FILE_NAME: &str = "profiles.toml";

/// `~/.config/rawinput/profiles.toml` (or the platform equivalent)
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rawinput")
        .join(PROFILE_FILE_NAME)
}

/// Paths tried in order when no explicit path is given
pub fn candidate_paths() -> Vec<PathBuf> {
    vec![default_path(), PathBuf::from(PROFILE_FILE_NAME)]
}

/// Pick the profile file to use. An explicit path always wins, even if it
/// does not exist yet.
pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    candidate_paths().into_iter().find(|p| p.exists())
}

/// Loaded registry plus the file it came from
pub struct LoadedProfiles {
    pub registry: ProfileRegistry,
    pub source: Option<PathBuf>,
}

/// Load the registry from `explicit` or the first existing candidate.
///
/// A missing file is not an error: it yields an empty registry with default
/// device registration on, which is what an unconfigured install behaves like.
pub fn load(explicit: Option<&Path>) -> Result<LoadedProfiles> {
    match locate(explicit) {
        Some(path) if path.exists() => {
            let registry = ProfileRegistry::load_from_file(&path)
                .with_context(|| format!("Failed to load profiles from {}", path.display()))?;
            Ok(LoadedProfiles {
                registry,
                source: Some(path),
            })
        }
        Some(path) => {
            info!(
                "{} does not exist, using an empty profile list",
                path.display()
            );
            Ok(LoadedProfiles {
                registry: ProfileRegistry::empty(),
                source: None,
            })
        }
        None => {
            info!("No profile file found, using an empty profile list");
            Ok(LoadedProfiles {
                registry: ProfileRegistry::empty(),
                source: None,
            })
        }
    }
}

/// Write the starter template. Refuses to overwrite unless `force` is set.
pub fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    RegistryConfig::template()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote profile template to {}", path.display());
    Ok(())
}
