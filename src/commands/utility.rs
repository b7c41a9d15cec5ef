//! Utility commands: init

use super::CommandResult;
use rawinput::settings;
use std::path::Path;

/// Write the starter profile file to the explicit path or the default location
pub fn init(explicit: Option<&Path>, force: bool) -> CommandResult {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(settings::default_path);
    settings::write_template(&path, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}
