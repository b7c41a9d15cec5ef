// rawinput - profile file handling and sample replay
// Shared by the CLI and integration tests

pub mod replay;
pub mod settings;

pub use rawinput_core::*;
pub use replay::{parse_sample_line, replay, ReplaySummary, SampleParseError};
pub use settings::LoadedProfiles;
