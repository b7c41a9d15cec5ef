//! Profile loading error types

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which half of a device identity a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    VendorId,
    ProductId,
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdField::VendorId => write!(f, "vendor_id"),
            IdField::ProductId => write!(f, "product_id"),
        }
    }
}

/// A vendor or product id that is not hexadecimal text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hexadecimal id \"{0}\"")]
pub struct InvalidHexId(pub String);

/// Errors raised while building a profile registry from the config store
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A device configuration carries a vendor/product id that is not hexadecimal
    #[error(
        "device configuration #{profile}: invalid {field} \"{value}\" (expected hexadecimal such as 0x046D)"
    )]
    MalformedIdentityString {
        profile: usize,
        field: IdField,
        value: String,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ProfileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProfileError::Io {
            path: path.into(),
            source,
        }
    }
}
