//! Vendor/product identity of a raw input device
//!
//! The same type serves as the identity a driver reports for a connected
//! device and as the match pattern stored on a profile. In a pattern an absent
//! field is a wildcard; in a reported identity it means the driver did not
//! supply the value.

use crate::error::InvalidHexId;
use std::fmt;

/// (vendor id, product id) pair, either half optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceIdentity {
    pub vendor_id: Option<u16>,
    pub product_id: Option<u16>,
}

impl DeviceIdentity {
    /// Pattern that matches every device
    pub const ANY: DeviceIdentity = DeviceIdentity {
        vendor_id: None,
        product_id: None,
    };

    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id: Some(vendor_id),
            product_id: Some(product_id),
        }
    }

    /// Parse a pair of hexadecimal strings as stored in the config (`"0x046D"`, `""`)
    pub fn parse(vendor_id: &str, product_id: &str) -> Result<Self, InvalidHexId> {
        Ok(Self {
            vendor_id: parse_hex_id(vendor_id)?,
            product_id: parse_hex_id(product_id)?,
        })
    }

    /// True if both halves are wildcards
    pub fn is_wildcard(&self) -> bool {
        self.vendor_id.is_none() && self.product_id.is_none()
    }

    /// Whether this pattern accepts the identity a driver reported
    pub fn matches(&self, reported: &DeviceIdentity) -> bool {
        field_matches(self.vendor_id, reported.vendor_id)
            && field_matches(self.product_id, reported.product_id)
    }
}

fn field_matches(pattern: Option<u16>, reported: Option<u16>) -> bool {
    match pattern {
        None => true,
        Some(wanted) => reported == Some(wanted),
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vendor_id {
            Some(vid) => write!(f, "{vid:04x}")?,
            None => write!(f, "*")?,
        }
        match self.product_id {
            Some(pid) => write!(f, ":{pid:04x}"),
            None => write!(f, ":*"),
        }
    }
}

/// Parse a single hexadecimal id.
///
/// Accepts an optional `0x`/`0X` prefix, either letter case and surrounding
/// whitespace. Empty text is `Ok(None)` (wildcard).
pub fn parse_hex_id(text: &str) -> Result<Option<u16>, InvalidHexId> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    // from_str_radix tolerates a leading '+', ids never carry one
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(InvalidHexId(text.to_string()));
    }

    u16::from_str_radix(digits, 16)
        .map(Some)
        .map_err(|_| InvalidHexId(text.to_string()))
}

/// Format an id the way the config store writes it (`0x046D`), empty for a wildcard
pub fn format_hex_id(id: Option<u16>) -> String {
    match id {
        Some(v) => format!("0x{v:04X}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_id_forms() {
        assert_eq!(parse_hex_id("0x046D"), Ok(Some(0x046D)));
        assert_eq!(parse_hex_id("0X046d"), Ok(Some(0x046D)));
        assert_eq!(parse_hex_id("c262"), Ok(Some(0xC262)));
        assert_eq!(parse_hex_id("  0xC262 "), Ok(Some(0xC262)));
        assert_eq!(parse_hex_id(""), Ok(None));
        assert_eq!(parse_hex_id("   "), Ok(None));
    }

    #[test]
    fn test_parse_hex_id_rejects_garbage() {
        assert!(parse_hex_id("0x").is_err());
        assert!(parse_hex_id("Logitech").is_err());
        assert!(parse_hex_id("+46D").is_err());
        assert!(parse_hex_id("0x12345").is_err()); // wider than a USB id
        assert!(parse_hex_id("-1").is_err());
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let reported = [
            DeviceIdentity::new(0x046D, 0xC262),
            DeviceIdentity::new(0x1234, 0x5678),
            DeviceIdentity::ANY,
        ];
        for id in &reported {
            assert!(DeviceIdentity::ANY.matches(id));
        }
    }

    #[test]
    fn test_partial_pattern() {
        let vendor_only = DeviceIdentity {
            vendor_id: Some(0x046D),
            product_id: None,
        };
        assert!(vendor_only.matches(&DeviceIdentity::new(0x046D, 0xC262)));
        assert!(vendor_only.matches(&DeviceIdentity::new(0x046D, 0x0001)));
        assert!(!vendor_only.matches(&DeviceIdentity::new(0x045E, 0xC262)));
    }

    #[test]
    fn test_unreported_field_only_matches_wildcard() {
        let reported = DeviceIdentity {
            vendor_id: Some(0x046D),
            product_id: None,
        };
        assert!(!DeviceIdentity::new(0x046D, 0xC262).matches(&reported));
        assert!(DeviceIdentity::parse("0x046D", "")
            .unwrap()
            .matches(&reported));
    }

    #[test]
    fn test_display_and_format() {
        assert_eq!(DeviceIdentity::new(0x046D, 0xC262).to_string(), "046d:c262");
        assert_eq!(DeviceIdentity::ANY.to_string(), "*:*");
        assert_eq!(format_hex_id(Some(0x46D)), "0x046D");
        assert_eq!(format_hex_id(None), "");
    }
}
