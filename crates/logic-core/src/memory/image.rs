//! Plain-text memory-image parser.
//!
//! Format, one directive per line:
//! - blank lines and lines starting with `#` are skipped
//! - `@<hex-address> <hex-value>` sets one cell
//! - any other line is ignored
//!
//! Range checks against a concrete block happen at load time, not here.

use crate::ImageError;

/// One `(address, value)` pair from a memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ImageEntry {
    /// Target cell address.
    pub addr: usize,
    /// Value as written in the image, before truncation to the cell width.
    pub value: u64,
}

impl ImageEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(addr: usize, value: u64) -> Self {
        Self { addr, value }
    }

    /// Low eight bits of the value, as stored by an 8-bit cell.
    #[must_use]
    pub const fn byte(&self) -> u8 {
        self.value.to_le_bytes()[0]
    }
}

/// Parses a memory image into entries in source order.
///
/// # Errors
///
/// Returns [`ImageError::MissingValue`] for an `@` line without a value
/// token and [`ImageError::InvalidHex`] for a token that is not hexadecimal.
pub fn parse_memory_image(text: &str) -> Result<Vec<ImageEntry>, ImageError> {
    let mut entries = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(directive) = line.strip_prefix('@') else {
            continue;
        };

        let mut tokens = directive.split_whitespace();
        let Some(addr_token) = tokens.next() else {
            return Err(ImageError::InvalidHex {
                line: line_no,
                token: String::new(),
            });
        };
        let value_token = tokens
            .next()
            .ok_or(ImageError::MissingValue { line: line_no })?;

        let addr = parse_hex(addr_token, line_no)?;
        let value = parse_hex(value_token, line_no)?;
        let addr = usize::try_from(addr).unwrap_or(usize::MAX);
        entries.push(ImageEntry::new(addr, value));
    }

    Ok(entries)
}

fn parse_hex(token: &str, line: usize) -> Result<u64, ImageError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).map_err(|_| ImageError::InvalidHex {
        line,
        token: token.to_string(),
    })
}
