//! IPv4 CIDR block parsing and mask arithmetic.
//!
//! Provides [`CidrBlock`], the validated `address/prefix` pair every other part of
//! the crate works with, and [`parse`], the one acceptance rule for CIDR text.

use lazy_static::lazy_static;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

lazy_static! {
    // Octets 0-255 (up to three digits, leading zeros allowed), prefix 0-32.
    static ref CIDR_FORMAT: Regex = Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)/([0-9]|[12][0-9]|3[0-2])$"
    )
    .expect("Invalid Regex?");
}

/// Finer diagnosis attached to a rejected CIDR string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatIssue {
    Empty,
    MissingPrefix,
    OctetOutOfRange,
    PrefixOutOfRange,
    Malformed,
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FormatIssue::Empty => "empty input",
            FormatIssue::MissingPrefix => "missing /prefix",
            FormatIssue::OctetOutOfRange => "octet outside 0-255",
            FormatIssue::PrefixOutOfRange => "prefix outside 0-32",
            FormatIssue::Malformed => "expected a.b.c.d/n",
        };
        f.write_str(text)
    }
}

/// Error returned when CIDR text fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrParseError {
    /// The text is not `a.b.c.d/n` with octets 0-255 and prefix 0-32.
    #[error("Invalid CIDR notation '{input}': {reason}")]
    InvalidFormat { input: String, reason: FormatIssue },
}

impl CidrParseError {
    fn invalid(input: &str, reason: FormatIssue) -> Self {
        CidrParseError::InvalidFormat {
            input: input.to_string(),
            reason,
        }
    }

    /// The finer diagnosis behind this rejection.
    pub fn reason(&self) -> FormatIssue {
        match self {
            CidrParseError::InvalidFormat { reason, .. } => *reason,
        }
    }
}

// Subnet mask for a prefix length; `len` is already known to be <= 32.
fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Parse CIDR text into a [`CidrBlock`].
///
/// Accepts exactly four dot-separated decimal octets (0-255, leading zeros allowed and
/// read as decimal) followed by `/` and a prefix 0-32. No surrounding whitespace.
pub fn parse(text: &str) -> Result<CidrBlock, CidrParseError> {
    let caps = CIDR_FORMAT
        .captures(text)
        .ok_or_else(|| CidrParseError::invalid(text, diagnose(text)))?;

    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = caps[i + 1]
            .parse()
            .map_err(|_| CidrParseError::invalid(text, FormatIssue::OctetOutOfRange))?;
    }
    let prefix_len: u8 = caps[5]
        .parse()
        .map_err(|_| CidrParseError::invalid(text, FormatIssue::PrefixOutOfRange))?;

    Ok(CidrBlock {
        addr: Ipv4Addr::from(octets),
        prefix_len,
    })
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn diagnose(text: &str) -> FormatIssue {
    if text.is_empty() {
        return FormatIssue::Empty;
    }
    let Some((addr, prefix)) = text.split_once('/') else {
        return FormatIssue::MissingPrefix;
    };

    let octets: Vec<&str> = addr.split('.').collect();
    if octets.len() != 4 || !octets.iter().all(|o| all_digits(o)) {
        return FormatIssue::Malformed;
    }
    if octets
        .iter()
        .any(|o| o.parse::<u32>().map_or(true, |v| v > 255))
    {
        return FormatIssue::OctetOutOfRange;
    }
    if all_digits(prefix) && prefix.parse::<u32>().map_or(true, |p| p > MAX_LENGTH as u32) {
        return FormatIssue::PrefixOutOfRange;
    }
    FormatIssue::Malformed
}

/// A validated IPv4 CIDR block.
///
/// The address is kept as supplied; host bits below the prefix are not cleared.
/// All range arithmetic goes through [`CidrBlock::network`] instead.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    addr: Ipv4Addr,
    prefix_len: u8,
}

impl CidrBlock {
    /// The address as supplied by the caller.
    pub fn address(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn mask(&self) -> u32 {
        mask_bits(self.prefix_len)
    }

    pub fn wildcard(&self) -> u32 {
        !self.mask()
    }

    /// Lowest address of the range, as u32.
    pub fn network(&self) -> u32 {
        u32::from(self.addr) & self.mask()
    }

    /// Highest address of the range, as u32.
    pub fn broadcast(&self) -> u32 {
        self.network() | self.wildcard()
    }

    /// Get the lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network())
    }

    /// Get the highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.broadcast())
    }

    /// True for `0.0.0.0/0`.
    pub fn is_unspecified(&self) -> bool {
        self.addr.is_unspecified() && self.prefix_len == 0
    }
}

impl FromStr for CidrBlock {
    type Err = CidrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bits() {
        assert_eq!(mask_bits(0), 0x00000000);
        assert_eq!(mask_bits(8), 0xFF000000);
        assert_eq!(mask_bits(16), 0xFFFF0000);
        assert_eq!(mask_bits(24), 0xFFFFFF00);
        assert_eq!(mask_bits(31), 0xFFFFFFFE);
        assert_eq!(mask_bits(32), 0xFFFFFFFF);
    }

    #[test]
    fn test_parse_valid() {
        let block = parse("10.3.58.0/24").unwrap();
        assert_eq!(block.address(), Ipv4Addr::new(10, 3, 58, 0));
        assert_eq!(block.prefix_len(), 24);

        let block = parse("0.0.0.0/0").unwrap();
        assert!(block.is_unspecified());

        let block = parse("255.255.255.255/32").unwrap();
        assert_eq!(block.broadcast(), u32::MAX);
    }

    #[test]
    fn test_parse_leading_zeros_are_decimal() {
        let block = parse("010.001.099.008/24").unwrap();
        assert_eq!(block.address(), Ipv4Addr::new(10, 1, 99, 8));
        assert_eq!(block.to_string(), "10.1.99.8/24");
    }

    #[test]
    fn test_parse_rejects() {
        let cases = [
            ("10.10.10.0/33", FormatIssue::PrefixOutOfRange),
            ("256.1.1.1/24", FormatIssue::OctetOutOfRange),
            ("10.10.10.0", FormatIssue::MissingPrefix),
            ("", FormatIssue::Empty),
            ("10.10.10/24", FormatIssue::Malformed),
            ("10.10.10.0/24 ", FormatIssue::Malformed),
            (" 10.10.10.0/24", FormatIssue::Malformed),
            ("10.10.10.0/", FormatIssue::Malformed),
            ("10.10.10.0/024", FormatIssue::Malformed),
            ("10.10.10.a/24", FormatIssue::Malformed),
            ("10.10.10.0/24/1", FormatIssue::Malformed),
            ("1000.1.1.1/24", FormatIssue::OctetOutOfRange),
        ];
        for (input, reason) in cases {
            let err = parse(input).unwrap_err();
            assert!(
                matches!(err, CidrParseError::InvalidFormat { .. }),
                "{input} should be InvalidFormat"
            );
            assert_eq!(err.reason(), reason, "wrong reason for '{input}'");
        }
    }

    #[test]
    fn test_network_keeps_supplied_address() {
        let block = parse("192.168.1.42/24").unwrap();
        assert_eq!(block.address(), Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(block.lo(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(block.hi(), Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(block.to_string(), "192.168.1.42/24");
    }

    #[test]
    fn test_range_extremes() {
        let all = parse("0.0.0.0/0").unwrap();
        assert_eq!(all.network(), 0);
        assert_eq!(all.broadcast(), u32::MAX);

        let host = parse("10.0.0.7/32").unwrap();
        assert_eq!(host.network(), host.broadcast());
        assert_eq!(host.wildcard(), 0);
    }

    #[test]
    fn test_serde_string_form() {
        let block: CidrBlock = serde_json::from_str("\"10.0.10.64/26\"").unwrap();
        assert_eq!(block, parse("10.0.10.64/26").unwrap());
        assert_eq!(serde_json::to_string(&block).unwrap(), "\"10.0.10.64/26\"");
        assert!(serde_json::from_str::<CidrBlock>("\"10.0.10.64\"").is_err());
    }

    #[test]
    fn test_cidr_cmp() {
        let ip1 = parse("10.0.0.1/24").unwrap();
        let ip2 = parse("10.0.0.2/24").unwrap();
        let ip3: CidrBlock = "10.0.0.1/24".parse().unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 >= ip3);
    }
}
