//! Reverse-lookup name parsing.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

const V4_SUFFIX: &str = ".in-addr.arpa.";
const V6_SUFFIX: &str = ".ip6.arpa.";

/// Extract the address embedded in a reverse-lookup name.
///
/// `10.0.0.10.in-addr.arpa.` yields `10.0.0.10`. Partial names (fewer than
/// four octets, or fewer than 32 nibbles) and anything that does not parse
/// yield `None`.
pub fn extract_address(qname: &str) -> Option<IpAddr> {
    let name = crate::zones::normalize(qname);

    if let Some(labels) = name.strip_suffix(V4_SUFFIX) {
        let octets: Vec<&str> = labels.split('.').collect();
        if octets.len() != 4 {
            return None;
        }
        let mut bytes = [0u8; 4];
        for (i, octet) in octets.iter().rev().enumerate() {
            if octet.is_empty() || !octet.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            bytes[i] = octet.parse().ok()?;
        }
        return Some(IpAddr::V4(Ipv4Addr::from(bytes)));
    }

    if let Some(labels) = name.strip_suffix(V6_SUFFIX) {
        let nibbles: Vec<&str> = labels.split('.').collect();
        if nibbles.len() != 32 {
            return None;
        }
        let mut value: u128 = 0;
        for nibble in nibbles.iter().rev() {
            if nibble.len() != 1 {
                return None;
            }
            let digit = u8::from_str_radix(nibble, 16).ok()?;
            value = (value << 4) | u128::from(digit);
        }
        return Some(IpAddr::V6(Ipv6Addr::from(value)));
    }

    None
}
