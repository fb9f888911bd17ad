//! Port and bind-address micro-syntax used by service-enabling flags.
//!
//! Accepted shapes: `""`, `":8181"`, `"=8181"`, `":8181/192.168.0.1"`,
//! `"=8181/::1"`.

use serde::Serialize;

/// Port and address a service should bind to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEndpoint {
    pub port: i32,
    pub address: String,
}

/// The value did not start with `:` or `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSyntaxError;

/// Parse `[:=]<port>[/<address>]`, falling back to the defaults for missing parts.
///
/// The port is read as a leading decimal number the way C's `atoi` does: an
/// optional sign followed by digits, anything after that ignored, no digits
/// at all meaning port 0.
pub fn parse_port_and_address(
    value: &str,
    default_port: i32,
    default_address: &str,
) -> Result<ServiceEndpoint, PortSyntaxError> {
    if value.is_empty() {
        return Ok(ServiceEndpoint {
            port: default_port,
            address: default_address.to_string(),
        });
    }

    let rest = value
        .strip_prefix(':')
        .or_else(|| value.strip_prefix('='))
        .ok_or(PortSyntaxError)?;

    let port = leading_int(rest);
    let address = match value.find('/') {
        Some(slash) => value[slash + 1..].to_string(),
        None => default_address.to_string(),
    };

    Ok(ServiceEndpoint { port, address })
}

fn leading_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            (acc * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1)
        });

    let signed = if negative { -magnitude } else { magnitude };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
