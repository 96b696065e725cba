use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "MOOD_UPSTREAM_TIMEOUT_SECS";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 8;

/// Parse a listen address. `:8080` binds every interface on that port.
pub fn parse_listen_addr(raw: &str) -> Result<SocketAddr, String> {
    let raw = raw.trim();
    let candidate = if raw.starts_with(':') {
        format!("0.0.0.0{}", raw)
    } else {
        raw.to_string()
    };

    if let Ok(addr) = candidate.parse::<SocketAddr>() {
        return Ok(addr);
    }

    candidate
        .to_socket_addrs()
        .map_err(|e| format!("Invalid listen address {:?}: {}", raw, e))?
        .next()
        .ok_or_else(|| format!("Listen address {:?} resolved to nothing", raw))
}

/// Deadline for each upstream call, from `MOOD_UPSTREAM_TIMEOUT_SECS`
pub fn upstream_timeout() -> Duration {
    upstream_timeout_from(env::var(ENV_UPSTREAM_TIMEOUT_SECS).ok().as_deref())
}

/// Missing, zero or unparsable values fall back to the default
pub fn upstream_timeout_from(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_port_binds_all_interfaces() {
        let addr = parse_listen_addr(":8080").unwrap();
        assert_eq!(addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn test_full_address() {
        let addr = parse_listen_addr("127.0.0.1:9000").unwrap();
        assert_eq!(addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn test_upstream_timeout_fallbacks() {
        let default = Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS);
        assert_eq!(upstream_timeout_from(None), default);
        assert_eq!(upstream_timeout_from(Some("0")), default);
        assert_eq!(upstream_timeout_from(Some("soon")), default);
        assert_eq!(upstream_timeout_from(Some("-3")), default);
        assert_eq!(upstream_timeout_from(Some(" 20 ")), Duration::from_secs(20));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse_listen_addr("not an address").is_err());
    }
}
