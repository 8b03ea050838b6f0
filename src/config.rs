//! Process-lifetime configuration, built once from the command line and
//! passed around by reference.

/// Address family of the listening socket. Only these two exist; there is
/// no third value to guard against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrFamily {
    V4,
    V6,
}

#[derive(Debug, Clone)]
pub struct ListenerConfig {
    pub family: AddrFamily,
    /// Host argument as typed. The socket always binds the wildcard
    /// address of the chosen family; the host is accepted for parity with
    /// the companion client tools and is deliberately not used to
    /// constrain the bind.
    pub host: String,
    pub port: u16,
    /// String form of the port, kept for display next to the numeric value.
    pub service: String,
}

impl ListenerConfig {
    pub fn new(family: AddrFamily, host: impl Into<String>, port: u16) -> Self {
        ListenerConfig {
            family,
            host: host.into(),
            port,
            service: port.to_string(),
        }
    }
}

/// Value parser for the port positional: base-10, 1 through 65535. Runs
/// before any socket is created, so a bad port never gets as far as setup.
pub fn parse_port(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("invalid port '{s}': expected 1-65535")),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ports_in_range() {
        assert_eq!(parse_port("1"), Ok(1));
        assert_eq!(parse_port("9000"), Ok(9000));
        assert_eq!(parse_port("65535"), Ok(65535));
    }

    #[test]
    fn rejects_zero_and_out_of_range() {
        assert!(parse_port("0").is_err());
        assert!(parse_port("65536").is_err());
        assert!(parse_port("70000").is_err());
        assert!(parse_port("-1").is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(parse_port("").is_err());
        assert!(parse_port("http").is_err());
        assert!(parse_port("80th").is_err());
        assert!(parse_port("0x50").is_err());
    }

    #[test]
    fn config_keeps_port_string_form() {
        let config = ListenerConfig::new(AddrFamily::V4, "127.0.0.1", 9000);
        assert_eq!(config.port, 9000);
        assert_eq!(config.service, "9000");
        assert_eq!(config.host, "127.0.0.1");
    }
}
