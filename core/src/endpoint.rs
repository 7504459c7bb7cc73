use std::fmt::{Display, Formatter};

/// Port used when none is configured, by security.
pub fn default_port(secure: bool) -> u16 {
    if secure {
        443
    } else {
        80
    }
}

/// Endpoint is the scheme, host and port every generated URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    secure: bool,
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint, picking 443 or 80 when `port` is `None`.
    pub fn new(host: impl Into<String>, port: Option<u16>, secure: bool) -> Self {
        Self {
            secure,
            host: host.into(),
            port: port.unwrap_or_else(|| default_port(secure)),
        }
    }

    /// `https` or `http`.
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Host without port.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port, always explicit.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, written into every URL even for default ports.
    pub fn server_name(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Absolute URL for a path that already carries its query string.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}://{}{path_and_query}", self.scheme(), self.server_name())
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme(), self.server_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        assert_eq!(Endpoint::new("s3.amazonaws.com", None, true).port(), 443);
        assert_eq!(Endpoint::new("s3.amazonaws.com", None, false).port(), 80);
        assert_eq!(Endpoint::new("localhost", Some(9000), false).port(), 9000);
    }

    #[test]
    fn test_url() {
        let ep = Endpoint::new("localhost", Some(9000), false);
        assert_eq!(ep.url("/bucket/key"), "http://localhost:9000/bucket/key");
        assert_eq!(ep.to_string(), "http://localhost:9000");
    }
}
