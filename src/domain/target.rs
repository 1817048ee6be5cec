//! Connection coordinates for the remote runtime.

use std::fmt;

/// Host and port of a remote management endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
}

impl ConnectionTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The JMX RMI service URL for this target.
    #[must_use]
    pub fn service_url(&self) -> JmxServiceUrl {
        JmxServiceUrl::for_target(self)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// JMX service URL of the form `service:jmx:rmi:///jndi/rmi://<host>:<port>/jmxrmi`.
///
/// Keeps the target alongside the rendered URL so transports that do not
/// speak RMI directly can still reach the host and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JmxServiceUrl {
    target: ConnectionTarget,
    url: String,
}

impl JmxServiceUrl {
    #[must_use]
    pub fn for_target(target: &ConnectionTarget) -> Self {
        Self {
            url: format!(
                "service:jmx:rmi:///jndi/rmi://{}:{}/jmxrmi",
                target.host, target.port
            ),
            target: target.clone(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn target(&self) -> &ConnectionTarget {
        &self.target
    }
}

impl fmt::Display for JmxServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
