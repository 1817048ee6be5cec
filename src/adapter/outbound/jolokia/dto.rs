//! Jolokia request and response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::MemoryUsage;
use crate::error::{ConnectionError, Error, Result};

/// `error_type` reported when a pool does not support an attribute.
const UNSUPPORTED_OPERATION: &str = "java.lang.UnsupportedOperationException";

/// Object name pattern matching every memory pool MBean.
pub(super) const MEMORY_POOL_PATTERN: &str = "java.lang:type=MemoryPool,*";

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum Attribute {
    One(&'static str),
    Many(&'static [&'static str]),
}

#[derive(Debug, Serialize)]
pub(super) struct ProxyTarget {
    pub url: String,
}

/// One Jolokia operation; requests are always posted as a bulk array.
#[derive(Debug, Serialize)]
pub(super) struct Request {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbean: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ProxyTarget>,
}

impl Request {
    pub fn version() -> Self {
        Self {
            kind: "version",
            mbean: None,
            attribute: None,
            target: None,
        }
    }

    pub fn search(pattern: &str) -> Self {
        Self {
            kind: "search",
            mbean: Some(pattern.to_string()),
            ..Self::version()
        }
    }

    pub fn read(mbean: &str, attribute: Attribute) -> Self {
        Self {
            kind: "read",
            mbean: Some(mbean.to_string()),
            attribute: Some(attribute),
            target: None,
        }
    }

    #[must_use]
    pub fn via(mut self, target: Option<&str>) -> Self {
        self.target = target.map(|url| ProxyTarget {
            url: url.to_string(),
        });
        self
    }
}

/// One entry of a bulk response.
#[derive(Debug, Deserialize)]
pub(super) struct Response {
    pub status: u16,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Response {
    /// Unwrap the value, turning a non-200 status into an error.
    pub fn into_value(self) -> Result<Value> {
        if self.status == 200 {
            return Ok(self.value);
        }

        let error_type = self.error_type.unwrap_or_default();
        let message = self.error.unwrap_or_default();
        if error_type == UNSUPPORTED_OPERATION || message.contains(UNSUPPORTED_OPERATION) {
            return Err(Error::UnsupportedOperation(message));
        }

        Err(ConnectionError::Remote {
            status: self.status,
            error_type,
            message,
        }
        .into())
    }

    pub fn into_typed<T: for<'de> Deserialize<'de>>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_value()?)?)
    }
}

/// Value of `version`.
#[derive(Debug, Deserialize)]
pub(super) struct Version {
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
}

/// Value of a `Name` + `Type` read on one pool.
#[derive(Debug, Deserialize)]
pub(super) struct PoolAttributes {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub pool_type: String,
}

/// `java.lang.management.MemoryUsage` composite data.
#[derive(Debug, Deserialize)]
pub(super) struct Usage {
    pub committed: i64,
    pub init: i64,
    pub max: i64,
    pub used: i64,
}

impl From<Usage> for MemoryUsage {
    fn from(usage: Usage) -> Self {
        Self {
            committed: usage.committed,
            init: usage.init,
            max: usage.max,
            used: usage.used,
        }
    }
}
