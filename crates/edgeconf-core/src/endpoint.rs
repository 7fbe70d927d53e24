//! Endpoint URIs read from configuration and their bind mount paths.

use edgeconf_common::error::{EdgeconfError, Result};
use edgeconf_common::source::ConfigSource;
use edgeconf_common::types::BindPathPolicy;
use percent_encoding::percent_decode_str;
use url::Url;

/// A parsed endpoint URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUri {
    scheme: String,
    path: String,
}

impl EndpointUri {
    /// Parses `value`, read from configuration key `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeconfError::InvalidUri`] if `value` is not an absolute URI.
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        let url = Url::parse(value).map_err(|source| EdgeconfError::InvalidUri {
            key: key.to_string(),
            value: value.to_string(),
            source,
        })?;
        Ok(Self {
            scheme: url.scheme().to_string(),
            path: url.path().to_string(),
        })
    }

    /// Resolves the required key `key` from `source` and parses it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or its value is not a URI.
    pub fn from_config(source: &dyn ConfigSource, key: &str) -> Result<Self> {
        let value = source.require(key)?;
        Self::parse(key, &value)
    }

    /// URI scheme, lowercased.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// URI path, still percent-encoded.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Host path to bind-mount so the socket is reachable in a container.
    #[must_use]
    pub fn bind_path(&self, policy: BindPathPolicy) -> String {
        match policy {
            BindPathPolicy::Unix => self.path.clone(),
            BindPathPolicy::Windows => windows_parent_dir(&self.path),
        }
    }

    /// Bind entry mapping the bind path to itself.
    #[must_use]
    pub fn bind_entry(&self, policy: BindPathPolicy) -> String {
        let path = self.bind_path(policy);
        format!("{path}:{path}")
    }
}

/// Converts a URI path such as `/C:/Program%20Files/iotedge/mgmt/sock` into
/// the native parent directory `C:\Program Files\iotedge\mgmt`.
fn windows_parent_dir(uri_path: &str) -> String {
    let decoded = percent_decode_str(uri_path).decode_utf8_lossy();
    let local = decoded
        .strip_prefix('/')
        .filter(|rest| has_drive_prefix(rest))
        .unwrap_or(&*decoded)
        .replace('/', "\\");

    match local.rfind('\\') {
        Some(idx) => {
            let parent = &local[..idx];
            // A drive or filesystem root keeps its trailing separator.
            if parent.is_empty() || (parent.len() == 2 && has_drive_prefix(parent)) {
                local[..=idx].to_string()
            } else {
                parent.to_string()
            }
        }
        None => local,
    }
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
