//! Overlays that adjust a cloned creation spec for the host platform.
//!
//! Each overlay mutates only the spec it is handed and reads everything
//! else from an immutable [`ConfigSource`](edgeconf_common::source::ConfigSource).

pub mod network;
pub mod socket;

use edgeconf_common::error::Result;

use crate::spec::CreateSpec;

pub use network::NetworkAliasOverlay;
pub use socket::SocketMountOverlay;

/// A single adjustment applied to a module's creation spec.
pub trait SpecOverlay: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Applies the overlay to `spec`, which belongs to `module_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or malformed.
    fn apply(&self, module_name: &str, spec: &mut CreateSpec) -> Result<()>;
}
