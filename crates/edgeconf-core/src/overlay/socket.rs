//! Bind-mounts local socket endpoints into module containers.
//!
//! The workload socket is mounted into every module. The management socket
//! is mounted only into the agent module.

use std::sync::Arc;

use edgeconf_common::config::OverlaySettings;
use edgeconf_common::constants::{MANAGEMENT_URI_KEY, WORKLOAD_URI_KEY};
use edgeconf_common::error::Result;
use edgeconf_common::source::ConfigSource;
use edgeconf_common::types::ModuleRole;

use super::SpecOverlay;
use crate::endpoint::EndpointUri;
use crate::spec::CreateSpec;

/// Adds bind mounts for endpoints served over a local socket.
pub struct SocketMountOverlay {
    source: Arc<dyn ConfigSource>,
    settings: OverlaySettings,
}

impl SocketMountOverlay {
    /// Creates the overlay over the given configuration.
    #[must_use]
    pub fn new(source: Arc<dyn ConfigSource>, settings: OverlaySettings) -> Self {
        Self { source, settings }
    }

    fn mount(&self, module_name: &str, spec: &mut CreateSpec, uri: &EndpointUri) {
        let entry = uri.bind_entry(self.settings.bind_path_policy);
        tracing::debug!(module = module_name, bind = %entry, "mounting local socket");
        spec.push_bind(entry);
    }
}

impl SpecOverlay for SocketMountOverlay {
    fn name(&self) -> &'static str {
        "socket-mount"
    }

    fn apply(&self, module_name: &str, spec: &mut CreateSpec) -> Result<()> {
        let workload = EndpointUri::from_config(self.source.as_ref(), WORKLOAD_URI_KEY)?;
        if self.settings.is_local_scheme(workload.scheme()) {
            self.mount(module_name, spec, &workload);
        }

        // Both URIs may point at the same socket. Entries are not deduplicated.
        let management = EndpointUri::from_config(self.source.as_ref(), MANAGEMENT_URI_KEY)?;
        if self.settings.is_local_scheme(management.scheme())
            && self.settings.reserved.has_role(module_name, ModuleRole::Agent)
        {
            self.mount(module_name, spec, &management);
        }

        Ok(())
    }
}

impl std::fmt::Debug for SocketMountOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketMountOverlay")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use edgeconf_common::error::EdgeconfError;
    use edgeconf_common::source::MapConfigSource;
    use edgeconf_common::types::BindPathPolicy;
    use serde_json::json;

    use super::*;

    const WORKLOAD: &str = "unix:///run/iotedge/workload.sock";
    const MANAGEMENT: &str = "unix:///run/iotedge/mgmt.sock";

    fn overlay(workload: &str, management: &str, policy: BindPathPolicy) -> SocketMountOverlay {
        let source = MapConfigSource::new()
            .with(WORKLOAD_URI_KEY, workload)
            .with(MANAGEMENT_URI_KEY, management);
        let settings = OverlaySettings {
            bind_path_policy: policy,
            ..OverlaySettings::default()
        };
        SocketMountOverlay::new(Arc::new(source), settings)
    }

    #[test]
    fn workload_socket_is_mounted_for_any_module() {
        let mut spec = CreateSpec::default();
        overlay(WORKLOAD, MANAGEMENT, BindPathPolicy::Unix)
            .apply("tempSensor", &mut spec)
            .unwrap();
        assert_eq!(
            spec.binds(),
            ["/run/iotedge/workload.sock:/run/iotedge/workload.sock"]
        );
    }

    #[test]
    fn management_socket_is_mounted_only_for_agent() {
        let overlay = overlay(WORKLOAD, MANAGEMENT, BindPathPolicy::Unix);

        let mut agent = CreateSpec::default();
        overlay.apply("EdgeAgent", &mut agent).unwrap();
        assert_eq!(
            agent.binds(),
            [
                "/run/iotedge/workload.sock:/run/iotedge/workload.sock",
                "/run/iotedge/mgmt.sock:/run/iotedge/mgmt.sock",
            ]
        );

        let mut hub = CreateSpec::default();
        overlay.apply("edgeHub", &mut hub).unwrap();
        assert!(!hub.binds().iter().any(|b| b.contains("mgmt.sock")));
    }

    #[test]
    fn network_schemes_are_skipped() {
        let mut spec = CreateSpec::default();
        overlay("http://127.0.0.1:15581", "https://127.0.0.1:15580", BindPathPolicy::Unix)
            .apply("edgeAgent", &mut spec)
            .unwrap();
        assert!(spec.host_config.is_none());
    }

    #[test]
    fn existing_binds_are_kept_and_appended_to() {
        let mut spec: CreateSpec =
            serde_json::from_value(json!({"HostConfig": {"Binds": ["/data:/data"]}})).unwrap();
        overlay(WORKLOAD, "http://127.0.0.1:15580", BindPathPolicy::Unix)
            .apply("edgeAgent", &mut spec)
            .unwrap();
        assert_eq!(
            spec.binds(),
            [
                "/data:/data",
                "/run/iotedge/workload.sock:/run/iotedge/workload.sock",
            ]
        );
    }

    #[test]
    fn coinciding_sockets_produce_duplicate_entries() {
        let mut spec = CreateSpec::default();
        overlay(WORKLOAD, WORKLOAD, BindPathPolicy::Unix)
            .apply("edgeAgent", &mut spec)
            .unwrap();
        assert_eq!(spec.binds().len(), 2);
        assert_eq!(spec.binds()[0], spec.binds()[1]);
    }

    #[test]
    fn windows_policy_mounts_parent_directories() {
        let mut spec = CreateSpec::default();
        overlay(
            "unix:///C:/ProgramData/iotedge/workload/sock",
            "unix:///C:/ProgramData/iotedge/mgmt/sock",
            BindPathPolicy::Windows,
        )
        .apply("edgeAgent", &mut spec)
        .unwrap();
        assert_eq!(
            spec.binds(),
            [
                "C:\\ProgramData\\iotedge\\workload:C:\\ProgramData\\iotedge\\workload",
                "C:\\ProgramData\\iotedge\\mgmt:C:\\ProgramData\\iotedge\\mgmt",
            ]
        );
    }

    #[test]
    fn malformed_management_uri_fails_for_any_module() {
        let mut spec = CreateSpec::default();
        let err = overlay(WORKLOAD, "not a uri", BindPathPolicy::Unix)
            .apply("tempSensor", &mut spec)
            .unwrap_err();
        assert!(matches!(err, EdgeconfError::InvalidUri { .. }));
    }

    #[test]
    fn missing_workload_uri_fails() {
        let source = MapConfigSource::new().with(MANAGEMENT_URI_KEY, MANAGEMENT);
        let overlay = SocketMountOverlay::new(Arc::new(source), OverlaySettings::default());
        let err = overlay
            .apply("edgeHub", &mut CreateSpec::default())
            .unwrap_err();
        assert!(matches!(err, EdgeconfError::MissingConfig { .. }));
    }

    #[test]
    fn custom_local_scheme_is_honoured() {
        let source = MapConfigSource::new()
            .with(WORKLOAD_URI_KEY, "npipe:///run/iotedge/workload.sock")
            .with(MANAGEMENT_URI_KEY, MANAGEMENT);
        let settings = OverlaySettings {
            bind_path_policy: BindPathPolicy::Unix,
            local_scheme: "npipe".into(),
            ..OverlaySettings::default()
        };
        let mut spec = CreateSpec::default();
        SocketMountOverlay::new(Arc::new(source), settings)
            .apply("edgeAgent", &mut spec)
            .unwrap();
        assert_eq!(
            spec.binds(),
            ["/run/iotedge/workload.sock:/run/iotedge/workload.sock"]
        );
    }
}
