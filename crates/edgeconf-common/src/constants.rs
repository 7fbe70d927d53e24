//! Configuration keys, reserved module names, and other fixed values.

/// Key holding the identifier of the network every module joins.
pub const NETWORK_ID_KEY: &str = "NetworkId";

/// Key holding the device hostname used as the hub module's alias.
pub const EDGE_DEVICE_HOSTNAME_KEY: &str = "EdgeDeviceHostName";

/// Key holding the workload API endpoint URI.
pub const WORKLOAD_URI_KEY: &str = "IOTEDGE_WORKLOADURI";

/// Key holding the management API endpoint URI.
pub const MANAGEMENT_URI_KEY: &str = "IOTEDGE_MANAGEMENTURI";

/// Every key read by the overlays, in resolution order.
pub const OVERLAY_KEYS: [&str; 4] = [
    WORKLOAD_URI_KEY,
    MANAGEMENT_URI_KEY,
    NETWORK_ID_KEY,
    EDGE_DEVICE_HOSTNAME_KEY,
];

/// Key holding the registry address of process-level credentials.
pub const REGISTRY_ADDRESS_KEY: &str = "EDGECONF_REGISTRY_ADDRESS";

/// Key holding the user name of process-level credentials.
pub const REGISTRY_USERNAME_KEY: &str = "EDGECONF_REGISTRY_USERNAME";

/// Key holding the password of process-level credentials.
pub const REGISTRY_PASSWORD_KEY: &str = "EDGECONF_REGISTRY_PASSWORD";

/// Environment variables picked up by the layered configuration.
pub const ENV_KEYS: [&str; 7] = [
    WORKLOAD_URI_KEY,
    MANAGEMENT_URI_KEY,
    NETWORK_ID_KEY,
    EDGE_DEVICE_HOSTNAME_KEY,
    REGISTRY_ADDRESS_KEY,
    REGISTRY_USERNAME_KEY,
    REGISTRY_PASSWORD_KEY,
];

/// Configuration file section holding overlay settings.
pub const OVERLAY_SETTINGS_KEY: &str = "overlay";

/// Default name of the module that receives the device hostname alias.
pub const EDGE_HUB_MODULE_NAME: &str = "edgeHub";

/// Default name of the module that receives the management socket mount.
pub const EDGE_AGENT_MODULE_NAME: &str = "edgeAgent";

/// URI scheme of local inter-process (Unix domain socket) endpoints.
pub const UNIX_SCHEME: &str = "unix";

/// Registry assumed for image references without an explicit domain.
pub const DEFAULT_REGISTRY: &str = "docker.io";

/// Application name used in CLI output.
pub const APP_NAME: &str = "edgeconf";
