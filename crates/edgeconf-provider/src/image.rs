//! Image reference helpers.

use edgeconf_common::constants::DEFAULT_REGISTRY;
use edgeconf_common::types::AuthConfig;

/// Returns the registry domain of an image reference.
///
/// The first path component is a domain when the reference has more than
/// one component and that component contains `.` or `:` or is `localhost`.
/// Anything else lives on the default registry.
#[must_use]
pub fn registry_domain(image: &str) -> &str {
    let name = image.split_once('@').map_or(image, |(name, _)| name);
    match name.split_once('/') {
        Some((first, _)) if first.contains(['.', ':']) || first == "localhost" => first,
        _ => DEFAULT_REGISTRY,
    }
}

/// Returns the first credentials whose server address is the registry of
/// `image`.
#[must_use]
pub fn find_auth_config<'a>(auth_configs: &'a [AuthConfig], image: &str) -> Option<&'a AuthConfig> {
    let domain = registry_domain(image);
    auth_configs
        .iter()
        .find(|auth| auth.server_address.eq_ignore_ascii_case(domain))
}
