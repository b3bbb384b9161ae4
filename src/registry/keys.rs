//! Well-known registry keys and typed accessors.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::ResourceConfig;
use crate::messaging::MessagingClient;
use crate::registry::store::Registry;
use crate::secrets::SecretProvider;

pub const MESSAGE_BUS_CONFIG: &str = "bootstrap.message_bus.config";
pub const SECRET_PROVIDER: &str = "bootstrap.secret_provider";
pub const MESSAGING_CLIENT: &str = "bootstrap.messaging_client";

/// Resource configuration that handlers may update in place.
pub type SharedResourceConfig = ArcSwap<ResourceConfig>;

/// Register the message bus configuration. Returns the shared handle.
pub fn set_message_bus_config(registry: &Registry, config: ResourceConfig) -> Arc<SharedResourceConfig> {
    let shared = Arc::new(ArcSwap::from_pointee(config));
    registry.set_shared(MESSAGE_BUS_CONFIG, Arc::clone(&shared));
    shared
}

pub fn message_bus_config(registry: &Registry) -> Option<Arc<SharedResourceConfig>> {
    registry.get::<SharedResourceConfig>(MESSAGE_BUS_CONFIG)
}

/// Snapshot the configuration with its optional settings and leave them
/// drained in the registry.
pub fn take_resource_config(shared: &SharedResourceConfig) -> ResourceConfig {
    let previous = shared.rcu(|current| ResourceConfig {
        optional: HashMap::new(),
        ..ResourceConfig::clone(current)
    });
    ResourceConfig::clone(&previous)
}

pub fn set_secret_provider(registry: &Registry, provider: Arc<dyn SecretProvider>) {
    registry.set(SECRET_PROVIDER, provider);
}

pub fn secret_provider(registry: &Registry) -> Option<Arc<dyn SecretProvider>> {
    registry
        .get::<Arc<dyn SecretProvider>>(SECRET_PROVIDER)
        .map(|provider| Arc::clone(&*provider))
}

pub fn set_messaging_client(registry: &Registry, client: Arc<dyn MessagingClient>) {
    registry.set(MESSAGING_CLIENT, client);
}

pub fn messaging_client(registry: &Registry) -> Option<Arc<dyn MessagingClient>> {
    registry
        .get::<Arc<dyn MessagingClient>>(MESSAGING_CLIENT)
        .map(|client| Arc::clone(&*client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::InsecureSecretProvider;

    #[test]
    fn test_take_drains_optional() {
        let registry = Registry::new();
        let mut config = ResourceConfig {
            host: "localhost".into(),
            ..Default::default()
        };
        config.optional.insert("ClientId".into(), "svc".into());
        set_message_bus_config(&registry, config);

        let shared = message_bus_config(&registry).unwrap();
        let taken = take_resource_config(&shared);
        assert_eq!(taken.optional.len(), 1);
        assert_eq!(taken.host, "localhost");

        let left = message_bus_config(&registry).unwrap().load_full();
        assert!(left.optional.is_empty());
        assert_eq!(left.host, "localhost");
    }

    #[test]
    fn test_secret_provider_round_trip() {
        let registry = Registry::new();
        assert!(secret_provider(&registry).is_none());

        set_secret_provider(&registry, Arc::new(InsecureSecretProvider::new()));
        let provider = secret_provider(&registry).unwrap();
        assert!(provider.get_secret("anything").is_err());
    }
}
