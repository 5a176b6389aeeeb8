use nimbus_dns_application::services::DirectoryStore;
use nimbus_dns_application::use_cases::{QueryDispatcher, RefreshInventoryUseCase};
use nimbus_dns_domain::Config;
use nimbus_dns_infrastructure::dns::{DnsHandler, InventoryHandler};
use nimbus_dns_infrastructure::openstack::OpenStackProvider;
use std::sync::Arc;
use tracing::info_span;

/// Everything the binary needs, wired once from the loaded configuration.
///
/// The refresher and the dispatcher share one directory store; only the
/// refresher ever publishes to it.
pub struct Services {
    pub store: Arc<DirectoryStore>,
    pub refresher: Arc<RefreshInventoryUseCase>,
    pub dispatcher: Arc<QueryDispatcher>,
    pub handler: Arc<dyn DnsHandler>,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let openstack = &config.openstack;
        let store = Arc::new(DirectoryStore::new());

        let provider = Arc::new(OpenStackProvider::new(
            openstack.auth.clone(),
            openstack.region.clone(),
        )?);

        let refresher = Arc::new(
            RefreshInventoryUseCase::new(provider, Arc::clone(&store), openstack.zone_set())
                .with_span(info_span!("openstack", task = "refresh", region = %openstack.region)),
        );

        let dispatcher = Arc::new(
            QueryDispatcher::new(
                Arc::clone(&store),
                openstack.zone_set(),
                openstack.fallthrough_set(),
                openstack.ttl,
            )
            .with_span(info_span!("openstack", task = "dispatch")),
        );

        let handler: Arc<dyn DnsHandler> =
            Arc::new(InventoryHandler::new(Arc::clone(&dispatcher)));

        Ok(Self {
            store,
            refresher,
            dispatcher,
            handler,
        })
    }
}
