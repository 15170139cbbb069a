pub mod catalog;
pub mod host;
pub mod proxy;
pub mod registry;
pub mod surface;
pub mod wire;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),

    #[error(transparent)]
    Registry(#[from] registry::RegistryError),

    #[error(transparent)]
    Surface(#[from] surface::SurfaceError),

    #[error(transparent)]
    Proxy(#[from] proxy::ProxyError),

    #[error(transparent)]
    Wire(#[from] wire::WireError),

    #[error(transparent)]
    Host(#[from] host::HostError),
}
