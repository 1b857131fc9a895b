//! Registry service port
//!
//! Every process-wide service stored in the `ServiceRegistry` implements this
//! trait. `DowncastSync` gives the registry a typed accessor without a
//! string-keyed "get by tag, cast by hand" surface: callers ask for the
//! concrete service type and the registry downcasts the stored `Arc`.

use downcast_rs::{DowncastSync, impl_downcast};

use crate::value_objects::ServiceKind;

/// A process-wide singleton service managed by the registry
pub trait Service: DowncastSync {
    /// The registry key this service is stored under
    fn kind(&self) -> ServiceKind;
}

impl_downcast!(sync Service);

impl core::fmt::Debug for dyn Service {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Service").field("kind", &self.kind()).finish_non_exhaustive()
    }
}
