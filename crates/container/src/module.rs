//! Module - Two-phase module contract

use crate::ServiceContainer;
use shared::BoxError;

/// A self-contained application feature unit.
///
/// The initializer calls `register_types` and then `on_initialized`, in that
/// order, on the caller's thread. Everything registered in the first phase is
/// resolvable in the second.
pub trait Module {
    /// Declare this module's services into the shared container
    fn register_types(&self, registry: &mut ServiceContainer) -> Result<(), BoxError>;

    /// Perform startup behavior (attach views, start contributions, ...)
    fn on_initialized(&self, provider: &ServiceContainer) -> Result<(), BoxError>;
}
