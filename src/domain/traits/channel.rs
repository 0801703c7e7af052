use crate::application::errors::DeliveryError;
use crate::domain::entities::Outbound;

/// One delivery mechanism in the transport chain
pub trait TransportChannel: Send + Sync {
    /// Short name used in logs and delivery reports
    fn name(&self) -> &'static str;

    /// Checked on every delivery; must not cache
    fn is_available(&self, payload: &Outbound) -> bool;

    /// Hand the payload over. Remote channels return as soon as the payload
    /// is queued; they do not wait for an acknowledgment.
    fn deliver(&self, payload: &Outbound) -> Result<(), DeliveryError>;
}

impl<T: TransportChannel + ?Sized> TransportChannel for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_available(&self, payload: &Outbound) -> bool {
        (**self).is_available(payload)
    }

    fn deliver(&self, payload: &Outbound) -> Result<(), DeliveryError> {
        (**self).deliver(payload)
    }
}
