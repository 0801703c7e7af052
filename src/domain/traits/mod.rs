//! Domain traits - Abstractions for infrastructure implementations

pub mod channel;
pub mod clock;
pub mod identity;
pub mod notifier;
pub mod store;

pub use channel::TransportChannel;
pub use clock::{Clock, ManualClock, SystemClock};
pub use identity::Identity;
pub use notifier::Notifier;
pub use store::BlobStore;
