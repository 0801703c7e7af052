//! Domain layer - Core chat objects and the collaborator seams
//! 
//! This layer contains:
//! - Entities: Commands, whispers, outbound payloads, the local user
//! - Traits: Abstractions the host provides (Identity, Clock, Notifier,
//!   BlobStore, TransportChannel)

pub mod entities;
pub mod traits;
