//! Collaborator sharing: the permission diff engine, invitation tokens and
//! direct grant management.

pub mod invitation;
pub mod reconcile;
pub mod resources;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use invitation::{CreateInvitation, InvitationDelivery, InvitationService, RedeemedInvitation};
pub use reconcile::{GrantPlan, PermissionReconciler, ReconcileOutcome};
pub use resources::ResourceSet;
pub use service::{CollaboratorService, DeletedGrants, UpdatedGrants};
