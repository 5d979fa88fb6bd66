//! # collabhub-service
//!
//! Business logic for collaborator sharing. Services follow constructor
//! injection: the persistence handle, codecs and mailer are provided at
//! construction time via `Arc` references.

pub mod collaborator;
pub mod context;

pub use collaborator::{
    CollaboratorService, CreateInvitation, DeletedGrants, GrantPlan, InvitationDelivery,
    InvitationService, PermissionReconciler, ReconcileOutcome, RedeemedInvitation, ResourceSet,
    UpdatedGrants,
};
pub use context::RequestContext;
