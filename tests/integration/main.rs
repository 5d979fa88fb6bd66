//! HTTP-level tests driving the router over the in-memory store.

mod helpers;

mod collaborator_test;
mod invitation_test;
