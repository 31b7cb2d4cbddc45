//! Auth feature: the HTTP implementation of the session API, the Leptos
//! context that owns the session manager and the route gate. Tokens and
//! passwords must never be logged from here.

pub(crate) mod client;
mod guards;
pub(crate) mod state;

pub(crate) use guards::RoleGate;
