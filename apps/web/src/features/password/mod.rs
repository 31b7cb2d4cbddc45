//! Password change and reset. These calls do not touch the session manager;
//! a successful change signs the user out from the page.

pub(crate) mod client;
