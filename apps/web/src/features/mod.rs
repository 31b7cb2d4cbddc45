//! Feature areas (auth, password, theme). Routes import these modules to keep
//! view code focused while session and API handling stay in one place.

pub(crate) mod auth;
pub(crate) mod password;
pub(crate) mod theme;
