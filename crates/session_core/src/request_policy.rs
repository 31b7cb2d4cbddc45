//! Which API requests carry the stored session token.

/// Paths that must never receive the bearer token.
const ANONYMOUS_PATHS: [&str; 4] = [
    "/api/auth/login",
    "/api/auth/logout",
    "/api/auth/register",
    "/api/password/reset",
];

/// Whether a request to `path` should send `Authorization: Bearer <token>`.
#[must_use]
pub fn attaches_bearer(path: &str) -> bool {
    !ANONYMOUS_PATHS
        .iter()
        .any(|anonymous| path.contains(anonymous))
}

/// Header value for `token`, or `None` when the path is anonymous or the
/// token is blank.
#[must_use]
pub fn bearer_header(path: &str, token: Option<&str>) -> Option<String> {
    let token = token.map(str::trim).filter(|token| !token.is_empty())?;
    attaches_bearer(path).then(|| format!("Bearer {token}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_and_reset_paths_stay_anonymous() {
        assert!(!attaches_bearer("/api/auth/login"));
        assert!(!attaches_bearer("/api/auth/logout"));
        assert!(!attaches_bearer("/api/password/reset/confirm"));
        assert!(!attaches_bearer("https://api.sms.edu.in/api/auth/register"));
        assert!(attaches_bearer("/api/password/change"));
        assert!(attaches_bearer("/api/admin/students"));
    }

    #[test]
    fn bearer_header_needs_a_token() {
        assert_eq!(
            bearer_header("/api/password/change", Some("h.c.s")).as_deref(),
            Some("Bearer h.c.s")
        );
        assert_eq!(bearer_header("/api/password/change", Some("  ")), None);
        assert_eq!(bearer_header("/api/auth/login", Some("h.c.s")), None);
        assert_eq!(bearer_header("/api/student/results", None), None);
    }
}
