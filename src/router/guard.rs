use crate::auth::CredentialProvider;

use super::route::{is_login_path, HOME_PATH, LOGIN_PATH};

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Continue to the target unchanged
    Proceed,
    /// Navigate to this path instead
    Redirect(&'static str),
}

/// Runs before every route transition.
///
/// Authorization is by token presence only: any non-empty stored token
/// counts as signed in. Signed-out users are sent to `/login` from every
/// other screen, and signed-in users are sent from `/login` to `/home`.
pub struct NavigationGuard<P> {
    credentials: P,
}

impl<P: CredentialProvider> NavigationGuard<P> {
    pub fn new(credentials: P) -> Self {
        Self { credentials }
    }

    /// Decide whether a navigation from `_current` to `target` may proceed.
    /// Reads the credential exactly once. `target` is normalized first, so
    /// `/login/` and `/login?next=x` count as the login screen too.
    pub fn check(&self, target: &str, _current: &str) -> NavigationDecision {
        let to_login = is_login_path(target);
        let signed_in = self.credentials.has_token();

        match (to_login, signed_in) {
            (false, false) => NavigationDecision::Redirect(LOGIN_PATH),
            (true, true) => NavigationDecision::Redirect(HOME_PATH),
            _ => NavigationDecision::Proceed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::{KeyValueStore, MemoryStore, TokenCredentials, TOKEN_KEY};

    const OTHER_ROUTES: [&str; 7] = [
        "/home",
        "/profile",
        "/search",
        "/chat/12",
        "/",
        "/does-not-exist",
        "/login-help",
    ];

    fn guard_with(token: Option<&str>) -> NavigationGuard<TokenCredentials<Arc<MemoryStore>>> {
        let store = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            store.set(TOKEN_KEY, token).unwrap();
        }
        NavigationGuard::new(TokenCredentials::new(store))
    }

    #[test]
    fn test_signed_out_redirects_to_login() {
        let guard = guard_with(None);
        for route in OTHER_ROUTES {
            assert_eq!(
                guard.check(route, "/home"),
                NavigationDecision::Redirect("/login"),
                "route {}",
                route
            );
        }
    }

    #[test]
    fn test_signed_in_login_redirects_to_home() {
        let guard = guard_with(Some("abc123"));
        assert_eq!(guard.check("/login", "/"), NavigationDecision::Redirect("/home"));
        assert_eq!(guard.check("/login/", "/profile"), NavigationDecision::Redirect("/home"));
    }

    #[test]
    fn test_signed_in_other_routes_proceed() {
        let guard = guard_with(Some("abc123"));
        for route in OTHER_ROUTES {
            assert_eq!(guard.check(route, "/login"), NavigationDecision::Proceed, "route {}", route);
        }
    }

    #[test]
    fn test_signed_out_login_proceeds() {
        let guard = guard_with(None);
        assert_eq!(guard.check("/login", "/home"), NavigationDecision::Proceed);
        assert_eq!(guard.check("/login", "/"), NavigationDecision::Proceed);
    }

    #[test]
    fn test_login_path_variants() {
        let signed_in = guard_with(Some("abc123"));
        let signed_out = guard_with(None);
        for path in ["/login/", "/login?next=/home", "/login#top"] {
            assert_eq!(signed_in.check(path, "/"), NavigationDecision::Redirect("/home"), "{}", path);
            assert_eq!(signed_out.check(path, "/"), NavigationDecision::Proceed, "{}", path);
        }
        // Only the login screen itself is exempt
        assert_eq!(signed_out.check("/loginx", "/"), NavigationDecision::Redirect("/login"));
    }

    #[test]
    fn test_empty_token_is_signed_out() {
        let guard = guard_with(Some(""));
        assert_eq!(guard.check("/home", "/"), NavigationDecision::Redirect("/login"));
        assert_eq!(guard.check("/login", "/"), NavigationDecision::Proceed);
    }

    #[test]
    fn test_any_token_value_counts() {
        // No validation: garbage still counts as signed in
        let guard = guard_with(Some("not-a-real-token"));
        assert_eq!(guard.check("/home", "/"), NavigationDecision::Proceed);
    }

    #[test]
    fn test_repeated_checks_agree() {
        for token in [None, Some("abc123")] {
            let guard = guard_with(token);
            for route in ["/login", "/home", "/chat/1"] {
                assert_eq!(guard.check(route, "/"), guard.check(route, "/"));
            }
        }
    }

    #[test]
    fn test_decision_follows_store_changes() {
        let store = Arc::new(MemoryStore::new());
        let guard = NavigationGuard::new(TokenCredentials::new(Arc::clone(&store)));

        assert_eq!(guard.check("/home", "/login"), NavigationDecision::Redirect("/login"));
        store.set(TOKEN_KEY, "abc123").unwrap();
        assert_eq!(guard.check("/home", "/login"), NavigationDecision::Proceed);
        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(guard.check("/home", "/login"), NavigationDecision::Redirect("/login"));
    }
}
