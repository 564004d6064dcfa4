use super::{Location, Route};

/// Outcome of evaluating one navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the (resolved) target
    Allowed(Location),
    /// Go to login instead; `redirect` holds the intended destination
    Redirected(Location),
}

/// Decide whether `target`, which resolved to `route`, may be entered.
///
/// Pure and synchronous: protected routes need a credential, everything else
/// passes unchanged.
pub fn evaluate(
    route: &Route,
    target: &Location,
    has_credential: bool,
    login_path: &str,
) -> GuardDecision {
    if !route.requires_auth || has_credential {
        return GuardDecision::Allowed(target.clone());
    }
    GuardDecision::Redirected(
        Location::new(login_path).with_query("redirect", target.to_string()),
    )
}
