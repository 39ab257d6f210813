//! Shared fixtures for integration tests.

use std::sync::Arc;

use tether_guard::{CallInterceptor, ScopeGuard};

/// Task used by the login scenarios.
#[allow(dead_code)]
pub const LOGIN_TASK: &str = "fix login validation";

/// A guard with the login task declared over `login.js`, plus an
/// interceptor wired to it.
#[allow(dead_code)]
pub fn login_session() -> (Arc<ScopeGuard>, CallInterceptor) {
    let guard = Arc::new(ScopeGuard::default());
    let declared = guard.declare_scope(LOGIN_TASK, &["login.js"]);
    assert!(declared.allowed, "login scope should be accepted");
    let interceptor = CallInterceptor::new(Arc::clone(&guard));
    (guard, interceptor)
}

/// `n` distinct file names.
#[allow(dead_code)]
pub fn files(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("src/module_{i}.rs")).collect()
}
