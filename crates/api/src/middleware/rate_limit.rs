//! Keyed request quota for the API routes.
//!
//! Authenticated callers are limited per user id; anonymous callers per
//! source address. A caller presenting an invalid token is treated as
//! anonymous here and rejected later by the [`AuthUser`] extractor.
//!
//! [`AuthUser`]: crate::middleware::auth::AuthUser

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};

use crate::auth::jwt::JwtConfig;
use crate::error::AppError;
use crate::middleware::auth::claims_from_headers;
use crate::state::AppState;

/// Checks between sweeps of keys whose quota has fully replenished.
const PRUNE_EVERY_CHECKS: u64 = 1024;

/// Keyed GCRA limiter that periodically forgets idle keys, so the key
/// store stays bounded by the callers seen in the last quota period.
pub struct CallerRateLimiter {
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
    checks: AtomicU64,
    prune_every: u64,
}

pub type KeyedRateLimiter = Arc<CallerRateLimiter>;

impl CallerRateLimiter {
    pub fn new(quota: Quota, prune_every: u64) -> Self {
        Self {
            limiter: RateLimiter::keyed(quota),
            checks: AtomicU64::new(0),
            prune_every: prune_every.max(1),
        }
    }

    /// Record a request for `key`; `false` when the key is over quota.
    pub fn check(&self, key: &String) -> bool {
        let n = self.checks.fetch_add(1, Ordering::Relaxed) + 1;
        if n % self.prune_every == 0 {
            self.prune();
        }
        self.limiter.check_key(key).is_ok()
    }

    /// Drop keys whose state is indistinguishable from a fresh one.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        tracing::debug!(keys = self.limiter.len(), "Pruned rate limiter keys");
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

/// Create a limiter allowing `per_minute` requests per key.
pub fn create_rate_limiter(per_minute: NonZeroU32) -> KeyedRateLimiter {
    Arc::new(CallerRateLimiter::new(
        Quota::per_minute(per_minute),
        PRUNE_EVERY_CHECKS,
    ))
}

/// Quota key for a request: `user:<id>` for a valid bearer token, else
/// `ip:<addr>`.
pub fn rate_limit_key(request: &Request, jwt: &JwtConfig) -> String {
    if let Ok(claims) = claims_from_headers(request.headers(), jwt) {
        return format!("user:{}", claims.sub);
    }

    match request.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(addr)) => format!("ip:{}", addr.ip()),
        None => "ip:unknown".to_string(),
    }
}

/// Middleware enforcing the per-caller quota held in [`AppState`].
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = rate_limit_key(&request, &state.config.jwt);

    if !state.rate_limiter.check(&key) {
        tracing::warn!(key = %key, "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}
