use crate::model::AdminUser;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cache entry for a validated admin session
#[derive(Clone, Debug)]
struct CacheEntry {
    user: AdminUser,
    validated_at: Instant,
}

/// In-memory cache of validated admin sessions with TTL
///
/// Entries expire after a short window, forcing the next admin request to
/// revalidate the token against the auth service. An external sign-out is
/// therefore observed at the next re-evaluation rather than never.
#[derive(Debug)]
pub struct SessionCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl SessionCache {
    /// Create a new cache with a 60-second revalidation window
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(60))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Get the user for a token if the entry is present and not expired
    pub async fn get(&self, token: &str) -> Option<AdminUser> {
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get(token) {
            if entry.validated_at.elapsed() > self.ttl {
                entries.remove(token);
                return None;
            }
            return Some(entry.user.clone());
        }

        None
    }

    /// Record a freshly validated token
    pub async fn put(&self, token: &str, user: AdminUser) {
        let mut entries = self.entries.write().await;
        entries.insert(
            token.to_string(),
            CacheEntry {
                user,
                validated_at: Instant::now(),
            },
        );
    }

    /// Drop a token, e.g. on sign-out
    pub async fn remove(&self, token: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(token);
    }

    /// Clear the entire cache
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}
