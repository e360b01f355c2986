//! User cache - authenticated users kept in memory for a short TTL
//!
//! Saves one database round trip per request. Profile updates call
//! [`UserCache::invalidate_all`], so changes made through this node are
//! visible immediately; other nodes see them once the TTL expires.

use crate::entities::User;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

pub struct UserCache {
    entries: DashMap<Uuid, (User, Instant)>,
    ttl: Duration,
}

impl UserCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<User> {
        let fresh = self
            .entries
            .get(id)
            .filter(|entry| entry.1.elapsed() < self.ttl)
            .map(|entry| entry.0.clone());

        if fresh.is_none() {
            // expired entries are dropped lazily
            self.entries.remove_if(id, |_, (_, at)| at.elapsed() >= self.ttl);
        }
        fresh
    }

    pub fn insert(&self, user: User) {
        self.entries.insert(user.id, (user, Instant::now()));
    }

    pub fn invalidate_all(&self) {
        debug!("Invalidating {} cached users", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
