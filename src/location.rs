use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// The page URL's fragment identifier.
///
/// This is the only place the current route lives; everything else derives
/// it from here. Assigning the same hash again is not a change and wakes
/// nobody, matching how browsers fire `hashchange`.
#[derive(Clone)]
pub struct Location {
    hash: Arc<watch::Sender<String>>,
}

impl Location {
    pub fn new(initial: &str) -> Self {
        let (hash, _) = watch::channel(normalize(initial));
        Self { hash: Arc::new(hash) }
    }

    pub fn hash(&self) -> String {
        self.hash.borrow().clone()
    }

    /// Returns whether the hash changed.
    pub fn assign(&self, hash: &str) -> bool {
        let next = normalize(hash);
        let changed = self.hash.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });
        if changed {
            debug!(hash = %next, "location changed");
        }
        changed
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.hash.subscribe()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("")
    }
}

fn normalize(hash: &str) -> String {
    let hash = hash.trim();
    if hash.is_empty() || hash.starts_with('#') {
        hash.to_string()
    } else {
        format!("#{hash}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_adds_hash_sign_and_ignores_repeats() {
        let location = Location::default();
        assert!(location.assign("/board"));
        assert_eq!(location.hash(), "#/board");
        assert!(!location.assign("#/board"));
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let location = Location::new("#/home");
        let mut changes = location.subscribe();
        location.assign("#/board");
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow_and_update(), "#/board");
    }
}
