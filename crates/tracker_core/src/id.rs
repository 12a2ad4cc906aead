//! Identifier generation for new projects and comments.
//!
//! # Invariants
//! - Generated ids are UUIDv7: unique and ordered by creation time.
//! - Ids generated later in the same process never sort before earlier ones
//!   (uuid keeps a process-wide counter for sub-millisecond ordering).

use uuid::Uuid;

/// Returns a new time-ordered identifier.
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::new_id;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn ids_are_version_7() {
        assert_eq!(new_id().get_version_num(), 7);
    }

    #[test]
    fn sequential_ids_are_strictly_increasing() {
        let ids: Vec<_> = (0..1_000).map(|_| new_id()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn concurrent_callers_never_collide() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| (0..500).map(|_| new_id()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id generated: {id}");
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }
}
