//! Small helpers shared across the engine.
use rand::{distributions::Alphanumeric, Rng};

/// Generates a random public identifier (used for order oids, enrollment ids and Q&A thread
/// ids). These ids are handed out to clients, so they must not leak row ids.
pub fn new_public_id(len: usize) -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
mod test {
    use super::new_public_id;

    #[test]
    fn ids_are_alphanumeric_and_sized() {
        let id = new_public_id(12);
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn ids_are_unique_enough() {
        let a = new_public_id(16);
        let b = new_public_id(16);
        assert_ne!(a, b);
    }
}
