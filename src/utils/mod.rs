//! Project-specific utilities live here.

use uuid::Uuid;

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("grubdash::{module}")
}

/// Next record id: a UUIDv7 in simple (dash-free) form, so ids sort by creation time.
pub fn next_id() -> String {
    Uuid::now_v7().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let ids: Vec<String> = (0..64).map(|_| next_id()).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| id.len() == 32));
    }
}
