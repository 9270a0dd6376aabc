//! Persistence-layer statistics.
//!
//! Provides monotonic counters the repositories bump for every statement they run.
//! The call-boundary logger only ever reads them, through [`QueryStatistics`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Read-only view of the persistence layer's query counter.
pub trait QueryStatistics: Send + Sync {
    /// Prepared statements executed since start-up. Never decreases.
    fn prepare_statement_count(&self) -> u64;
}

/// Statistics collector shared by the repositories.
#[derive(Debug, Clone)]
pub struct PersistenceStatistics {
    /// Total number of prepared statements executed
    prepare_statement_count: Arc<AtomicU64>,

    /// Number of entities read
    entity_load_count: Arc<AtomicU64>,

    /// Number of entities inserted
    entity_insert_count: Arc<AtomicU64>,

    /// Number of entities updated
    entity_update_count: Arc<AtomicU64>,
}

impl Default for PersistenceStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceStatistics {
    /// Create a new statistics collector.
    pub fn new() -> Self {
        Self {
            prepare_statement_count: Arc::new(AtomicU64::new(0)),
            entity_load_count: Arc::new(AtomicU64::new(0)),
            entity_insert_count: Arc::new(AtomicU64::new(0)),
            entity_update_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record one prepared statement.
    pub fn record_statement(&self) {
        self.prepare_statement_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record entities read.
    pub fn record_loads(&self, count: usize) {
        self.entity_load_count
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record entities inserted.
    pub fn record_inserts(&self, count: usize) {
        self.entity_insert_count
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record entities updated.
    pub fn record_updates(&self, count: usize) {
        self.entity_update_count
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get total entities read.
    pub fn entity_load_count(&self) -> u64 {
        self.entity_load_count.load(Ordering::Relaxed)
    }

    /// Get total entities inserted.
    pub fn entity_insert_count(&self) -> u64 {
        self.entity_insert_count.load(Ordering::Relaxed)
    }

    /// Get total entities updated.
    pub fn entity_update_count(&self) -> u64 {
        self.entity_update_count.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all counters.
    pub fn summary(&self) -> StatisticsSummary {
        StatisticsSummary {
            prepare_statement_count: self.prepare_statement_count(),
            entity_load_count: self.entity_load_count(),
            entity_insert_count: self.entity_insert_count(),
            entity_update_count: self.entity_update_count(),
        }
    }
}

impl QueryStatistics for PersistenceStatistics {
    fn prepare_statement_count(&self) -> u64 {
        self.prepare_statement_count.load(Ordering::Relaxed)
    }
}

/// A snapshot of statistics values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsSummary {
    pub prepare_statement_count: u64,
    pub entity_load_count: u64,
    pub entity_insert_count: u64,
    pub entity_update_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_statistics_creation() {
        let stats = PersistenceStatistics::new();
        assert_eq!(stats.prepare_statement_count(), 0);
        assert_eq!(stats.entity_load_count(), 0);
        assert_eq!(stats.entity_insert_count(), 0);
    }

    #[test]
    fn test_record_statement() {
        let stats = PersistenceStatistics::new();
        stats.record_statement();
        stats.record_statement();
        assert_eq!(stats.prepare_statement_count(), 2);
    }

    #[test]
    fn test_summary() {
        let stats = PersistenceStatistics::new();
        stats.record_statement();
        stats.record_loads(3);
        stats.record_inserts(2);
        stats.record_updates(1);

        let summary = stats.summary();
        assert_eq!(
            summary,
            StatisticsSummary {
                prepare_statement_count: 1,
                entity_load_count: 3,
                entity_insert_count: 2,
                entity_update_count: 1,
            }
        );
    }

    #[test]
    fn test_clones_share_counters() {
        let stats = PersistenceStatistics::new();
        let view: Arc<dyn QueryStatistics> = Arc::new(stats.clone());
        stats.record_statement();
        assert_eq!(view.prepare_statement_count(), 1);
    }

    #[test]
    fn test_concurrent_access() {
        let stats = PersistenceStatistics::new();
        let stats1 = stats.clone();
        let stats2 = stats.clone();

        let handle1 = thread::spawn(move || {
            for _ in 0..100 {
                stats1.record_statement();
            }
        });

        let handle2 = thread::spawn(move || {
            for _ in 0..100 {
                stats2.record_statement();
            }
        });

        handle1.join().unwrap();
        handle2.join().unwrap();

        assert_eq!(stats.prepare_statement_count(), 200);
    }
}
