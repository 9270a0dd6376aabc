use service_call_logger::statistics::QueryStatistics;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock query counter with a scripted value.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockQueryStatistics {
    count: Arc<AtomicU64>,
    reads: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockQueryStatistics {
    pub fn new(initial: u64) -> Self {
        Self {
            count: Arc::new(AtomicU64::new(initial)),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn advance(&self, by: u64) {
        self.count.fetch_add(by, Ordering::SeqCst);
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl QueryStatistics for MockQueryStatistics {
    fn prepare_statement_count(&self) -> u64 {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.count.load(Ordering::SeqCst)
    }
}
