use std::time::{Duration, Instant};

/// Execution statistics for one inference call.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Total execution time, preprocessing included.
    pub total_time: Duration,
    /// Number of texts processed.
    pub items_processed: usize,
}

impl PipelineStats {
    /// Create a new stats tracker (call at start of operation).
    pub(crate) fn start() -> PipelineStatsBuilder {
        PipelineStatsBuilder {
            start_time: Instant::now(),
        }
    }
}

/// Builder for PipelineStats - tracks timing from creation to finalize.
pub(crate) struct PipelineStatsBuilder {
    start_time: Instant,
}

impl PipelineStatsBuilder {
    /// Finalize stats with the number of items processed.
    pub fn finish(self, items_processed: usize) -> PipelineStats {
        PipelineStats {
            total_time: self.start_time.elapsed(),
            items_processed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineStats;

    #[test]
    fn records_elapsed_time_and_item_count() {
        let builder = PipelineStats::start();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let stats = builder.finish(3);

        assert_eq!(stats.items_processed, 3);
        assert!(stats.total_time >= std::time::Duration::from_millis(5));
    }
}
