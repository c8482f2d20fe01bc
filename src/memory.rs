//! Per-pool memory usage reporting.
//!
//! The host allocator manages several independent arenas. The overlay shows
//! one usage line per pool, queried live on every frame so the numbers track
//! the allocator exactly rather than a cached snapshot.

/// Identifier for one of the host allocator's independent memory arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryPool {
    /// General purpose RAM.
    Ram,
    /// Video RAM mapped for GPU access.
    Vram,
    /// Physically contiguous RAM for DMA surfaces.
    Contiguous,
    /// Budget-constrained pool shared with system services.
    Reserved,
}

/// Live view into the host allocator's per-pool accounting.
pub trait MemoryProvider {
    /// Total capacity of the pool in bytes.
    fn total_bytes(&self, pool: MemoryPool) -> u64;
    /// Currently unallocated bytes in the pool.
    fn free_bytes(&self, pool: MemoryPool) -> u64;
}

/// Pool order and display labels for the overlay, top to bottom.
pub const POOL_LINES: [(MemoryPool, &str); 4] = [
    (MemoryPool::Ram, "RAM Usage"),
    (MemoryPool::Vram, "VRAM Usage"),
    (MemoryPool::Contiguous, "Contiguous RAM Usage"),
    (MemoryPool::Reserved, "Reserved RAM Usage"),
];

const MB: u64 = 1024 * 1024;

/// Usage snapshot for a single pool, truncated to whole megabytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolUsage {
    pub total_mb: u64,
    pub used_mb: u64,
    /// Used fraction of the pool as a percentage. Zero for an empty pool.
    pub percent: f32,
}

impl PoolUsage {
    /// Query the provider and compute usage for one pool.
    ///
    /// Total and free are truncated to megabytes independently before
    /// subtracting, so the line agrees with what each counter reports on
    /// its own.
    pub fn measure(provider: &impl MemoryProvider, pool: MemoryPool) -> Self {
        let total_mb = provider.total_bytes(pool) / MB;
        let used_mb = total_mb.saturating_sub(provider.free_bytes(pool) / MB);
        let percent = if total_mb == 0 {
            0.0
        } else {
            used_mb as f32 / total_mb as f32 * 100.0
        };
        Self {
            total_mb,
            used_mb,
            percent,
        }
    }

    /// Render the usage line shown in the overlay.
    pub fn format_line(&self, label: &str) -> String {
        format!(
            "{label}: {}MB / {}MB ({:.2}%)",
            self.used_mb, self.total_mb, self.percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPools {
        total: u64,
        free: u64,
    }

    impl MemoryProvider for FixedPools {
        fn total_bytes(&self, _pool: MemoryPool) -> u64 {
            self.total
        }
        fn free_bytes(&self, _pool: MemoryPool) -> u64 {
            self.free
        }
    }

    #[test]
    fn test_used_is_total_minus_free() {
        let pools = FixedPools {
            total: 256 * MB,
            free: 64 * MB,
        };
        let usage = PoolUsage::measure(&pools, MemoryPool::Ram);
        assert_eq!(usage.total_mb, 256);
        assert_eq!(usage.used_mb, 192);
        assert_eq!(usage.percent, 75.0);
    }

    #[test]
    fn test_truncates_to_whole_megabytes() {
        // 100.5 MB total, 0.75 MB free: both truncate before subtracting.
        let pools = FixedPools {
            total: 100 * MB + MB / 2,
            free: 3 * MB / 4,
        };
        let usage = PoolUsage::measure(&pools, MemoryPool::Vram);
        assert_eq!(usage.total_mb, 100);
        assert_eq!(usage.used_mb, 100);
    }

    #[test]
    fn test_empty_pool_yields_zero_percent() {
        let pools = FixedPools { total: 0, free: 0 };
        let usage = PoolUsage::measure(&pools, MemoryPool::Reserved);
        assert_eq!(usage.total_mb, 0);
        assert_eq!(usage.used_mb, 0);
        assert_eq!(usage.percent, 0.0);
    }

    #[test]
    fn test_percent_bounds() {
        for (total, free) in [(MB, 0), (MB, MB), (512 * MB, 128 * MB), (MB, 2 * MB)] {
            let pools = FixedPools { total, free };
            let usage = PoolUsage::measure(&pools, MemoryPool::Contiguous);
            assert!(usage.percent >= 0.0);
            assert!(usage.percent <= 100.0);
        }
    }

    #[test]
    fn test_format_line() {
        let usage = PoolUsage {
            total_mb: 256,
            used_mb: 192,
            percent: 75.0,
        };
        assert_eq!(
            usage.format_line("RAM Usage"),
            "RAM Usage: 192MB / 256MB (75.00%)"
        );
    }
}
