//! Growth Scheduler - commits at most one spiral point per interval

use tracing::{info, trace};

use crate::pool::PointPool;
use crate::spiral::{SpiralShape, SpiralState};

/// Default time between commits
pub const DEFAULT_INTERVAL_MS: u64 = 50;

/// Result of a single scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOutcome {
    /// Interval has not elapsed yet
    Idle,
    /// A point was placed at `index`; the pool now holds `count` points
    Committed { index: usize, count: usize },
    /// Pool is full; growth has stopped for good
    Exhausted,
}

/// Text shown in the overlay
#[derive(Debug, Clone, Default)]
pub struct PointCounter {
    text: String,
}

impl PointCounter {
    pub fn set(&mut self, count: usize) {
        self.text = format!("Points: {}", count);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone)]
pub struct GrowthScheduler {
    interval_ms: u64,
    last_commit_ms: Option<u64>,
    spiral: SpiralState,
    counter: PointCounter,
    exhausted: bool,
}

impl GrowthScheduler {
    pub fn new(shape: SpiralShape, interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_commit_ms: None,
            spiral: SpiralState::new(shape),
            counter: PointCounter::default(),
            exhausted: false,
        }
    }

    /// Commit the next point if more than `interval_ms` passed since the last one
    pub fn tick(&mut self, now_ms: u64, pool: &mut PointPool) -> GrowthOutcome {
        if !self.is_ready(now_ms) {
            return GrowthOutcome::Idle;
        }

        match pool.append(self.spiral.next_point()) {
            Ok(index) => {
                self.spiral.advance();
                self.last_commit_ms = Some(now_ms);
                self.counter.set(pool.count());
                trace!(
                    index,
                    radius = self.spiral.radius(),
                    "Committed spiral point"
                );
                GrowthOutcome::Committed {
                    index,
                    count: pool.count(),
                }
            }
            Err(e) => {
                if !self.exhausted {
                    self.exhausted = true;
                    info!("Spiral growth stopped: {}", e);
                }
                GrowthOutcome::Exhausted
            }
        }
    }

    fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_commit_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    pub fn spiral(&self) -> &SpiralState {
        &self.spiral
    }

    pub fn counter(&self) -> &PointCounter {
        &self.counter
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> GrowthScheduler {
        GrowthScheduler::new(SpiralShape::default(), DEFAULT_INTERVAL_MS)
    }

    #[test]
    fn test_interval_gating() {
        let mut pool = PointPool::new(10);
        let mut growth = scheduler();

        assert_eq!(
            growth.tick(0, &mut pool),
            GrowthOutcome::Committed { index: 0, count: 1 }
        );
        assert_eq!(growth.tick(40, &mut pool), GrowthOutcome::Idle);
        // Exactly one interval is not enough
        assert_eq!(growth.tick(50, &mut pool), GrowthOutcome::Idle);
        assert_eq!(
            growth.tick(51, &mut pool),
            GrowthOutcome::Committed { index: 1, count: 2 }
        );
        assert_eq!(pool.count(), 2);
    }

    #[test]
    fn test_capacity_is_soft_limit() {
        let mut pool = PointPool::new(3);
        let mut growth = scheduler();

        for i in 0..3u64 {
            let outcome = growth.tick(i * 100, &mut pool);
            assert!(matches!(outcome, GrowthOutcome::Committed { .. }));
        }
        assert_eq!(growth.tick(300, &mut pool), GrowthOutcome::Exhausted);
        assert_eq!(growth.tick(400, &mut pool), GrowthOutcome::Exhausted);

        assert_eq!(pool.count(), 3);
        assert!(growth.is_exhausted());
        // Spiral does not advance past the last committed point
        assert_eq!(growth.spiral().ticks(), 3);
        assert_eq!(growth.counter().text(), "Points: 3");
    }

    #[test]
    fn test_counter_follows_commits() {
        let mut pool = PointPool::new(10);
        let mut growth = scheduler();
        assert_eq!(growth.counter().text(), "");

        growth.tick(0, &mut pool);
        assert_eq!(growth.counter().text(), "Points: 1");
        growth.tick(10, &mut pool);
        assert_eq!(growth.counter().text(), "Points: 1");
        growth.tick(61, &mut pool);
        assert_eq!(growth.counter().text(), "Points: 2");
    }

    #[test]
    fn test_commits_follow_spiral_path() {
        let shape = SpiralShape::default();
        let mut pool = PointPool::new(100);
        let mut growth = GrowthScheduler::new(shape, 50);

        for i in 0..5u64 {
            growth.tick(i * 51, &mut pool);
        }
        for (n, p) in pool.positions().iter().enumerate() {
            assert_eq!(*p, shape.point(n as u64));
        }
        assert!((growth.spiral().radius() - 0.025).abs() < 1e-12);
    }
}
