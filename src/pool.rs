//! Point Pool - fixed-capacity storage for committed spiral points
//!
//! Points are append-only: once placed they are never moved or removed.
//! The dirty flag tells the renderer when instance transforms need re-uploading.

use thiserror::Error;

/// Default maximum number of point instances
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Largest capacity a config may request; storage is reserved up front
pub const MAX_CAPACITY: usize = 1_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Point pool full: capacity {capacity} reached")]
    CapacityExceeded { capacity: usize },
}

/// Fixed-capacity ordered collection of point positions
#[derive(Debug, Clone)]
pub struct PointPool {
    positions: Vec<[f32; 3]>,
    capacity: usize,
    dirty: bool,
}

impl PointPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            capacity,
            dirty: false,
        }
    }

    /// Append a point, returning its index
    pub fn append(&mut self, position: [f32; 3]) -> Result<usize, PoolError> {
        if self.is_full() {
            return Err(PoolError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let index = self.positions.len();
        self.positions.push(position);
        self.dirty = true;
        Ok(index)
    }

    pub fn count(&self) -> usize {
        self.positions.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.positions.len() >= self.capacity
    }

    /// Active points, in commit order
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Clear the dirty flag, returning whether it was set
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_returns_sequential_indices() {
        let mut pool = PointPool::new(4);
        assert_eq!(pool.append([0.0, 0.0, 0.0]), Ok(0));
        assert_eq!(pool.append([1.0, 0.0, 0.0]), Ok(1));
        assert_eq!(pool.count(), 2);
        assert_eq!(pool.positions()[1], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut pool = PointPool::new(3);
        for i in 0..3 {
            pool.append([i as f32, 0.0, 0.0]).unwrap();
        }
        assert!(pool.is_full());

        let err = pool.append([9.0, 9.0, 9.0]).unwrap_err();
        assert_eq!(err, PoolError::CapacityExceeded { capacity: 3 });
        assert_eq!(pool.count(), 3);
        assert_eq!(pool.positions()[2], [2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_dirty_flag() {
        let mut pool = PointPool::new(2);
        assert!(!pool.take_dirty());

        pool.append([0.0, 0.0, 0.0]).unwrap();
        assert!(pool.take_dirty());
        assert!(!pool.take_dirty());

        // A rejected append leaves the buffer clean
        pool.append([0.0, 0.0, 0.0]).unwrap();
        pool.take_dirty();
        assert!(pool.append([0.0, 0.0, 0.0]).is_err());
        assert!(!pool.take_dirty());
    }

    #[test]
    fn test_zero_capacity() {
        let mut pool = PointPool::new(0);
        assert!(pool.is_full());
        assert!(pool.append([0.0, 0.0, 0.0]).is_err());
    }
}
