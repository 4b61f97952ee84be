use ndarray::Array2;
use crate::drivers::CollarError;
use crate::types::Vector3;
/// Fixed-capacity ring of scalars, written one 3-axis tuple at a time.
///
/// Once full, each new tuple overwrites the oldest one.
pub struct ChannelRing {
    data: Vec<f32>,
    cursor: usize, // next free slot, always < capacity
    accepted: u64,
}
impl ChannelRing {
    pub fn with_capacity(capacity: usize) -> Result<Self, CollarError> {
        if capacity == 0 || capacity % 3 != 0 {
            return Err(CollarError::InvalidWindow { samples: capacity });
        }
        Ok(Self {
            data: vec![0.0; capacity],
            cursor: 0,
            accepted: 0,
        })
    }
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    /// Tuples written since creation, overwritten ones included.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }
    pub fn is_full(&self) -> bool {
        self.accepted * 3 >= self.data.len() as u64
    }
    pub fn write_tuple(&mut self, tuple: Vector3) {
        let slot = self.cursor;
        self.data[slot..slot + 3].copy_from_slice(&tuple.as_array());
        self.cursor = (self.cursor + 3) % self.data.len();
        self.accepted += 1;
    }
    /// Most recently written tuple.
    pub fn latest(&self) -> Option<Vector3> {
        if self.accepted == 0 {
            return None;
        }
        let slot = (self.cursor + self.data.len() - 3) % self.data.len();
        let t = &self.data[slot..slot + 3];
        Some(Vector3::new(t[0], t[1], t[2]))
    }
    /// Window contents oldest-first.
    ///
    /// Before the first wrap only the written scalars are returned; afterwards the result
    /// is always exactly `capacity` long.
    pub fn snapshot(&self) -> Vec<f32> {
        if !self.is_full() {
            return self.data[..self.cursor].to_vec();
        }
        let mut out = Vec::with_capacity(self.data.len());
        out.extend_from_slice(&self.data[self.cursor..]);
        out.extend_from_slice(&self.data[..self.cursor]);
        out
    }
    /// Snapshot reshaped to one row per tuple.
    pub fn as_matrix(&self) -> Array2<f32> {
        let flat = self.snapshot();
        let rows = flat.len() / 3;
        Array2::from_shape_vec((rows, 3), flat).unwrap_or_else(|_| Array2::zeros((0, 3)))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn tuple(n: f32) -> Vector3 {
        Vector3::new(n, -n, 2.0 * n)
    }
    #[test]
    fn rejects_bad_capacity() {
        assert!(ChannelRing::with_capacity(0).is_err());
        assert!(ChannelRing::with_capacity(10).is_err());
        assert!(ChannelRing::with_capacity(600).unwrap().latest().is_none());
    }
    #[test]
    fn partial_window_returns_written_tuples_only() {
        let mut ring = ChannelRing::with_capacity(9).unwrap();
        ring.write_tuple(tuple(1.0));
        ring.write_tuple(tuple(2.0));
        assert!(!ring.is_full());
        assert_eq!(ring.cursor(), 6);
        assert_eq!(ring.snapshot(), vec![1.0, -1.0, 2.0, 2.0, -2.0, 4.0]);
    }
    #[test]
    fn wraps_to_index_zero_after_capacity_tuples() {
        let mut ring = ChannelRing::with_capacity(9).unwrap();
        for n in 1..=3 {
            ring.write_tuple(tuple(n as f32));
        }
        assert!(ring.is_full());
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.latest(), Some(tuple(3.0)));
        ring.write_tuple(tuple(4.0));
        assert_eq!(ring.cursor(), 3);
        assert_eq!(ring.data[0], 4.0);
        assert_eq!(
            ring.snapshot(),
            vec![2.0, -2.0, 4.0, 3.0, -3.0, 6.0, 4.0, -4.0, 8.0]
        );
    }
    #[test]
    fn cursor_stays_in_bounds_and_snapshot_length_is_fixed_once_full() {
        let mut ring = ChannelRing::with_capacity(600).unwrap();
        for n in 0..1000 {
            ring.write_tuple(tuple(n as f32));
            assert!(ring.cursor() < ring.capacity());
            assert_eq!(ring.cursor() % 3, 0);
            if ring.is_full() {
                assert_eq!(ring.snapshot().len(), 600);
            }
        }
        let snapshot = ring.snapshot();
        assert_eq!(snapshot[0], 800.0);
        assert_eq!(snapshot[597], 999.0);
        assert_eq!(ring.accepted(), 1000);
    }
    #[test]
    fn matrix_has_one_row_per_tuple() {
        let mut ring = ChannelRing::with_capacity(6).unwrap();
        ring.write_tuple(tuple(1.0));
        let matrix = ring.as_matrix();
        assert_eq!(matrix.shape(), &[1, 3]);
        assert_eq!(matrix[[0, 2]], 2.0);
    }
}
