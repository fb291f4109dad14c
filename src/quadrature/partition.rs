/// Left edges `x_0 .. x_{n-1}` of `n` equal subintervals of `[start, end]`.
///
/// Points are produced lazily as `start + i * delta_x`; nothing is stored.
/// `end < start` gives a negative `delta_x` and the points run downwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    start: f64,
    delta_x: f64,
    intervals: usize,
    next: usize,
}

impl Partition {
    pub fn new(start: f64, end: f64, intervals: usize) -> Self {
        Partition {
            start,
            delta_x: (end - start) / intervals as f64,
            intervals,
            next: 0,
        }
    }

    pub fn delta_x(&self) -> f64 {
        self.delta_x
    }

    pub fn intervals(&self) -> usize {
        self.intervals
    }

    /// The `i`-th partition point. `point(intervals())` is the right end.
    pub fn point(&self, i: usize) -> f64 {
        self.start + i as f64 * self.delta_x
    }
}

impl Iterator for Partition {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.intervals {
            return None;
        }
        let x = self.point(self.next);
        self.next += 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.intervals - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Partition {}
