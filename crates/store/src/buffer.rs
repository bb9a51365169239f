/// Fixed-capacity rolling window for time-series data.
///
/// Backed by a fixed arena with a head index, so the capacity bound is
/// structural: the arena never grows past `capacity`, regardless of how
/// many values are pushed. When full, each push overwrites the oldest
/// slot. Iteration order is oldest → newest.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    /// Index of the oldest element (always 0 until the buffer fills).
    head: usize,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty ring buffer with the given maximum capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be > 0");
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    /// Push a value, overwriting the oldest entry when at capacity.
    pub fn push(&mut self, value: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
        } else {
            self.slots[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        // While filling, head is 0 and the arena is already in order;
        // once full, the oldest element sits at head.
        self.slots[self.head..]
            .iter()
            .chain(self.slots[..self.head].iter())
    }

    /// Iterate over up to `count` of the newest elements, oldest → newest.
    pub fn latest(&self, count: usize) -> impl Iterator<Item = &T> {
        let skip = self.slots.len().saturating_sub(count);
        self.iter().skip(skip)
    }

    /// The most recently pushed value, if any.
    pub fn last(&self) -> Option<&T> {
        if self.slots.is_empty() {
            return None;
        }
        let len = self.slots.len();
        Some(&self.slots[(self.head + len - 1) % len])
    }

    /// Number of elements currently stored.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the buffer contains no elements.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of elements the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer is at full capacity.
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copy out the contents, oldest → newest.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}
