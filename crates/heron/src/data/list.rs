//! Bucketed FIFO queues over a fixed universe of items.
//!
//! Every item is a `usize` below the universe size and sits in at most one bucket. Each bucket is
//! a doubly linked list threaded through per-item `prev`/`next` slots, so enqueueing, dequeueing
//! and moving an item to another bucket are all O(1).

#[derive(Debug, Clone)]
pub struct BucketQueue {
    head: Vec<Option<usize>>,
    tail: Vec<Option<usize>>,
    prev: Vec<Option<usize>>,
    next: Vec<Option<usize>>,
    bucket_of: Vec<Option<usize>>,
}

impl BucketQueue {
    pub fn new(buckets: usize, universe: usize) -> Self {
        Self {
            head: vec![None; buckets],
            tail: vec![None; buckets],
            prev: vec![None; universe],
            next: vec![None; universe],
            bucket_of: vec![None; universe],
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.head.len()
    }

    pub fn bucket_of(&self, item: usize) -> Option<usize> {
        self.bucket_of.get(item).copied().flatten()
    }

    pub fn is_empty(&self, bucket: usize) -> bool {
        self.head.get(bucket).is_none_or(Option::is_none)
    }

    /// Appends `item` to the back of `bucket`, unlinking it from wherever it was first.
    pub fn enqueue(&mut self, bucket: usize, item: usize) {
        self.remove(item);
        self.prev[item] = self.tail[bucket];
        self.next[item] = None;
        match self.tail[bucket] {
            Some(t) => self.next[t] = Some(item),
            None => self.head[bucket] = Some(item),
        }
        self.tail[bucket] = Some(item);
        self.bucket_of[item] = Some(bucket);
    }

    /// Pops the oldest item of `bucket`.
    pub fn dequeue(&mut self, bucket: usize) -> Option<usize> {
        let item = self.head.get(bucket).copied().flatten()?;
        self.remove(item);
        Some(item)
    }

    /// Unlinks `item` from its bucket. Returns `false` if it was not queued.
    pub fn remove(&mut self, item: usize) -> bool {
        let Some(bucket) = self.bucket_of(item) else {
            return false;
        };
        let (prev, next) = (self.prev[item], self.next[item]);
        match prev {
            Some(p) => self.next[p] = next,
            None => self.head[bucket] = next,
        }
        match next {
            Some(n) => self.prev[n] = prev,
            None => self.tail[bucket] = prev,
        }
        self.prev[item] = None;
        self.next[item] = None;
        self.bucket_of[item] = None;
        true
    }

    /// Items of `bucket`, oldest first.
    pub fn iter(&self, bucket: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.head.get(bucket).copied().flatten(), |&i| self.next[i])
    }
}
