use alloc::vec::Vec;
use core::cmp;

/// Binary indexed tree over non-negative `f64` sizes.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<f64>, // 1-indexed
    total: f64,
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn from_sizes(sizes: &[f64]) -> Self {
        let n = sizes.len();
        let mut tree = alloc::vec![0.0f64; n + 1];
        let mut total = 0.0f64;
        for i in 1..=n {
            let v = sizes[i - 1];
            total += v;
            tree[i] += v;
            let j = i + lsb(i);
            if j <= n {
                tree[j] += tree[i];
            }
        }
        Self {
            tree,
            total,
            max_bit: max_bit_for(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }
        self.total = self.prefix_sum(new_len);
        self.tree.truncate(new_len + 1);
        self.max_bit = max_bit_for(new_len);
    }

    /// Appends a new value to the end of the tree.
    ///
    /// This runs in `O(log n)` due to the internal prefix sum queries needed to initialize the
    /// newly appended internal node.
    pub(crate) fn push_value(&mut self, value: f64) {
        let new_len = self.len() + 1;
        self.tree.push(0.0);

        // tree[i] stores the sum of the last lsb(i) values ending at i.
        let start_exclusive = new_len - lsb(new_len);
        let before = self.prefix_sum(new_len - 1) - self.prefix_sum(start_exclusive);
        self.tree[new_len] = before.max(0.0) + value;
        self.total += value;

        self.max_bit = max_bit_for(new_len);
    }

    pub(crate) fn add(&mut self, index: usize, delta: f64) {
        let n = self.len();
        if index >= n {
            return;
        }
        self.total = (self.total + delta).max(0.0);
        let mut i = index + 1;
        while i <= n {
            self.tree[i] += delta;
            debug_assert!(
                self.tree[i] > -1e-6,
                "Fenwick underflow (idx={i}, value={}, delta={delta})",
                self.tree[i]
            );
            i += lsb(i);
        }
    }

    /// Sum of the first `count` values; `count >= len` yields the running total.
    pub(crate) fn prefix_sum(&self, count: usize) -> f64 {
        let n = self.len();
        if count >= n {
            return self.total;
        }
        let mut i = cmp::min(count, n);
        let mut sum = 0.0f64;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum.max(0.0)
    }

    pub(crate) fn total(&self) -> f64 {
        self.total
    }

    /// Returns the number of leading values whose prefix sum is <= `target`.
    ///
    /// Descends from the highest power of two, so it never scans the value array.
    pub(crate) fn lower_bound(&self, mut target: f64) -> usize {
        let n = self.len();
        if n == 0 {
            return 0;
        }

        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn max_bit_for(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
