use std::collections::{btree_map, BTreeMap};
use std::ops::Index;

/// Named per-episode metric accumulators
///
/// An environment owns a `Report` and bumps its entries as it steps. The
/// training loop calls [`take`](Report::take) at the end of each episode to
/// collect the finished values and zero the accumulators for the next one.
#[derive(Debug)]
pub struct Report {
    metrics: BTreeMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            metrics: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    /// Access the accumulator for `key` for in-place modification
    pub fn entry(&mut self, key: &'static str) -> btree_map::Entry<'_, &'static str, f64> {
        self.metrics.entry(key)
    }

    /// The metric names, in stable (sorted) order
    pub fn keys(&self) -> Vec<&'static str> {
        self.metrics.keys().copied().collect()
    }

    /// Take the accumulated values, zeroing the accumulators
    pub fn take(&mut self) -> BTreeMap<&'static str, f64> {
        let fresh = self.metrics.keys().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.metrics, fresh)
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, key: &str) -> &Self::Output {
        &self.metrics[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_and_take() {
        let mut report = Report::new(vec!["reward", "steps"]);
        report.entry("steps").and_modify(|x| *x += 1.0);
        report.entry("reward").and_modify(|x| *x += -1.0);
        report.entry("reward").and_modify(|x| *x += 100.0);

        assert_eq!(report["reward"], 99.0, "Reward accumulated");
        assert_eq!(report["steps"], 1.0, "Steps accumulated");

        let taken = report.take();
        assert_eq!(*taken.get("reward").unwrap(), 99.0, "Taken values final");
        assert_eq!(report["reward"], 0.0, "Accumulators zeroed after take");
        assert_eq!(report.keys(), vec!["reward", "steps"], "Keys survive take");
    }
}
