/// Depth calculates minimum, maximum, average and percentile of
/// leaf-node depths in an [`Rbt`](crate::Rbt) tree, sampled during
/// [`Rbt::validate`](crate::Rbt::validate).
#[derive(Clone, Debug, Default)]
pub struct Depth {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    depths: Vec<u64>, // depths[d] counts leaf positions at depth d.
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        self.samples += 1;
        self.total += depth;
        if self.samples == 1 || depth < self.min {
            self.min = depth;
        }
        if depth > self.max {
            self.max = depth;
        }
        if depth >= self.depths.len() {
            self.depths.resize(depth + 1, 0);
        }
        self.depths[depth] += 1;
    }

    /// Return number of leaf positions sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return minimum depth of leaf positions.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Return maximum depth of leaf positions.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average depth of leaf positions.
    pub fn mean(&self) -> usize {
        self.total / self.samples
    }

    /// Return depth as tuple of percentiles, each tuple provides
    /// (percentile, depth). Returned percentiles from 90, 91 .. 99
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles: Vec<(u8, usize)> = vec![];
        let (mut acc, mut prev_perc) = (0_u64, 90_u8);
        let iter = self.depths.iter().enumerate().filter(|(_, &n)| n > 0);
        for (depth, samples) in iter {
            acc += *samples;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev_perc {
                percentiles.push((perc, depth));
                prev_perc = perc;
            }
        }
        percentiles
    }

    /// Pretty print depth statistics in human readable format, useful
    /// in logs.
    pub fn pretty_print(&self, prefix: &str) {
        let mean = self.mean();
        println!(
            "{}depth (min, mean, max): {:?}",
            prefix,
            (self.min, mean, self.max)
        );
        for (perc, depth) in self.percentiles().into_iter() {
            println!("{}  {} percentile = {}", prefix, perc, depth);
        }
    }

    /// Convert depth statistics to JSON format, useful for plotting.
    pub fn json(&self) -> String {
        let ps: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(perc, depth)| format!("{}: {}", perc, depth))
            .collect();
        let fields = [
            format!("min: {}", self.min),
            format!("mean: {}", self.mean()),
            format!("max: {}", self.max),
            format!("percentiles: {}", ps.join(", ")),
        ];
        format!("{{ {} }}", fields.join(", "))
    }
}
