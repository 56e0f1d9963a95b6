// Reference model for randomized tests. Keys are offsets into a plain
// vector, an occupied slot carries the value.
struct RefNodes {
    entries: Vec<Option<i64>>,
}

impl RefNodes {
    fn new(capacity: usize) -> RefNodes {
        RefNodes {
            entries: vec![None; capacity],
        }
    }

    fn get(&self, key: i64) -> Option<i64> {
        self.entries[key as usize]
    }

    fn create(&mut self, key: i64, value: i64) {
        let entry = &mut self.entries[key as usize];
        if entry.is_none() {
            *entry = Some(value);
        }
    }

    fn set(&mut self, key: i64, value: i64) -> Option<i64> {
        self.entries[key as usize].replace(value)
    }

    fn delete(&mut self, key: i64) -> Option<i64> {
        self.entries[key as usize].take()
    }

    fn iter(&self) -> std::vec::IntoIter<(i64, i64)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(key, value)| value.map(|value| (key as i64, value)))
            .collect::<Vec<(i64, i64)>>()
            .into_iter()
    }

    fn slice(&self, low: Bound<i64>, high: Bound<i64>) -> &[Option<i64>] {
        let low = match low {
            Bound::Included(low) => low as usize,
            Bound::Excluded(low) => (low + 1) as usize,
            Bound::Unbounded => 0,
        };
        let high = match high {
            Bound::Included(high) => (high + 1) as usize,
            Bound::Excluded(high) => high as usize,
            Bound::Unbounded => self.entries.len(),
        };
        let ok = low < self.entries.len();
        let ok = ok && (high >= low && high <= self.entries.len());
        if ok {
            &self.entries[low..high]
        } else {
            &self.entries[..0]
        }
    }

    fn range(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<(i64, i64)> {
        let base = match low {
            Bound::Included(low) => low,
            Bound::Excluded(low) => low + 1,
            Bound::Unbounded => 0,
        };
        self.slice(low, high)
            .iter()
            .enumerate()
            .filter_map(|(off, value)| value.map(|value| (base + off as i64, value)))
            .collect::<Vec<(i64, i64)>>()
            .into_iter()
    }

    fn reverse(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<(i64, i64)> {
        let base = match low {
            Bound::Included(low) => low,
            Bound::Excluded(low) => low + 1,
            Bound::Unbounded => 0,
        };
        self.slice(low, high)
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(off, value)| value.map(|value| (base + off as i64, value)))
            .collect::<Vec<(i64, i64)>>()
            .into_iter()
    }
}

fn random_low_high(size: usize) -> (Bound<i64>, Bound<i64>) {
    let size = size as u64;
    let low = (random::<u64>() % size) as i64;
    let high = (random::<u64>() % size) as i64;
    let low = match random::<u8>() % 3 {
        0 => Bound::Included(low),
        1 => Bound::Excluded(low),
        2 => Bound::Unbounded,
        _ => unreachable!(),
    };
    let high = match random::<u8>() % 3 {
        0 => Bound::Included(high),
        1 => Bound::Excluded(high),
        2 => Bound::Unbounded,
        _ => unreachable!(),
    };
    (low, high)
}
