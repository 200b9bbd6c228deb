use std::fmt;

use hashbrown::HashMap;

use crate::stats::Summary;
use crate::temperature::Temperature;

/// Per-station running statistics, keyed by the raw station bytes.
#[derive(Debug)]
pub struct WeatherMap<T: Temperature> {
    data: HashMap<Box<[u8]>, T::Summary>,
}

impl<T: Temperature> WeatherMap<T> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    #[inline(always)]
    pub fn update(&mut self, station: &[u8], temperature: T) {
        match self.data.get_mut(station) {
            Some(summary) => summary.update(temperature),
            None => {
                let summary = <T::Summary as Summary<T>>::new(temperature);
                self.data.insert(station.into(), summary);
            }
        }
    }

    pub fn get(&self, station: &[u8]) -> Option<&T::Summary> {
        self.data.get(station)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entries in byte-wise ascending station order.
    pub fn entries(&self) -> Vec<(&[u8], &T::Summary)> {
        let mut entries: Vec<_> = self
            .data
            .iter()
            .map(|(name, summary)| (&name[..], summary))
            .collect();

        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }
}

impl<T: Temperature> Default for WeatherMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Temperature> fmt::Display for WeatherMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;

        for (i, (name, summary)) in self.entries().into_iter().enumerate() {
            let separator = if i != 0 { ", " } else { "" };
            let name = String::from_utf8_lossy(name);
            write!(f, "{separator}{name}={summary}")?;
        }

        write!(f, "}}")
    }
}
