use std::collections::HashMap;

/// Holiday dates (`YYYY-MM-DD`) keyed by year.
///
/// Entries are inserted once and never evicted or refreshed, so a year keeps
/// whatever list it was first populated with for the lifetime of the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCache {
    years: HashMap<isize, Vec<String>>,
}

impl HolidayCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, year: isize) -> Option<&[String]> {
        self.years.get(&year).map(Vec::as_slice)
    }

    #[inline]
    pub fn contains(&self, year: isize) -> bool {
        self.years.contains_key(&year)
    }

    /// Stores `dates` under `year` unless the year is already present, and
    /// returns the stored list.
    pub fn insert(&mut self, year: isize, dates: Vec<String>) -> &[String] {
        self.years.entry(year).or_insert(dates)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Cached years in ascending order.
    pub fn years(&self) -> Vec<isize> {
        let mut years: Vec<_> = self.years.keys().copied().collect();
        years.sort_unstable();
        years
    }
}
