use fnv::FnvHashMap;
use indexmap::IndexMap;

use super::IntoHeaderValues;

/// HTTP Headers Multimap.
///
/// Lookup is case-insensitive, while the casing of the name used to store an entry is preserved
/// for iteration. Entries iterate in insertion order, which is also significant for equality.
#[derive(Clone, Default)]
pub struct HeaderMap {
    entries: IndexMap<String, Vec<String>>,
    /// lowercased name to stored name
    names: FnvHashMap<String, String>,
}

impl HeaderMap {
    /// Create new empty [`HeaderMap`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of header names.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there is no header.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the map contains a header with given name, case-insensitively.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_ascii_lowercase())
    }

    /// Returns the casing the header is stored under.
    #[inline]
    pub fn stored_name(&self, name: &str) -> Option<&str> {
        self.names.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns all values of a header, empty if the header is absent.
    pub fn get(&self, name: &str) -> &[String] {
        match self.stored_name(name) {
            Some(stored) => self.entries.get(stored).map(Vec::as_slice).unwrap_or_default(),
            None => &[],
        }
    }

    /// Returns all values of a header joined by `,`, empty if the header is absent.
    #[inline]
    pub fn get_line(&self, name: &str) -> String {
        self.get(name).join(",")
    }

    /// Returns an iterator over stored names and their values.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter { iter: self.entries.iter() }
    }

    /// Replace a header case-insensitively.
    ///
    /// The entry is stored under the casing of `name`, at the end of iteration order. Returns the
    /// previous values, if any.
    pub fn insert<V: IntoHeaderValues>(&mut self, name: &str, values: V) -> Option<Vec<String>> {
        let old = self.remove(name);
        self.names.insert(name.to_ascii_lowercase(), name.to_owned());
        self.entries.insert(name.to_owned(), values.into_header_values());
        old
    }

    /// Replace a header case-insensitively, placing it first in iteration order.
    pub fn insert_first<V: IntoHeaderValues>(&mut self, name: &str, values: V) -> Option<Vec<String>> {
        let old = self.remove(name);
        self.names.insert(name.to_ascii_lowercase(), name.to_owned());
        self.entries.shift_insert(0, name.to_owned(), values.into_header_values());
        old
    }

    /// Append values to a header.
    ///
    /// If the header already exists, values are added under its stored casing, otherwise this
    /// behaves like [`insert`][HeaderMap::insert].
    pub fn append<V: IntoHeaderValues>(&mut self, name: &str, values: V) {
        let lower = name.to_ascii_lowercase();
        match self.names.get(&lower).and_then(|stored| self.entries.get_mut(stored)) {
            Some(current) => current.extend(values.into_header_values()),
            None => {
                self.names.insert(lower, name.to_owned());
                self.entries.insert(name.to_owned(), values.into_header_values());
            }
        }
    }

    /// Remove a header case-insensitively, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let stored = self.names.remove(&name.to_ascii_lowercase())?;
        self.entries.shift_remove(&stored)
    }

    /// Remove all headers.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.names.clear();
    }
}

impl<N: AsRef<str>, V: IntoHeaderValues> Extend<(N, V)> for HeaderMap {
    /// Same name in different casing is merged under the first seen casing.
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        for (name, values) in iter {
            self.append(name.as_ref(), values);
        }
    }
}

impl<N: AsRef<str>, V: IntoHeaderValues> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut map = HeaderMap::new();
        map.extend(iter);
        map
    }
}

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for HeaderMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for HeaderMap {}

impl std::fmt::Debug for HeaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ===== Iterator =====

/// [`HeaderMap`] iterator.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    iter: indexmap::map::Iter<'a, String, Vec<String>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> { }
