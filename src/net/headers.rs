//! Ordered header list.
//!
//! Unlike `http::HeaderMap`, a [`HeaderList`] keeps every header as a
//! separate `(name, value)` entry in insertion order. Duplicate names are
//! kept as distinct entries and are never merged. Lookups compare names
//! ASCII case-insensitively, but the original casing is preserved for
//! serialization.
//!
//! A list built from an `http::HeaderMap` can only be as ordered as the map:
//! `HeaderMap` groups values by name, so the order *between* different names
//! is the map's key order, not the wire order. Values of one name keep their
//! relative order.
//!
//! Names and values are raw byte sequences. No validation is done here; the
//! network layer is expected to hand over well-formed header bytes.
use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::errors::FetchError;

/// A single response header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl Header {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns true when this header's name matches `name`, ignoring ASCII case.
    pub fn has_name(&self, name: &[u8]) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Ordered list of headers. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    headers: Vec<Header>,
}

impl HeaderList {
    pub const fn new() -> Self {
        Self { headers: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.headers.iter()
    }

    /// Appends a header at the end of the list.
    pub fn append(&mut self, header: Header) {
        self.headers.push(header);
    }

    /// Appends a header, reporting allocation failure instead of aborting.
    pub fn try_append(&mut self, header: Header) -> Result<(), FetchError> {
        self.headers.try_reserve(1)?;
        self.headers.push(header);
        Ok(())
    }

    /// Returns true if at least one header is named `name`.
    pub fn contains(&self, name: &[u8]) -> bool {
        self.headers.iter().any(|h| h.has_name(name))
    }

    /// Value of the first header named `name`.
    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|h| h.has_name(name))
            .map(|h| h.value.as_slice())
    }

    /// All values for `name`, in list order.
    pub fn get_all<'a>(&'a self, name: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.has_name(name))
            .map(|h| h.value.as_slice())
    }

    /// Converts into an `http::HeaderMap`.
    ///
    /// Entries that `http` refuses (invalid names or values) are skipped with
    /// a warning; everything else keeps its order within a name.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for header in &self.headers {
            let name = match HeaderName::from_bytes(&header.name) {
                Ok(name) => name,
                Err(e) => {
                    log::warn!(
                        "Skipping header with invalid name {:?}: {}",
                        String::from_utf8_lossy(&header.name),
                        e
                    );
                    continue;
                }
            };
            match HeaderValue::from_bytes(&header.value) {
                Ok(value) => {
                    map.append(name, value);
                }
                Err(e) => log::warn!("Skipping header {} with invalid value: {}", name, e),
            }
        }
        map
    }
}

/// Entries come out grouped by name, in the map's iteration order.
impl From<&HeaderMap> for HeaderList {
    fn from(map: &HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| Header::new(name.as_str(), value.as_bytes()))
            .collect()
    }
}

impl FromIterator<Header> for HeaderList {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        Self {
            headers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl IntoIterator for HeaderList {
    type Item = Header;
    type IntoIter = std::vec::IntoIter<Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

/// Returns the value of the first header named `name` in `list`, if any.
pub fn extract_header_value<'a>(list: &'a HeaderList, name: &[u8]) -> Option<&'a [u8]> {
    list.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(pairs: &[(&str, &str)]) -> HeaderList {
        pairs.iter().map(|(n, v)| Header::new(*n, *v)).collect()
    }

    #[test]
    fn lookup_is_case_insensitive_and_first_wins() {
        let l = list(&[("Location", "/a"), ("location", "/b"), ("Content-Type", "text/html")]);
        assert_eq!(l.get(b"LOCATION"), Some(&b"/a"[..]));
        assert_eq!(extract_header_value(&l, b"location"), Some(&b"/a"[..]));
        assert_eq!(l.get(b"content-type"), Some(&b"text/html"[..]));
        assert_eq!(l.get(b"x-missing"), None);
        assert!(l.contains(b"CONTENT-TYPE"));
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let mut l = HeaderList::new();
        l.append(Header::new("Vary", "Accept"));
        l.try_append(Header::new("X-A", "1")).unwrap();
        l.append(Header::new("vary", "Origin"));

        assert_eq!(l.len(), 3);
        let values: Vec<&[u8]> = l.get_all(b"Vary").collect();
        assert_eq!(values, vec![&b"Accept"[..], &b"Origin"[..]]);

        let names: Vec<&[u8]> = l.iter().map(|h| h.name.as_slice()).collect();
        assert_eq!(names, vec![&b"Vary"[..], &b"X-A"[..], &b"vary"[..]]);
    }

    #[test]
    fn header_map_round_trip_keeps_duplicates() {
        let mut map = HeaderMap::new();
        map.append("set-cookie", HeaderValue::from_static("a=1"));
        map.append("set-cookie", HeaderValue::from_static("b=2"));
        map.insert("content-type", HeaderValue::from_static("text/plain"));

        let l = HeaderList::from(&map);
        assert_eq!(l.len(), 3);
        assert_eq!(l.get_all(b"Set-Cookie").count(), 2);

        let back = l.to_header_map();
        assert_eq!(back.get_all("set-cookie").iter().count(), 2);
        assert_eq!(back.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn header_map_conversion_groups_values_by_name() {
        let mut map = HeaderMap::new();
        map.append("x-a", HeaderValue::from_static("1"));
        map.append("x-b", HeaderValue::from_static("2"));
        map.append("x-a", HeaderValue::from_static("3"));

        let l = HeaderList::from(&map);
        let pairs: Vec<(&[u8], &[u8])> = l.iter().map(|h| (h.name.as_slice(), h.value.as_slice())).collect();
        assert_eq!(
            pairs,
            vec![
                (&b"x-a"[..], &b"1"[..]),
                (&b"x-a"[..], &b"3"[..]),
                (&b"x-b"[..], &b"2"[..]),
            ]
        );
    }

    #[test]
    fn invalid_entries_are_skipped_when_converting() {
        let l = list(&[("bad name", "x"), ("X-Ok", "fine")]);
        let mut with_bad_value = l.clone();
        with_bad_value.append(Header::new("X-Newline", "a\nb"));

        let map = with_bad_value.to_header_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x-ok").unwrap(), "fine");
    }
}
