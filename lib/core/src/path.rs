//! Result paths
//!
//! A result path tells the extractor how to descend from the response root to
//! the collection of result fragments, e.g. `hits/hits/_source`.

use ahash::AHashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Parsed descent instructions for locating fragments in a response
///
/// Always holds at least one non-empty segment. The first segment is the root
/// key, the last one (when there are two or more) is the source key read from
/// each located container, and anything in between is walked as nested objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultPath {
    segments: SmallVec<[String; 4]>,
}

impl ResultPath {
    pub const SEPARATOR: char = '/';

    /// Resolve an optional path specification.
    ///
    /// Returns `None` when there is no specification or it holds no segments,
    /// meaning the whole document is the single fragment.
    pub fn resolve(spec: Option<&str>) -> Option<Self> {
        spec.and_then(Self::parse)
    }

    /// Split a path specification on [`Self::SEPARATOR`], dropping empty segments
    pub fn parse(spec: &str) -> Option<Self> {
        let segments: SmallVec<[String; 4]> = spec
            .split(Self::SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn root_key(&self) -> &str {
        &self.segments[0]
    }

    /// Key read from each located container, `None` for single-segment paths
    #[inline]
    pub fn source_key(&self) -> Option<&str> {
        if self.segments.len() > 1 {
            self.segments.last().map(String::as_str)
        } else {
            None
        }
    }

    /// Segments walked between the root key and the source key
    #[inline]
    pub fn intermediate(&self) -> &[String] {
        if self.segments.len() > 2 {
            &self.segments[1..self.segments.len() - 1]
        } else {
            &[]
        }
    }
}

impl fmt::Display for ResultPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", Self::SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Insert-once, read-many cache of parsed paths keyed by specification string
#[derive(Debug, Default)]
pub struct PathCache {
    paths: RwLock<AHashMap<String, Arc<ResultPath>>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, spec: Option<&str>) -> Option<Arc<ResultPath>> {
        let spec = spec?;

        if let Some(path) = self.paths.read().get(spec) {
            return Some(path.clone());
        }

        let parsed = Arc::new(ResultPath::parse(spec)?);
        tracing::debug!(path = spec, "caching result path");

        let mut paths = self.paths.write();
        Some(paths.entry(spec.to_string()).or_insert(parsed).clone())
    }

    pub fn len(&self) -> usize {
        self.paths.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.read().is_empty()
    }

    pub fn clear(&self) {
        self.paths.write().clear();
    }
}
