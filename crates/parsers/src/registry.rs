//! Parser registry - (feed, kind) → layout lookup
//!
//! The registry is compiled once at startup, the same way the routing table
//! is: all allocation happens in `new()`, lookup on the record path is a
//! single `HashMap` probe.

use std::collections::HashMap;

use umalink_codec::RecordBuffer;

use crate::layouts;
use crate::{ParseError, ParsedRecord, RecordLayout, Result};

/// Which vendor feed a session talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    /// Central racing feed
    Central,
    /// Regional racing feed (same wire layouts plus three extra kinds)
    Regional,
}

impl Feed {
    /// Stable lowercase name for logs and table routing
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Feed::Central => "central",
            Feed::Regional => "regional",
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registry of record layouts keyed by kind tag
#[derive(Debug)]
pub struct ParserRegistry {
    central: HashMap<&'static str, &'static RecordLayout>,
    regional: HashMap<&'static str, &'static RecordLayout>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserRegistry {
    /// Build the registry with every known layout
    pub fn new() -> Self {
        let mut central = HashMap::with_capacity(layouts::CENTRAL.len());
        for layout in layouts::CENTRAL {
            central.insert(layout.kind, *layout);
        }

        // Regional shares the central layouts; a kind would get its own
        // regional instance here only if its byte layout actually diverged.
        let mut regional = central.clone();
        for layout in layouts::REGIONAL_ONLY {
            regional.insert(layout.kind, *layout);
        }

        Self { central, regional }
    }

    /// Look up the layout for a kind under the given feed
    pub fn layout(&self, feed: Feed, kind: &str) -> Option<&'static RecordLayout> {
        match feed {
            Feed::Central => self.central.get(kind).copied(),
            Feed::Regional => self.regional.get(kind).copied(),
        }
    }

    /// All kinds known to a feed
    pub fn kinds(&self, feed: Feed) -> Vec<&'static str> {
        let map = match feed {
            Feed::Central => &self.central,
            Feed::Regional => &self.regional,
        };
        let mut kinds: Vec<_> = map.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Parse one record buffer into output rows
    ///
    /// # Errors
    ///
    /// - `UnknownKind` when the tag is not registered for `feed`
    /// - `BufferTooShort` when the buffer is shorter than the layout
    /// - `BadKindTag` when the first two bytes are not ASCII
    pub fn parse(&self, feed: Feed, buffer: &RecordBuffer) -> Result<Vec<ParsedRecord>> {
        let kind = buffer.kind()?;
        let layout = self
            .layout(feed, kind)
            .ok_or_else(|| ParseError::unknown_kind(kind, feed.as_str()))?;
        layout.parse(buffer.bytes())
    }
}
