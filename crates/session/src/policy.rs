//! Feed-local session policy

use std::time::Duration;

use umalink_parsers::Feed;

/// Vendor quirks that differ between the two feeds
///
/// Everything feed-specific the manager needs is concentrated here so the
/// state machine itself stays feed-agnostic.
#[derive(Debug, Clone)]
pub struct FeedPolicy {
    feed: Feed,
}

impl FeedPolicy {
    pub fn new(feed: Feed) -> Self {
        Self { feed }
    }

    #[inline]
    pub fn feed(&self) -> Feed {
        self.feed
    }

    /// The init key actually passed to `initialise`
    ///
    /// The regional component only accepts the literal string `UNKNOWN`;
    /// anything else is rejected with the auth error code.
    pub fn init_key<'a>(&self, service_key: &'a str) -> &'a str {
        match self.feed {
            Feed::Central => service_key,
            Feed::Regional => "UNKNOWN",
        }
    }

    /// Remap the `open` option for this feed
    ///
    /// The regional component documents options 3/4 where the central one
    /// documents 1/2; the remap lives here (and only here) pending a vendor
    /// documentation clarification.
    pub fn remap_option(&self, option: i32) -> i32 {
        match (self.feed, option) {
            (Feed::Regional, 1) => 3,
            (Feed::Regional, 2) => 4,
            _ => option,
        }
    }

    /// Wait before reopening after a `-502`/`-503`
    ///
    /// The regional servers need about ten seconds before they accept a new
    /// session; the central ones recover faster.
    pub fn reopen_wait(&self) -> Duration {
        match self.feed {
            Feed::Central => Duration::from_secs(5),
            Feed::Regional => Duration::from_secs(10),
        }
    }

    /// Default chunking of a historical date range, in days
    ///
    /// The regional feed buffers a whole session's files in memory, so
    /// backfill runs one session per day there.
    pub fn default_chunk_days(&self) -> u32 {
        match self.feed {
            Feed::Central => 30,
            Feed::Regional => 1,
        }
    }

    /// Whether `download_count` reaching zero is the completion oracle
    ///
    /// The regional feed reports "server busy" every 15-20 files; over
    /// successive reopens its announced download count shrinks because
    /// earlier files are cached. Completion is "nothing left to download",
    /// not "one clean pass".
    pub fn download_count_oracle(&self) -> bool {
        matches!(self.feed, Feed::Regional)
    }
}
