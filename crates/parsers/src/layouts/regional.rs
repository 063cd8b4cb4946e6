//! Regional-feed-only layouts
//!
//! The regional feed shares every central layout; these three kinds exist
//! only there. The regional payout record differs structurally from the
//! central one: instead of per-pool named hit slots it carries a run of
//! 15-byte `{Kumi, Pay}` entries with blank separator entries between pools.

use crate::layout::{int, text, BlockMode, BlockSpec, RecordLayout};

/// HA - regional payout record, one row per non-blank entry
///
/// Blank (all-space) elements are pool separators and are skipped by row
/// expansion; all-zero keys (pool totals) are treated as padding too.
pub static HA: RecordLayout = RecordLayout {
    kind: "HA",
    length: 1032,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("KaisaiDate", 11, 8),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        int("RaceNum", 25, 2),
        int("TorokuTosu", 27, 2),
        int("SyussoTosu", 29, 2),
        text("HatsubaiFlag", 31, 1),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 63,
        width: 15,
        count: 64,
        fields: &[text("Kumi", 0, 2), int("Pay", 2, 13)],
        mode: BlockMode::Rows,
    }],
};

/// NC - regional track master
pub static NC: RecordLayout = RecordLayout {
    kind: "NC",
    length: 145,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("JyoCD", 11, 2),
        text("JyoName", 13, 20),
        text("JyoRyakusyo", 33, 20),
        text("JyoNameEng", 53, 40),
        text("Address", 93, 40),
        text("TelNum", 133, 10),
    ],
    blocks: &[],
};

/// NU - regional horse registration
///
/// A short fixed record without the usual data-class byte; the vendor ships
/// it inside the regional master family.
pub static NU: RecordLayout = RecordLayout {
    kind: "NU",
    length: 64,
    fields: &[
        text("RecordSpec", 0, 2),
        text("UmaID", 2, 10),
        text("TorokuNum", 12, 10),
        text("BirthDate", 38, 8),
        text("Bamei", 46, 18),
    ],
    blocks: &[],
};
