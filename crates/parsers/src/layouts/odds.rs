//! Odds family layouts
//!
//! Every odds record opens with the race header, an announcement stamp, and
//! the field sizes, then carries one repeated element per combination. The
//! element blocks are declared in `Rows` mode: each non-empty element becomes
//! its own output row keyed by horse number (`O1`) or combination (`O2`-`O6`),
//! which is what gives the odds tables their row cardinality.
//!
//! Odds values are stored x10 on the wire (`"0035"` is 3.5).

use crate::layout::{int, scaled, text, BlockMode, BlockSpec, FieldSpec, RecordLayout};

/// O1 - win and place odds, one row per horse
///
/// The win block (28 x 8 bytes) and the place block (28 x 12 bytes) run in
/// horse-number order, so the two `Rows` blocks merge by element index. The
/// legacy bracket-quinella block (36 x 9 bytes at 603) is not materialised;
/// its pool total is kept as a column.
pub static O1: RecordLayout = RecordLayout {
    kind: "O1",
    length: 962,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        int("RaceNum", 25, 2),
        text("HappyoTime", 27, 8),
        int("TorokuTosu", 35, 2),
        int("SyussoTosu", 37, 2),
        text("HatsubaiFlagTan", 39, 1),
        text("HatsubaiFlagFuku", 40, 1),
        text("HatsubaiFlagWakuren", 41, 1),
        text("FukuChakubaraiKey", 42, 1),
        int("TanHyosuTotal", 927, 11),
        int("FukuHyosuTotal", 938, 11),
        int("WakurenHyosuTotal", 949, 11),
    ],
    blocks: &[
        BlockSpec {
            prefix: "",
            offset: 43,
            width: 8,
            count: 28,
            fields: &[
                int("Umaban", 0, 2),
                scaled("TanOdds", 2, 4, 1),
                int("TanNinki", 6, 2),
            ],
            mode: BlockMode::Rows,
        },
        BlockSpec {
            prefix: "",
            offset: 267,
            width: 12,
            count: 28,
            fields: &[
                scaled("FukuOddsLow", 2, 4, 1),
                scaled("FukuOddsHigh", 6, 4, 1),
                int("FukuNinki", 10, 2),
            ],
            mode: BlockMode::Rows,
        },
    ],
};

/// Combination element: 4-digit pair key, odds, popularity
static PAIR_ODDS: &[FieldSpec] = &[
    text("Kumi", 0, 4),
    scaled("Odds", 4, 6, 1),
    int("Ninki", 10, 3),
];

/// Wide pays a range, so its element carries low and high odds
static WIDE_ODDS: &[FieldSpec] = &[
    text("Kumi", 0, 4),
    scaled("OddsLow", 4, 5, 1),
    scaled("OddsHigh", 9, 5, 1),
    int("Ninki", 14, 3),
];

/// Trio element: 6-digit unordered triple key
static TRIO_ODDS: &[FieldSpec] = &[
    text("Kumi", 0, 6),
    scaled("Odds", 6, 6, 1),
    int("Ninki", 12, 3),
];

/// Trifecta element: 6-digit ordered triple, wider odds and popularity
static TRIFECTA_ODDS: &[FieldSpec] = &[
    text("Kumi", 0, 6),
    scaled("Odds", 6, 7, 1),
    int("Ninki", 13, 4),
];

/// O2 - quinella odds, 153 combinations of 13 bytes
pub static O2: RecordLayout = RecordLayout {
    kind: "O2",
    length: 2042,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        int("RaceNum", 25, 2),
        text("HappyoTime", 27, 8),
        int("TorokuTosu", 35, 2),
        int("SyussoTosu", 37, 2),
        text("HatsubaiFlagUmaren", 39, 1),
        int("UmarenHyosuTotal", 2029, 11),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 40,
        width: 13,
        count: 153,
        fields: PAIR_ODDS,
        mode: BlockMode::Rows,
    }],
};

/// O3 - wide odds, 153 combinations of 17 bytes
pub static O3: RecordLayout = RecordLayout {
    kind: "O3",
    length: 2654,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        int("RaceNum", 25, 2),
        text("HappyoTime", 27, 8),
        int("TorokuTosu", 35, 2),
        int("SyussoTosu", 37, 2),
        text("HatsubaiFlagWide", 39, 1),
        int("WideHyosuTotal", 2641, 11),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 40,
        width: 17,
        count: 153,
        fields: WIDE_ODDS,
        mode: BlockMode::Rows,
    }],
};

/// O4 - exacta odds, 306 ordered pairs of 13 bytes
pub static O4: RecordLayout = RecordLayout {
    kind: "O4",
    length: 4031,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        int("RaceNum", 25, 2),
        text("HappyoTime", 27, 8),
        int("TorokuTosu", 35, 2),
        int("SyussoTosu", 37, 2),
        text("HatsubaiFlagUmatan", 39, 1),
        int("UmatanHyosuTotal", 4018, 11),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 40,
        width: 13,
        count: 306,
        fields: PAIR_ODDS,
        mode: BlockMode::Rows,
    }],
};

/// O5 - trio odds, 816 combinations of 15 bytes
pub static O5: RecordLayout = RecordLayout {
    kind: "O5",
    length: 12293,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        int("RaceNum", 25, 2),
        text("HappyoTime", 27, 8),
        int("TorokuTosu", 35, 2),
        int("SyussoTosu", 37, 2),
        text("HatsubaiFlagSanrenpuku", 39, 1),
        int("SanrenpukuHyosuTotal", 12280, 11),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 40,
        width: 15,
        count: 816,
        fields: TRIO_ODDS,
        mode: BlockMode::Rows,
    }],
};

/// O6 - trifecta odds, 4896 ordered triples of 17 bytes
pub static O6: RecordLayout = RecordLayout {
    kind: "O6",
    length: 83285,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        int("RaceNum", 25, 2),
        text("HappyoTime", 27, 8),
        int("TorokuTosu", 35, 2),
        int("SyussoTosu", 37, 2),
        text("HatsubaiFlagSanrentan", 39, 1),
        int("SanrentanHyosuTotal", 83272, 11),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 40,
        width: 17,
        count: 4896,
        fields: TRIFECTA_ODDS,
        mode: BlockMode::Rows,
    }],
};
