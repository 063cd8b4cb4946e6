//! Vote count layouts
//!
//! `H1` carries all single-race pools; the per-horse win/place vote blocks
//! expand to rows, the combination pools keep their totals as columns. `H6`
//! is the trifecta vote record and expands fully (4896 combinations).

use crate::layout::{int, text, BlockMode, BlockSpec, FieldSpec, RecordLayout};

static FLAG: &[FieldSpec] = &[int("", 0, 1)];

/// H1 - win/place/bracket and combination pool votes, one row per horse
pub static H1: RecordLayout = RecordLayout {
    kind: "H1",
    length: 28955,
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
        int("TorokuTosu", 27, 2),
        int("SyussoTosu", 29, 2),
        text("FukuChakubaraiKey", 38, 1),
        int("TanHyosuTotal", 28799, 11),
        int("FukuHyosuTotal", 28810, 11),
        int("WakurenHyosuTotal", 28821, 11),
        int("UmarenHyosuTotal", 28832, 11),
        int("WideHyosuTotal", 28843, 11),
        int("UmatanHyosuTotal", 28854, 11),
        int("SanrenpukuHyosuTotal", 28865, 11),
        int("TanHenkanTotal", 28876, 11),
        int("FukuHenkanTotal", 28887, 11),
        int("WakurenHenkanTotal", 28898, 11),
        int("UmarenHenkanTotal", 28909, 11),
        int("WideHenkanTotal", 28920, 11),
        int("UmatanHenkanTotal", 28931, 11),
        int("SanrenpukuHenkanTotal", 28942, 11),
    ],
    blocks: &[
        BlockSpec {
            prefix: "HatsubaiFlag",
            offset: 31,
            width: 1,
            count: 7,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "HenkanUmaban",
            offset: 39,
            width: 1,
            count: 28,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "HenkanWakuban",
            offset: 67,
            width: 1,
            count: 8,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "HenkanDowaku",
            offset: 75,
            width: 1,
            count: 8,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        // Win votes per horse; merges with the place block below by index
        BlockSpec {
            prefix: "",
            offset: 83,
            width: 15,
            count: 28,
            fields: &[
                int("Umaban", 0, 2),
                int("TanHyosu", 2, 11),
                int("TanNinki", 13, 2),
            ],
            mode: BlockMode::Rows,
        },
        BlockSpec {
            prefix: "",
            offset: 503,
            width: 15,
            count: 28,
            fields: &[int("FukuHyosu", 2, 11), int("FukuNinki", 13, 2)],
            mode: BlockMode::Rows,
        },
    ],
};

/// H6 - trifecta votes, one row per ordered triple
pub static H6: RecordLayout = RecordLayout {
    kind: "H6",
    length: 102890,
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
        int("TorokuTosu", 27, 2),
        int("SyussoTosu", 29, 2),
        text("HatsubaiFlagSanrentan", 31, 1),
        int("SanrentanHyosuTotal", 102866, 11),
        int("SanrentanHenkanTotal", 102877, 11),
    ],
    blocks: &[
        BlockSpec {
            prefix: "HenkanUmaban",
            offset: 32,
            width: 1,
            count: 18,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "",
            offset: 50,
            width: 21,
            count: 4896,
            fields: &[
                text("Kumi", 0, 6),
                int("Hyosu", 6, 11),
                int("Ninki", 17, 4),
            ],
            mode: BlockMode::Rows,
        },
    ],
};
