//! Schedule, registration, course, record, mining, and carryover layouts

use crate::layout::{int, scaled, text, BlockMode, BlockSpec, RecordLayout};

/// YS - meeting schedule (one record per venue day)
pub static YS: RecordLayout = RecordLayout {
    kind: "YS",
    length: 382,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        text("YoubiCD", 25, 1),
    ],
    blocks: &[
        // Graded races announced for the day, up to three
        BlockSpec {
            prefix: "Jyusyo",
            offset: 26,
            width: 118,
            count: 3,
            fields: &[
                text("TokuNum", 0, 4),
                text("Hondai", 4, 60),
                text("Ryakusyo10", 64, 20),
                text("Ryakusyo6", 84, 12),
                text("Ryakusyo3", 96, 6),
                int("Nkai", 102, 3),
                text("GradeCD", 105, 1),
                text("SyubetuCD", 106, 2),
                text("KigoCD", 108, 3),
                text("JyuryoCD", 111, 1),
                int("Kyori", 112, 4),
                text("TrackCD", 116, 2),
            ],
            mode: BlockMode::Flatten,
        },
    ],
};

/// TK - special race registrations, one row per registered horse
pub static TK: RecordLayout = RecordLayout {
    kind: "TK",
    length: 21657,
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
        text("YoubiCD", 27, 1),
        text("TokuNum", 28, 4),
        text("Hondai", 32, 60),
        text("Fukudai", 92, 60),
        text("Kakko", 152, 60),
        text("HondaiEng", 212, 120),
        text("FukudaiEng", 332, 120),
        text("KakkoEng", 452, 120),
        text("Ryakusyo10", 572, 20),
        text("Ryakusyo6", 592, 12),
        text("Ryakusyo3", 604, 6),
        text("Kubun", 610, 1),
        int("Nkai", 611, 3),
        text("GradeCD", 614, 1),
        text("SyubetuCD", 615, 2),
        text("KigoCD", 617, 3),
        text("JyuryoCD", 620, 1),
        text("JyokenCD1", 621, 3),
        text("JyokenCD2", 624, 3),
        text("JyokenCD3", 627, 3),
        text("JyokenCD4", 630, 3),
        text("JyokenCD5", 633, 3),
        int("Kyori", 636, 4),
        text("TrackCD", 640, 2),
        text("CourseKubunCD", 642, 2),
        text("HandeDate", 644, 8),
        int("TorokuTosu", 652, 3),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 655,
        width: 70,
        count: 300,
        fields: &[
            int("Num", 0, 3),
            text("KettoNum", 3, 10),
            text("Bamei", 13, 36),
            text("UmaKigoCD", 49, 2),
            text("SexCD", 51, 1),
            text("TozaiCD", 52, 1),
            text("ChokyosiCode", 53, 5),
            text("ChokyosiRyakusyo", 58, 8),
            scaled("Futan", 66, 3, 1),
            text("Koryu", 69, 1),
        ],
        mode: BlockMode::Rows,
    }],
};

/// CS - course description master
pub static CS: RecordLayout = RecordLayout {
    kind: "CS",
    length: 6829,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("JyoCD", 11, 2),
        int("Kyori", 13, 4),
        text("TrackCD", 17, 2),
        text("KaishuDate", 19, 8),
        text("Description", 27, 6800),
    ],
    blocks: &[],
};

/// RC - course/race record holders
pub static RC: RecordLayout = RecordLayout {
    kind: "RC",
    length: 501,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("RecordKubunID", 11, 1),
        int("Year", 12, 4),
        int("MonthDay", 16, 4),
        text("JyoCD", 20, 2),
        int("Kaiji", 22, 2),
        int("Nichiji", 24, 2),
        int("RaceNum", 26, 2),
        text("TokuNum", 28, 4),
        text("Hondai", 32, 60),
        text("GradeCD", 92, 1),
        text("SyubetuCD", 93, 2),
        int("Kyori", 95, 4),
        text("TrackCD", 99, 2),
        text("RecordKubun", 101, 1),
        scaled("RecordTime", 102, 4, 1),
        text("TenkoCD", 106, 1),
        text("SibaBabaCD", 107, 1),
        text("DirtBabaCD", 108, 1),
    ],
    blocks: &[
        // Joint record holders, up to three
        BlockSpec {
            prefix: "Holder",
            offset: 109,
            width: 130,
            count: 3,
            fields: &[
                text("KettoNum", 0, 10),
                text("Bamei", 10, 36),
                text("UmaKigoCD", 46, 2),
                text("SexCD", 48, 1),
                text("ChokyosiCode", 49, 5),
                text("ChokyosiName", 54, 34),
                scaled("Futan", 88, 3, 1),
                text("KisyuCode", 91, 5),
                text("KisyuName", 96, 34),
            ],
            mode: BlockMode::Flatten,
        },
    ],
};

/// DM - mining forecast (predicted time per runner), one row per horse
pub static DM: RecordLayout = RecordLayout {
    kind: "DM",
    length: 303,
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
        text("MakeHM", 27, 4),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 31,
        width: 15,
        count: 18,
        fields: &[
            int("Umaban", 0, 2),
            scaled("DMTime", 2, 5, 1),
            scaled("DMGosaP", 7, 4, 1),
            scaled("DMGosaM", 11, 4, 1),
        ],
        mode: BlockMode::Rows,
    }],
};

/// TM - match-up mining score, one row per horse
pub static TM: RecordLayout = RecordLayout {
    kind: "TM",
    length: 141,
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
        text("MakeHM", 27, 4),
    ],
    blocks: &[BlockSpec {
        prefix: "",
        offset: 31,
        width: 6,
        count: 18,
        fields: &[int("Umaban", 0, 2), scaled("TMScore", 2, 4, 1)],
        mode: BlockMode::Rows,
    }],
};

/// WF - five-race carryover pool (one record per pool day)
pub static WF: RecordLayout = RecordLayout {
    kind: "WF",
    length: 7215,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        int("HatsubaiHyosu", 67, 11),
        text("HenkanFlag", 133, 1),
        text("FuseirituFlag", 134, 1),
        text("TekichuNashiFlag", 135, 1),
        int("CarryoverInit", 136, 15),
        int("CarryoverZandaka", 151, 15),
    ],
    blocks: &[
        // The five target races of the pool
        BlockSpec {
            prefix: "Target",
            offset: 21,
            width: 8,
            count: 5,
            fields: &[
                text("JyoCD", 0, 2),
                int("Kaiji", 2, 2),
                int("Nichiji", 4, 2),
                int("RaceNum", 6, 2),
            ],
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Yuko",
            offset: 78,
            width: 11,
            count: 5,
            fields: &[int("Hyosu", 0, 11)],
            mode: BlockMode::Flatten,
        },
        // Winning combinations; the full 243-entry grid stays unmaterialised
        BlockSpec {
            prefix: "Pay",
            offset: 166,
            width: 29,
            count: 3,
            fields: &[
                text("Kumi", 0, 10),
                int("Pay", 10, 9),
                int("TekichuHyosu", 19, 10),
            ],
            mode: BlockMode::Flatten,
        },
    ],
};
