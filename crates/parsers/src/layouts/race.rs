//! Race definition and race-scoped notice layouts
//!
//! All kinds here share the common race header: RecordSpec(0,2),
//! DataKubun(2,1), MakeDate(3,8), then the six race-identity fields
//! Year/MonthDay/JyoCD/Kaiji/Nichiji/RaceNum ending at offset 27.

use crate::layout::{int, scaled, text, BlockMode, BlockSpec, FieldSpec, RecordLayout};

/// RA - race definition
///
/// Names, grading, course, prize money, result summary, lap times, and
/// corner passing orders for one race.
pub static RA: RecordLayout = RecordLayout {
    kind: "RA",
    length: 1272,
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
        text("GradeCDBefore", 615, 1),
        text("SyubetuCD", 616, 2),
        text("KigoCD", 618, 3),
        text("JyuryoCD", 621, 1),
        text("JyokenCD1", 622, 3),
        text("JyokenCD2", 625, 3),
        text("JyokenCD3", 628, 3),
        text("JyokenCD4", 631, 3),
        text("JyokenCD5", 634, 3),
        text("JyokenName", 637, 60),
        int("Kyori", 697, 4),
        int("KyoriBefore", 701, 4),
        text("TrackCD", 705, 2),
        text("TrackCDBefore", 707, 2),
        text("CourseKubunCD", 709, 2),
        text("CourseKubunCDBefore", 711, 2),
        text("HassoTime", 873, 4),
        text("HassoTimeBefore", 877, 4),
        int("TorokuTosu", 881, 2),
        int("SyussoTosu", 883, 2),
        int("NyusenTosu", 885, 2),
        text("TenkoCD", 887, 1),
        text("SibaBabaCD", 888, 1),
        text("DirtBabaCD", 889, 1),
        scaled("SyogaiMileTime", 965, 4, 1),
        scaled("HaronTimeS3", 969, 3, 1),
        scaled("HaronTimeS4", 972, 3, 1),
        scaled("HaronTimeL3", 975, 3, 1),
        scaled("HaronTimeL4", 978, 3, 1),
        text("RecordUpKubun", 1269, 1),
    ],
    blocks: &[
        // Prize money, winner through seventh place
        BlockSpec {
            prefix: "Honsyokin",
            offset: 713,
            width: 8,
            count: 7,
            fields: PRIZE,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "HonsyokinBefore",
            offset: 769,
            width: 8,
            count: 5,
            fields: PRIZE,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Fukasyokin",
            offset: 809,
            width: 8,
            count: 5,
            fields: PRIZE,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "FukasyokinBefore",
            offset: 849,
            width: 8,
            count: 3,
            fields: PRIZE,
            mode: BlockMode::Flatten,
        },
        // 200m lap times, stored x10
        BlockSpec {
            prefix: "Lap",
            offset: 890,
            width: 3,
            count: 25,
            fields: &[scaled("Time", 0, 3, 1)],
            mode: BlockMode::Flatten,
        },
        // Corner passing order, four corners
        BlockSpec {
            prefix: "",
            offset: 981,
            width: 72,
            count: 4,
            fields: &[
                int("CornerCD", 0, 1),
                int("CornerSyukaisu", 1, 1),
                text("CornerJyuni", 2, 70),
            ],
            mode: BlockMode::Flatten,
        },
    ],
};

/// Single unnamed prize amount inside a flattened prize block
static PRIZE: &[FieldSpec] = &[int("", 0, 8)];

/// WE - weather and going change notice (per venue day)
pub static WE: RecordLayout = RecordLayout {
    kind: "WE",
    length: 42,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        text("HappyoTime", 25, 8),
        text("HenkoID", 33, 1),
        text("TenkoCD", 34, 1),
        text("SibaBabaCD", 35, 1),
        text("DirtBabaCD", 36, 1),
        text("TenkoCDBefore", 37, 1),
        text("SibaBabaCDBefore", 38, 1),
        text("DirtBabaCDBefore", 39, 1),
    ],
    blocks: &[],
};

/// WH - going report (per venue day, announced before the first race)
pub static WH: RecordLayout = RecordLayout {
    kind: "WH",
    length: 42,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        int("Year", 11, 4),
        int("MonthDay", 15, 4),
        text("JyoCD", 19, 2),
        int("Kaiji", 21, 2),
        int("Nichiji", 23, 2),
        text("HappyoTime", 25, 8),
        text("HenkoID", 33, 1),
        text("TenkoCD", 34, 1),
        text("SibaBabaCD", 35, 1),
        text("DirtBabaCD", 36, 1),
        text("TenkoCDBefore", 37, 1),
        text("SibaBabaCDBefore", 38, 1),
        text("DirtBabaCDBefore", 39, 1),
    ],
    blocks: &[],
};

/// CC - course change notice
pub static CC: RecordLayout = RecordLayout {
    kind: "CC",
    length: 50,
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
        int("KyoriAfter", 35, 4),
        text("TrackCDAfter", 39, 2),
        int("KyoriBefore", 41, 4),
        text("TrackCDBefore", 45, 2),
        text("JiyuCD", 47, 1),
    ],
    blocks: &[],
};

/// TC - start time change notice
pub static TC: RecordLayout = RecordLayout {
    kind: "TC",
    length: 45,
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
        text("HassoTimeAfter", 35, 4),
        text("HassoTimeBefore", 39, 4),
    ],
    blocks: &[],
};

/// JC - jockey change notice
pub static JC: RecordLayout = RecordLayout {
    kind: "JC",
    length: 161,
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
        int("Umaban", 35, 2),
        text("Bamei", 37, 36),
        scaled("FutanAfter", 73, 3, 1),
        text("KisyuCodeAfter", 76, 5),
        text("KisyuNameAfter", 81, 34),
        text("MinaraiCDAfter", 115, 1),
        scaled("FutanBefore", 116, 3, 1),
        text("KisyuCodeBefore", 119, 5),
        text("KisyuNameBefore", 124, 34),
        text("MinaraiCDBefore", 158, 1),
    ],
    blocks: &[],
};

/// AV - scratch (start cancellation) notice
pub static AV: RecordLayout = RecordLayout {
    kind: "AV",
    length: 76,
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
        int("Umaban", 35, 2),
        text("Bamei", 37, 36),
        text("JiyuCD", 73, 1),
    ],
    blocks: &[],
};

/// JG - race exclusion (over-subscription ballot) notice
pub static JG: RecordLayout = RecordLayout {
    kind: "JG",
    length: 80,
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
        text("KettoNum", 27, 10),
        text("Bamei", 37, 36),
        int("UketukeJyuni", 73, 3),
        text("SyussoKubun", 76, 1),
        text("JogaiJotaiKubun", 77, 1),
    ],
    blocks: &[],
};
