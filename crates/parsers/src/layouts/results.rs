//! Runner result and payout layouts

use crate::layout::{int, scaled, text, BlockMode, BlockSpec, FieldSpec, RecordLayout};

/// SE - per-runner race result
///
/// One record per horse per race: identity, connections, carried weight,
/// finishing position, time, odds, and the mining forecast block.
pub static SE: RecordLayout = RecordLayout {
    kind: "SE",
    length: 555,
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
        int("Wakuban", 27, 1),
        int("Umaban", 28, 2),
        text("KettoNum", 30, 10),
        text("Bamei", 40, 36),
        text("UmaKigoCD", 76, 2),
        text("SexCD", 78, 1),
        text("HinsyuCD", 79, 1),
        text("KeiroCD", 80, 2),
        int("Barei", 82, 2),
        text("TozaiCD", 84, 1),
        text("ChokyosiCode", 85, 5),
        text("ChokyosiRyakusyo", 90, 8),
        text("BanusiCode", 98, 6),
        text("BanusiName", 104, 64),
        text("Fukusyoku", 168, 60),
        scaled("Futan", 288, 3, 1),
        scaled("FutanBefore", 291, 3, 1),
        text("BlinkerCD", 294, 1),
        text("KisyuCode", 296, 5),
        text("KisyuCodeBefore", 301, 5),
        text("KisyuRyakusyo", 306, 8),
        text("KisyuRyakusyoBefore", 314, 8),
        text("MinaraiCD", 322, 1),
        text("MinaraiCDBefore", 323, 1),
        int("BaTaijyu", 324, 3),
        text("ZogenFugo", 327, 1),
        int("ZogenSa", 328, 3),
        text("IjyoCD", 331, 1),
        int("NyusenJyuni", 332, 2),
        int("KakuteiJyuni", 334, 2),
        text("DochakuKubun", 336, 1),
        int("DochakuTosu", 337, 1),
        scaled("Time", 338, 4, 1),
        text("ChakusaCD", 342, 3),
        text("ChakusaCDP", 345, 3),
        text("ChakusaCDPP", 348, 3),
        int("Jyuni1c", 351, 2),
        int("Jyuni2c", 353, 2),
        int("Jyuni3c", 355, 2),
        int("Jyuni4c", 357, 2),
        scaled("Odds", 359, 4, 1),
        int("Ninki", 363, 2),
        int("Honsyokin", 365, 8),
        int("Fukasyokin", 373, 8),
        scaled("HaronTimeL4", 387, 3, 1),
        scaled("HaronTimeL3", 390, 3, 1),
        scaled("TimeDiff", 531, 4, 1),
        text("RecordUpKubun", 535, 1),
        text("DMKubun", 536, 1),
        scaled("DMTime", 537, 5, 1),
        scaled("DMGosaP", 542, 4, 1),
        scaled("DMGosaM", 546, 4, 1),
        int("DMJyuni", 550, 2),
        text("KyakusituKubun", 552, 1),
    ],
    blocks: &[
        // First-place (rival) horse of this runner's race, three entries
        BlockSpec {
            prefix: "Aite",
            offset: 393,
            width: 46,
            count: 3,
            fields: &[text("KettoNum", 0, 10), text("Bamei", 10, 36)],
            mode: BlockMode::Flatten,
        },
    ],
};

/// Payout hit: number or combination, amount, popularity
static PAY_UMABAN: &[FieldSpec] = &[int("Umaban", 0, 2), int("Pay", 2, 9), int("Ninki", 11, 2)];
static PAY_WAKU: &[FieldSpec] = &[text("Kumi", 0, 2), int("Pay", 2, 9), int("Ninki", 11, 2)];
static PAY_PAIR: &[FieldSpec] = &[text("Kumi", 0, 4), int("Pay", 4, 9), int("Ninki", 13, 3)];
static PAY_TRIO: &[FieldSpec] = &[text("Kumi", 0, 6), int("Pay", 6, 9), int("Ninki", 15, 3)];
static PAY_TRIFECTA: &[FieldSpec] = &[text("Kumi", 0, 6), int("Pay", 6, 9), int("Ninki", 15, 4)];
static FLAG: &[FieldSpec] = &[int("", 0, 1)];

/// HR - payout record (one per race, hits flattened per pool)
pub static HR: RecordLayout = RecordLayout {
    kind: "HR",
    length: 719,
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
    ],
    blocks: &[
        BlockSpec {
            prefix: "FuseirituFlag",
            offset: 31,
            width: 1,
            count: 9,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "TokubaraiFlag",
            offset: 40,
            width: 1,
            count: 9,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "HenkanFlag",
            offset: 49,
            width: 1,
            count: 9,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "HenkanUmaban",
            offset: 58,
            width: 1,
            count: 28,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "HenkanWakuban",
            offset: 86,
            width: 1,
            count: 8,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "HenkanDowaku",
            offset: 94,
            width: 1,
            count: 8,
            fields: FLAG,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Tansyo",
            offset: 102,
            width: 13,
            count: 3,
            fields: PAY_UMABAN,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Fukusyo",
            offset: 141,
            width: 13,
            count: 5,
            fields: PAY_UMABAN,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Wakuren",
            offset: 206,
            width: 13,
            count: 3,
            fields: PAY_WAKU,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Umaren",
            offset: 245,
            width: 16,
            count: 3,
            fields: PAY_PAIR,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Wide",
            offset: 293,
            width: 16,
            count: 7,
            fields: PAY_PAIR,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Umatan",
            offset: 453,
            width: 16,
            count: 6,
            fields: PAY_PAIR,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Sanrenpuku",
            offset: 549,
            width: 18,
            count: 3,
            fields: PAY_TRIO,
            mode: BlockMode::Flatten,
        },
        BlockSpec {
            prefix: "Sanrentan",
            offset: 603,
            width: 19,
            count: 6,
            fields: PAY_TRIFECTA,
            mode: BlockMode::Flatten,
        },
    ],
};
