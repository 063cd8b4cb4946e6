//! Master data layouts
//!
//! Masters are keyed by their registration code rather than a race identity.
//! The multi-kilobyte career-statistics blobs inside the jockey and trainer
//! masters are kept as single text columns; nothing downstream consumes
//! their interior today.

use crate::layout::{int, text, BlockMode, BlockSpec, RecordLayout};

/// UM - racehorse master
pub static UM: RecordLayout = RecordLayout {
    kind: "UM",
    length: 1609,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("KettoNum", 11, 10),
        text("DelKubun", 21, 1),
        text("RegDate", 22, 8),
        text("DelDate", 30, 8),
        text("BirthDate", 38, 8),
        text("Bamei", 46, 36),
        text("BameiKana", 82, 36),
        text("BameiEng", 118, 60),
        text("ZaikyuFlag", 178, 1),
        text("UmaKigoCD", 198, 2),
        text("SexCD", 200, 1),
        text("HinsyuCD", 201, 1),
        text("KeiroCD", 202, 2),
        text("TozaiCD", 848, 1),
        text("ChokyosiCode", 849, 5),
        text("ChokyosiRyakusyo", 854, 8),
        text("SyotaiChiiki", 862, 20),
        text("BreederCode", 882, 8),
        text("BreederName", 890, 72),
        text("SanchiName", 962, 20),
        text("BanusiCode", 982, 6),
        text("BanusiName", 988, 64),
        int("HeichiHonsyokinTotal", 1052, 9),
        int("SyogaiHonsyokinTotal", 1061, 9),
        int("HeichiFukasyokinTotal", 1070, 9),
        int("SyogaiFukasyokinTotal", 1079, 9),
        int("HeichiSyutokuTotal", 1088, 9),
        int("SyogaiSyutokuTotal", 1097, 9),
        text("KyakusituKeiko", 1592, 12),
        int("RegisteredRaceCount", 1604, 3),
    ],
    blocks: &[
        // Three-generation pedigree: 14 ancestors of (number, name)
        BlockSpec {
            prefix: "Ketto3Info",
            offset: 204,
            width: 46,
            count: 14,
            fields: &[text("HansyokuNum", 0, 10), text("Bamei", 10, 36)],
            mode: BlockMode::Flatten,
        },
        // First-place count per surface/going/distance/venue category
        BlockSpec {
            prefix: "Chaku",
            offset: 1106,
            width: 18,
            count: 27,
            fields: &[int("Count", 0, 3)],
            mode: BlockMode::Flatten,
        },
    ],
};

/// KS - jockey master
pub static KS: RecordLayout = RecordLayout {
    kind: "KS",
    length: 4173,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("KisyuCode", 11, 5),
        text("DelKubun", 16, 1),
        text("IssueDate", 17, 8),
        text("DelDate", 25, 8),
        text("BirthDate", 33, 8),
        text("KisyuName", 41, 34),
        text("KisyuNameKana", 109, 30),
        text("KisyuRyakusyo", 139, 8),
        text("KisyuNameEng", 147, 80),
        text("SexKubun", 227, 1),
        text("SikakuCD", 228, 1),
        text("MinaraiCD", 229, 1),
        text("TozaiCD", 230, 1),
        text("SyotaiChiiki", 231, 20),
        text("ShozokuChokyosiCode", 251, 5),
        text("ShozokuChokyosiRyakusyo", 256, 8),
        text("HatsuKijoInfo", 264, 134),
        text("HatsuSyoriInfo", 398, 128),
        text("SaikinJyusyoInfo", 526, 489),
        text("SeisekiInfo", 1015, 3156),
    ],
    blocks: &[],
};

/// CH - trainer master
pub static CH: RecordLayout = RecordLayout {
    kind: "CH",
    length: 3862,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("ChokyosiCode", 11, 5),
        text("DelKubun", 16, 1),
        text("IssueDate", 17, 8),
        text("DelDate", 25, 8),
        text("BirthDate", 33, 8),
        text("ChokyosiName", 41, 34),
        text("ChokyosiNameKana", 75, 30),
        text("ChokyosiRyakusyo", 105, 8),
        text("ChokyosiNameEng", 113, 80),
        text("SexKubun", 193, 1),
        text("TozaiCD", 194, 1),
        text("SyotaiChiiki", 195, 20),
        text("SaikinJyusyoInfo", 215, 489),
        text("SeisekiInfo", 704, 3156),
    ],
    blocks: &[],
};

/// BN - owner master
pub static BN: RecordLayout = RecordLayout {
    kind: "BN",
    length: 477,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("BanusiCode", 11, 6),
        text("BanusiName_Co", 17, 64),
        text("BanusiName", 81, 64),
        text("BanusiNameKana", 145, 50),
        text("BanusiNameEng", 195, 100),
        text("Fukusyoku", 295, 60),
        text("SeisekiInfo", 355, 120),
    ],
    blocks: &[],
};

/// BR - breeder master
pub static BR: RecordLayout = RecordLayout {
    kind: "BR",
    length: 545,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("BreederCode", 11, 8),
        text("BreederName_Co", 19, 72),
        text("BreederName", 91, 72),
        text("BreederNameKana", 163, 72),
        text("BreederNameEng", 235, 168),
        text("Address", 403, 20),
        text("SeisekiInfo", 423, 120),
    ],
    blocks: &[],
};

/// HN - breeding horse master
pub static HN: RecordLayout = RecordLayout {
    kind: "HN",
    length: 251,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("HansyokuNum", 11, 10),
        text("KettoNum", 29, 10),
        text("Bamei", 40, 36),
        text("BameiKana", 76, 40),
        text("BameiEng", 116, 80),
        int("BirthYear", 196, 4),
        text("SexCD", 200, 1),
        text("HinsyuCD", 201, 1),
        text("KeiroCD", 202, 2),
        text("MochikomiKubun", 204, 1),
        int("YunyuYear", 205, 4),
        text("SanchiName", 209, 20),
        text("FHansyokuNum", 229, 10),
        text("MHansyokuNum", 239, 10),
    ],
    blocks: &[],
};

/// SK - progeny master
pub static SK: RecordLayout = RecordLayout {
    kind: "SK",
    length: 208,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("KettoNum", 11, 10),
        text("BirthDate", 21, 8),
        text("SexCD", 29, 1),
        text("HinsyuCD", 30, 1),
        text("KeiroCD", 31, 2),
        text("MochikomiKubun", 33, 1),
        int("YunyuYear", 34, 4),
        text("BreederCode", 38, 8),
        text("SanchiName", 46, 20),
    ],
    blocks: &[
        // Three-generation pedigree, numbers only
        BlockSpec {
            prefix: "Ketto3",
            offset: 66,
            width: 10,
            count: 14,
            fields: &[text("HansyokuNum", 0, 10)],
            mode: BlockMode::Flatten,
        },
    ],
};

/// HY - horse name origin
pub static HY: RecordLayout = RecordLayout {
    kind: "HY",
    length: 123,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("KettoNum", 11, 10),
        text("Bamei", 21, 36),
        text("Origin", 57, 64),
    ],
    blocks: &[],
};

/// HS - market transaction record
pub static HS: RecordLayout = RecordLayout {
    kind: "HS",
    length: 200,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("KettoNum", 11, 10),
        text("SireHansyokuNum", 21, 10),
        text("DamHansyokuNum", 31, 10),
        int("BirthYear", 41, 4),
        text("SaleHostCode", 45, 6),
        text("SaleHostName", 51, 40),
        text("SaleName", 91, 80),
        text("FromDate", 171, 8),
        text("ToDate", 179, 8),
        int("TradingAge", 187, 1),
        int("Price", 188, 10),
    ],
    blocks: &[],
};

/// BT - bloodline (sire line) master
pub static BT: RecordLayout = RecordLayout {
    kind: "BT",
    length: 6889,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("HansyokuNum", 11, 10),
        text("KeitoID", 21, 30),
        text("KeitoName", 51, 36),
        text("Description", 87, 6800),
    ],
    blocks: &[],
};
