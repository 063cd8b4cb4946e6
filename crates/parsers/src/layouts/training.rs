//! Training session layouts
//!
//! Furlong times arrive x10 (`"525"` is 52.5 seconds).

use crate::layout::{int, scaled, text, BlockMode, BlockSpec, RecordLayout};

/// HC - hill course training session
pub static HC: RecordLayout = RecordLayout {
    kind: "HC",
    length: 60,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("TresenKubun", 11, 1),
        text("ChokyoDate", 12, 8),
        text("ChokyoTime", 20, 4),
        text("KettoNum", 24, 10),
        scaled("HaronTime4Total", 34, 4, 1),
        scaled("LapTime4", 38, 3, 1),
        scaled("HaronTime3Total", 41, 4, 1),
        scaled("LapTime3", 45, 3, 1),
        scaled("HaronTime2Total", 48, 4, 1),
        scaled("LapTime2", 52, 3, 1),
        scaled("LapTime1", 55, 3, 1),
    ],
    blocks: &[],
};

/// WC - woodchip course training session
pub static WC: RecordLayout = RecordLayout {
    kind: "WC",
    length: 105,
    fields: &[
        text("RecordSpec", 0, 2),
        text("DataKubun", 2, 1),
        text("MakeDate", 3, 8),
        text("TresenKubun", 11, 1),
        text("ChokyoDate", 12, 8),
        text("ChokyoTime", 20, 4),
        text("KettoNum", 24, 10),
        text("Course", 34, 1),
        text("BabaMawari", 35, 1),
        scaled("HaronTime10Total", 37, 4, 1),
        scaled("LapTime10", 41, 3, 1),
        scaled("HaronTime9Total", 44, 4, 1),
        scaled("LapTime9", 48, 3, 1),
        scaled("HaronTime8Total", 51, 4, 1),
        scaled("LapTime8", 55, 3, 1),
        scaled("HaronTime7Total", 58, 4, 1),
        scaled("LapTime7", 62, 3, 1),
        scaled("HaronTime6Total", 65, 4, 1),
        scaled("LapTime6", 69, 3, 1),
        scaled("HaronTime5Total", 72, 4, 1),
        scaled("LapTime5", 76, 3, 1),
        scaled("HaronTime4Total", 79, 4, 1),
        scaled("LapTime4", 83, 3, 1),
        scaled("HaronTime3Total", 86, 4, 1),
        scaled("LapTime3", 90, 3, 1),
        scaled("HaronTime2Total", 93, 4, 1),
        scaled("LapTime2", 97, 3, 1),
        scaled("LapTime1", 100, 3, 1),
    ],
    blocks: &[],
};

/// CK - career totals at race time (horse plus connections)
pub static CK: RecordLayout = RecordLayout {
    kind: "CK",
    length: 6870,
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
        int("HeichiHonsyokinTotal", 73, 9),
        int("SyogaiHonsyokinTotal", 82, 9),
        int("HeichiFukasyokinTotal", 91, 9),
        int("SyogaiFukasyokinTotal", 100, 9),
        int("HeichiSyutokuTotal", 109, 9),
        int("SyogaiSyutokuTotal", 118, 9),
        text("KyakusituKeiko", 1369, 12),
        int("RegisteredRaceCount", 1381, 3),
        text("KisyuCode", 1384, 5),
        text("KisyuName", 1389, 34),
        text("KisyuSeisekiInfo", 1423, 2440),
        text("ChokyosiCode", 3863, 5),
        text("ChokyosiName", 3868, 34),
        text("ChokyosiSeisekiInfo", 3902, 2440),
        text("BanusiCode", 6342, 6),
        text("BanusiName_Co", 6348, 64),
        text("BanusiName", 6412, 64),
        text("BanusiSeisekiInfo", 6476, 120),
        text("BreederCode", 6596, 8),
        text("BreederName_Co", 6604, 72),
        text("BreederName", 6676, 72),
        text("BreederSeisekiInfo", 6748, 120),
    ],
    blocks: &[
        // First-place count per surface/going/distance/venue category
        BlockSpec {
            prefix: "Chaku",
            offset: 127,
            width: 18,
            count: 69,
            fields: &[int("Count", 0, 3)],
            mode: BlockMode::Flatten,
        },
    ],
};
