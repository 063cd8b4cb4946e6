//! Primary-key declarations per record kind
//!
//! Every destination table must carry a key; the catalogue build fails on a
//! kind missing from this map rather than shipping a keyless table. Keys
//! follow the vendor layout documentation: race-scoped kinds key on the six
//! race-identity columns, per-runner kinds add the horse, combination kinds
//! add the combination, masters key on their registration code.

/// The six race-identity columns shared by race-scoped kinds
const RACE_ID: &[&str] = &["Year", "MonthDay", "JyoCD", "Kaiji", "Nichiji", "RaceNum"];

/// Primary key for a record kind, or `None` for an undeclared kind
pub fn primary_key(kind: &str) -> Option<&'static [&'static str]> {
    Some(match kind {
        // Race data
        "RA" | "HR" => RACE_ID,
        "SE" | "JG" | "TK" | "CK" => &[
            "Year", "MonthDay", "JyoCD", "Kaiji", "Nichiji", "RaceNum", "KettoNum",
        ],
        "JC" | "AV" | "O1" | "H1" | "DM" | "TM" => &[
            "Year", "MonthDay", "JyoCD", "Kaiji", "Nichiji", "RaceNum", "Umaban",
        ],
        "CC" | "TC" => &[
            "Year", "MonthDay", "JyoCD", "Kaiji", "Nichiji", "RaceNum", "HappyoTime",
        ],
        "WE" | "WH" => &["Year", "MonthDay", "JyoCD", "Kaiji", "Nichiji", "HappyoTime"],

        // Combination kinds
        "O2" | "O3" | "O4" | "O5" | "O6" | "H6" => &[
            "Year", "MonthDay", "JyoCD", "Kaiji", "Nichiji", "RaceNum", "Kumi",
        ],

        // Masters
        "UM" | "SK" | "HY" => &["KettoNum"],
        "KS" => &["KisyuCode"],
        "CH" => &["ChokyosiCode"],
        "BN" => &["BanusiCode"],
        "BR" => &["BreederCode"],
        "HN" | "BT" => &["HansyokuNum"],
        "HS" => &["KettoNum", "SaleHostCode", "FromDate"],

        // Schedule and auxiliary
        "YS" => &["Year", "MonthDay", "JyoCD"],
        "CS" => &["JyoCD", "Kyori", "TrackCD"],
        "RC" => &[
            "RecordKubunID", "Year", "MonthDay", "JyoCD", "Kaiji", "Nichiji", "RaceNum",
        ],
        "WF" => &["Year", "MonthDay"],

        // Training
        "HC" | "WC" => &["TresenKubun", "ChokyoDate", "ChokyoTime", "KettoNum"],

        // Regional-only
        "HA" => &["KaisaiDate", "JyoCD", "Kaiji", "Nichiji", "RaceNum", "Kumi"],
        "NC" => &["JyoCD"],
        "NU" => &["UmaID"],

        _ => return None,
    })
}
