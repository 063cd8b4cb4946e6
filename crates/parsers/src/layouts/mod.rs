//! Static record layouts
//!
//! One `RecordLayout` per record kind. Offsets, lengths, repeat counts, and
//! implicit decimal scales follow the vendor data dictionary. Duplicated
//! source field names are disambiguated at declaration time (`Before`/`After`
//! variants, numeric suffixes on flattened blocks) so every output column is
//! unique.
//!
//! Module split mirrors the data families:
//! - `race` - race definition and race-scoped notices
//! - `results` - runner results and payouts
//! - `odds` - the six odds families
//! - `votes` - vote counts
//! - `masters` - horse/jockey/trainer/owner/breeder/pedigree masters
//! - `schedule` - schedule, registrations, course, records, mining, carryover
//! - `training` - training sessions
//! - `regional` - regional-feed-only kinds

mod masters;
mod odds;
mod race;
mod regional;
mod results;
mod schedule;
mod training;
mod votes;

pub use masters::{BN, BR, BT, CH, HN, HS, HY, KS, SK, UM};
pub use odds::{O1, O2, O3, O4, O5, O6};
pub use race::{AV, CC, JC, JG, RA, TC, WE, WH};
pub use regional::{HA, NC, NU};
pub use results::{HR, SE};
pub use schedule::{CS, DM, RC, TK, TM, WF, YS};
pub use training::{CK, HC, WC};
pub use votes::{H1, H6};

use crate::RecordLayout;

/// The 38 kinds carried by the central feed (the regional feed shares them)
pub static CENTRAL: &[&RecordLayout] = &[
    &RA, &SE, &HR, &JG, &JC, &CC, &TC, &WE, &WH, &AV, // race data
    &O1, &O2, &O3, &O4, &O5, &O6, // odds
    &H1, &H6, // votes
    &UM, &KS, &CH, &BN, &BR, &HN, &SK, &HY, &HS, &BT, // masters
    &YS, &TK, &CS, &RC, &DM, &TM, &WF, // schedule and auxiliary
    &HC, &CK, &WC, // training
];

/// Kinds that exist only on the regional feed
pub static REGIONAL_ONLY: &[&RecordLayout] = &[&HA, &NC, &NU];
