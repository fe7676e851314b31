use serde::{Deserialize, Serialize};
use super::enums::YesNo;

/// Section D, presenting problems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentingProblems {
    pub fever_nar: YesNo,
    pub diff_breath_nar: YesNo,
    pub inability_feed_nar: YesNo,
    pub convulsions_nar: YesNo,
    pub apnoea_nar: YesNo,
    pub floppy_nar: YesNo,
    pub vomits_nar: YesNo,
    pub passed_stool_nar: YesNo,
    pub passed_urine_nar: YesNo,
}
