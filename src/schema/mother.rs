use serde::{Deserialize, Serialize};
use super::enums::{BloodGroup, PosNegUnknown, YesNo, YesNoUnknown};
use super::free_text;

/// Section B, mother's details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotherDetails {
    #[serde(deserialize_with = "free_text")]
    pub mum_ip_no_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub mum_age_years_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub parity_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub edd_date_nar: String,

    pub blood_group_nar: BloodGroup,
    pub rhesus_nar: PosNegUnknown,
    pub anti_d_nar: YesNo,

    #[serde(deserialize_with = "free_text")]
    pub anc_visits_nar: String,
    pub anc_us_nar: YesNo,
    #[serde(deserialize_with = "free_text")]
    pub anc_trimester_nar: String,

    pub vdrl_nar: PosNegUnknown,
    pub pmtct_nar: PosNegUnknown,
    pub mum_arvs_nar: YesNoUnknown,
    pub hepb_nar: PosNegUnknown,
    pub hepb_ig_nar: YesNoUnknown,
    pub htn_pregnancy_nar: YesNoUnknown,
    pub aph_nar: YesNoUnknown,
    pub diabetes_nar: YesNoUnknown,
    pub prolonged_stage_nar: YesNoUnknown,
}
