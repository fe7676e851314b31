use serde::{Deserialize, Serialize};
use super::enums::YesNo;
use super::free_text;

/// Section F, investigations on admission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionInvestigation {
    // random blood sugar
    pub rbs_nar: YesNo,
    #[serde(deserialize_with = "free_text")]
    pub rbs_measure_nar: String,
    pub bilirubin_nar: YesNo,
    #[serde(deserialize_with = "free_text")]
    pub serum_measure_nar: String,
}
