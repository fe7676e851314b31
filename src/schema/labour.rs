use serde::{Deserialize, Serialize};
use super::enums::{CsType, Delivery, MaternalStatus, YesNo};
use super::free_text;

/// Section C, labour and birth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabourAndBirth {
    pub delivery_itf: Delivery,
    pub cs_type_itf: CsType,
    pub meconium_itf: YesNo,
    pub steroids_itf: YesNo,
    #[serde(deserialize_with = "free_text")]
    pub no_doses_itf: String,
    pub bvm_itf: YesNo,
    pub chest_compress_itf: YesNo,
    #[serde(deserialize_with = "free_text")]
    pub resuscitation_itf: String,
    pub oxygen_itf: YesNo,
    pub cpap_itf: YesNo,
    pub vit_k_itf: YesNo,
    pub hep_b_itf: YesNo,
    pub teo_itf: YesNo,
    pub bcg_itf: YesNo,
    pub opv_itf: YesNo,
    pub chlorohexidine_itf: YesNo,
    pub maternal_status_itf: MaternalStatus,
}
