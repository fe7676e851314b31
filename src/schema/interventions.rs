use serde::{Deserialize, Serialize};
use super::enums::YesNo;

/// Section J, interventions given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interventions {
    pub vit_k_nar: YesNo,
    pub caffeine_citrate_nar: YesNo,
    pub bcg_nar: YesNo,
    pub prophylaxis_pmtct_nar: YesNo,
    pub chlorohexidine_nar: YesNo,
    pub kmc_nar: YesNo,
    pub incubate_warm_nar: YesNo,
    pub phototherapy_nar: YesNo,
    pub nutrition_feeds_nar: YesNo,
    pub opv_nar: YesNo,
    pub iv_fluids_nar: YesNo,
    pub transfusion_nar: YesNo,
    pub surfactant_nar: YesNo,
    pub antibiotics_nar: YesNo,
    pub oxygen_nar: YesNo,
    pub cpap_nar: YesNo,
}
