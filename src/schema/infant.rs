use serde::{Deserialize, Serialize};
use super::enums::{AgeUnits, BabyFrom, BornWhere, CsType, Delivery, GestationType, Sex, YesNo};
use super::free_text;

/// Section A, infant details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfantDetails {
    #[serde(deserialize_with = "free_text")]
    pub infant_ipno_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub doa_date_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub time_seen_nar: String,
    pub sex_nar: Sex,
    #[serde(deserialize_with = "free_text")]
    pub dob_date_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub time_birth_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub gestation_nar: String,
    pub gest_type_nar: GestationType,
    pub age_units_itf: AgeUnits,
    #[serde(deserialize_with = "free_text")]
    pub infant_age_itf: String,
    #[serde(deserialize_with = "free_text")]
    pub apgar_1m_itf: String,
    #[serde(deserialize_with = "free_text")]
    pub apgar_5m_itf: String,
    #[serde(deserialize_with = "free_text")]
    pub apgar_10m_itf: String,
    pub baby_from_itf: BabyFrom,
}

/// Section A for babies born outside the hospital.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutbornInfantDetails {
    #[serde(deserialize_with = "free_text")]
    pub infant_ipno_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub doa_date_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub time_seen_nar: String,
    pub sex_nar: Sex,
    #[serde(deserialize_with = "free_text")]
    pub dob_date_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub time_birth_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub gestation_nar: String,
    pub gest_type_nar: GestationType,
    #[serde(deserialize_with = "free_text")]
    pub age_days_nar: String,
    // rupture of membranes, hours
    pub rom_nar: Option<i64>,
    pub delivery_nar: Delivery,
    pub cs_type_nar: CsType,
    pub bvm_nar: YesNo,
    #[serde(deserialize_with = "free_text")]
    pub apgar_1m_itf: String,
    #[serde(deserialize_with = "free_text")]
    pub apgar_5m_itf: String,
    #[serde(deserialize_with = "free_text")]
    pub apgar_10m_itf: String,
    #[serde(rename = "mutiple_delivery_nar")]
    pub multiple_delivery_nar: YesNo,
    #[serde(deserialize_with = "free_text")]
    pub multiple_deliver_count_nar: String,
    pub born_outside_nar: YesNo,
    pub born_where_nar: BornWhere,
}
