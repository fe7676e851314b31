use serde::{Deserialize, Serialize};
use super::enums::{Appearance, Cry, PlusGrade, Recession, Selected, Skin, Tone, Umbilicus, YesNo};
use super::free_text;

/// Ticked birth defect boxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecificBirthDefects {
    pub birth_defect_gi_nar: Selected,
    pub birth_defect_tube_nar: Selected,
    pub birth_defect_hydro_nar: Selected,
    pub birth_defect_spina_nar: Selected,
    pub birth_defect_palate_nar: Selected,
    pub birth_defect_limb_nar: Selected,
    pub birth_defect_micro_nar: Selected,
    pub birth_defect_birth_nar: Selected,
}

/// Section E, examination on admission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewbornAdmission {
    #[serde(deserialize_with = "free_text")]
    pub temp_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub resp_rate_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub pulse_rate_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub oximetry_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub birth_weight_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub weight_now_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub head_circ_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub length_nar: String,
    #[serde(deserialize_with = "free_text")]
    pub blood_pressure_nar: String,

    pub skin_nar: Skin,
    pub appearance_nar: Appearance,
    pub jaundice_nar: PlusGrade,
    pub pallor_nar: PlusGrade,
    pub cry_nar: Cry,
    pub xiphoid_nar: Recession,
    pub intercostal_nar: Recession,

    #[serde(deserialize_with = "free_text")]
    pub cap_refill_nar: String,

    pub bulging_fontanelle_nar: YesNo,
    pub irritable_nar: YesNo,

    pub tone_nar: Tone,
    pub umbilicus_nar: Umbilicus,
    pub birth_defects_nar: YesNo,

    pub specific_defects: SpecificBirthDefects,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_examination() -> anyhow::Result<()> {
        let record: NewbornAdmission = serde_json::from_value(json!({
            "temp_nar": 36.5,
            "skin_nar": "Mottling",
            "jaundice_nar": "+++",
            "pallor_nar": "None",
            "cry_nar": "Weak/Absent",
            "xiphoid_nar": "Mild",
            "umbilicus_nar": "Local Pus",
            "birth_defects_nar": "Yes",
            "specific_defects": {
                "birth_defect_limb_nar": "Selected",
                "birth_defect_gi_nar": "EMPTY"
            }
        }))?;
        assert_eq!(record.temp_nar, "36.5");
        assert_eq!(record.skin_nar, Skin::Mottling);
        assert_eq!(record.jaundice_nar, PlusGrade::Severe);
        assert_eq!(record.pallor_nar, PlusGrade::Absent);
        assert_eq!(record.cry_nar, Cry::WeakOrAbsent);
        assert_eq!(record.xiphoid_nar, Recession::Mild);
        assert_eq!(record.intercostal_nar, Recession::Empty);
        assert_eq!(record.umbilicus_nar, Umbilicus::LocalPus);
        assert_eq!(record.specific_defects.birth_defect_limb_nar, Selected::Selected);
        assert_eq!(record.specific_defects.birth_defect_gi_nar, Selected::Empty);

        let out = serde_json::to_value(&record)?;
        assert_eq!(out["jaundice_nar"], "+++");
        assert_eq!(out["pallor_nar"], "None");
        assert_eq!(out["specific_defects"]["birth_defect_limb_nar"], "Selected");
        assert_eq!(out["specific_defects"]["birth_defect_palate_nar"], -1);
        Ok(())
    }

    #[test]
    fn test_missing_nested_defects() -> anyhow::Result<()> {
        let record: NewbornAdmission = serde_json::from_value(json!({"tone_nar": "Decreased"}))?;
        assert_eq!(record.tone_nar, Tone::Decreased);
        assert_eq!(record.specific_defects, SpecificBirthDefects::default());
        assert_eq!(record.specific_defects.birth_defect_birth_nar, Selected::Empty);
        Ok(())
    }
}
