use serde::{Deserialize, Serialize};
use super::enums::DiagnosisRank;

/// Section G, admission diagnoses ranked primary (`1`) or secondary (`2`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionDiagnosis {
    pub prematurity_nar: DiagnosisRank,
    pub lbw_nar: DiagnosisRank,
    pub asphyxia_nar: DiagnosisRank,
    pub rds_nar: DiagnosisRank,
    pub sepsis_nar: DiagnosisRank,
    pub jaundice_diag_nar: DiagnosisRank,
    pub meconium_aspiration_nar: DiagnosisRank,
    pub meningitis_nar: DiagnosisRank,
    pub congenital_anomaly_nar: DiagnosisRank,
    pub multiple_gestation_nar: DiagnosisRank,
    pub other_diagnosis_nar: DiagnosisRank,
}
