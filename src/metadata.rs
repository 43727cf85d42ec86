use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareMetadata {
    pub patient_name: String,
    pub main_condition: String,
    #[serde(default)]
    pub care_notes: String,
}

impl Default for CareMetadata {
    fn default() -> Self {
        Self {
            patient_name: "Unnamed Patient".to_string(),
            main_condition: "Not specified".to_string(),
            care_notes: String::new(),
        }
    }
}
