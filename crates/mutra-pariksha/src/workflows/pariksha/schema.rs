use serde::Serialize;

/// Identifier of the step that captures the patient record.
pub const PATIENT_STEP_ID: &str = "patientInfo";

/// Value domain of a single questionnaire field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Select(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldDefinition {
    fn text(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Text,
        }
    }

    fn select(id: &'static str, label: &'static str, options: &[&'static str]) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Select(options.to_vec()),
        }
    }

    pub fn options(&self) -> Option<&[&'static str]> {
        match &self.kind {
            FieldKind::Text => None,
            FieldKind::Select(options) => Some(options),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldDefinition>,
}

impl StepDefinition {
    pub fn is_patient_step(&self) -> bool {
        self.id == PATIENT_STEP_ID
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.id == field_id)
    }

    pub fn field_label(&self, field_id: &str) -> Option<&'static str> {
        self.field(field_id).map(|field| field.label)
    }
}

/// Ordered registry of assessment steps. Index 0 is always the patient step.
#[derive(Debug, Clone)]
pub struct AssessmentSchema {
    steps: Vec<StepDefinition>,
}

impl AssessmentSchema {
    pub fn standard() -> Self {
        Self {
            steps: standard_steps(),
        }
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn step_by_id(&self, step_id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == step_id)
    }

    pub fn position(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == step_id)
    }

    /// Number of form steps, which is also the index of the summary step.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn observation_steps(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter().filter(|step| !step.is_patient_step())
    }
}

fn standard_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition {
            id: PATIENT_STEP_ID,
            title: "1. Patient Record",
            fields: vec![
                FieldDefinition::text("name", "Patient Name"),
                FieldDefinition::text("age", "Age"),
                FieldDefinition::select("gender", "Gender", &["Male", "Female", "Other"]),
            ],
        },
        StepDefinition {
            id: "Collection",
            title: "2. Collection & Quantity",
            fields: vec![
                FieldDefinition::select(
                    "collection_time",
                    "Collection Time",
                    &["Morning", "Afternoon", "Night"],
                ),
                FieldDefinition::select(
                    "fasting_state",
                    "State",
                    &["Fasting", "Post-prandial", "Random"],
                ),
                FieldDefinition::select("quantity", "Quantity", &["Scanty", "Moderate", "Excessive"]),
                FieldDefinition::select("frequency", "Frequency", &["Low", "Normal", "High"]),
                FieldDefinition::select("urgency", "Urgency", &["None", "Mild", "Strong"]),
                FieldDefinition::select("dysuria", "Dysuria/Burning", &["None", "Mild", "Severe"]),
            ],
        },
        StepDefinition {
            id: "Varna",
            title: "3. Varna (Color)",
            fields: vec![FieldDefinition::select(
                "varna",
                "Color",
                &["Clear", "Straw", "Yellow", "Dark Yellow", "Reddish", "Brownish"],
            )],
        },
        StepDefinition {
            id: "Gandha",
            title: "4. Gandha & Sensation",
            fields: vec![
                FieldDefinition::select("gandha", "Odor", &["Mild", "Strong", "Foul", "Sweetish"]),
                FieldDefinition::select(
                    "burning",
                    "Burning Sensation",
                    &["None", "Mild", "Burning"],
                ),
            ],
        },
        StepDefinition {
            id: "Rupa",
            title: "5. Rupa (Appearance)",
            fields: vec![
                FieldDefinition::select(
                    "phenila",
                    "Froth/Phenila",
                    &["Absent", "Mild", "Persistent"],
                ),
                FieldDefinition::select(
                    "avila",
                    "Turbidity/Avila",
                    &["Clear", "Slightly turbid", "Turbid"],
                ),
                FieldDefinition::select(
                    "sediment",
                    "Sediment",
                    &["None", "Minimal", "Moderate", "Heavy"],
                ),
            ],
        },
        StepDefinition {
            id: "Picchila",
            title: "6. Picchila/Snigdhatva/Threads",
            fields: vec![
                FieldDefinition::select("picchila", "Mucus/Picchila", &["Absent", "Present"]),
                FieldDefinition::select(
                    "snigdhatva",
                    "Unctuousness/Snigdhatva",
                    &["Absent", "Present"],
                ),
                FieldDefinition::select("tantra", "Threads/Tantrika", &["Absent", "Present"]),
            ],
        },
        StepDefinition {
            id: "Additional",
            title: "7. Additional Symptoms",
            fields: vec![
                FieldDefinition::select("nocturia", "Nocturia", &["No", "Yes"]),
                FieldDefinition::select("pain", "Pain while urination", &["None", "Mild", "Severe"]),
                FieldDefinition::select("edema", "Swelling/Edema", &["No", "Yes"]),
            ],
        },
    ]
}
