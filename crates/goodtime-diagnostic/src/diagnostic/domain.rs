use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::questionnaire::{self, MAX_ANSWER_VALUE};

/// Respondent identity exactly as the questionnaire front-end sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    /// Free text on the wire ("15", "" when the field was left blank).
    pub units: String,
}

/// Scores computed client-side. Missing keys count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBundle {
    #[serde(default)]
    pub total: i32,
    #[serde(default)]
    pub structure: i32,
    #[serde(default)]
    pub acquisition: i32,
    #[serde(default)]
    pub value: i32,
}

impl ScoreBundle {
    /// Sum answers per area the way the questionnaire does; unknown ids only count toward total.
    pub fn from_answers(answers: &BTreeMap<String, u8>) -> Self {
        let mut scores = Self::default();
        for (question_id, value) in answers {
            let value = i32::from(*value);
            scores.total += value;
            let area = question_id
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(questionnaire::question)
                .map(|question| question.area);
            match area {
                Some(Area::Structure) => scores.structure += value,
                Some(Area::Acquisition) => scores.acquisition += value,
                Some(Area::Value) => scores.value += value,
                None => {}
            }
        }
        scores
    }

    pub fn score_for(&self, area: Area) -> i32 {
        match area {
            Area::Structure => self.structure,
            Area::Acquisition => self.acquisition,
            Area::Value => self.value,
        }
    }
}

/// Request body of `POST /api/diagnostic/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRequest {
    pub user_info: UserInfo,
    #[serde(default)]
    pub answers: BTreeMap<String, u8>,
    #[serde(default)]
    pub scores: ScoreBundle,
}

impl DiagnosticRequest {
    /// Rejects submissions the narrative must never be built from.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let identity = [
            ("firstName", &self.user_info.first_name),
            ("lastName", &self.user_info.last_name),
            ("email", &self.user_info.email),
        ];
        for (field, value) in identity {
            if value.trim().is_empty() {
                return Err(ValidationError::BlankField { field });
            }
        }

        for (question_id, value) in &self.answers {
            let known = question_id
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(questionnaire::question)
                .is_some();
            if !known {
                return Err(ValidationError::UnknownQuestion {
                    question_id: question_id.clone(),
                });
            }
            if *value > MAX_ANSWER_VALUE {
                return Err(ValidationError::AnswerOutOfRange {
                    question_id: question_id.clone(),
                    value: *value,
                });
            }
        }

        Ok(())
    }
}

/// Validation errors raised before any scoring happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("userInfo.{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("answers contain unknown question id '{question_id}'")]
    UnknownQuestion { question_id: String },
    #[error("answer to question {question_id} must be 0, 1 or 2 (found {value})")]
    AnswerOutOfRange { question_id: String, value: u8 },
}

/// The three scored areas of the questionnaire, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Structure,
    Acquisition,
    Value,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Structure, Area::Acquisition, Area::Value];

    pub const fn max_score(self) -> i32 {
        match self {
            Self::Structure => 20,
            Self::Acquisition => 18,
            Self::Value => 6,
        }
    }

    /// Heading used in reports and the model prompt.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Structure => "Structure interne",
            Self::Acquisition => "Moteur d'acquisition",
            Self::Value => "Valeur & revendabilité",
        }
    }

    /// Inline form interpolated into narrative sentences.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "structure interne",
            Self::Acquisition => "moteur d'acquisition",
            Self::Value => "valeur & revendabilité",
        }
    }
}

/// Maturity classification derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Artisanal,
    Transition,
    Machine,
}

impl Segment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Artisanal => "artisanal",
            Self::Transition => "transition",
            Self::Machine => "machine",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Artisanal => "Conciergerie artisanale fragile",
            Self::Transition => "Entreprise en transition",
            Self::Machine => "Machine en devenir",
        }
    }
}
