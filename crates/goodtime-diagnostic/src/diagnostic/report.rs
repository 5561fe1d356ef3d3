use serde::{Deserialize, Serialize};

use super::domain::{Segment, UserInfo};
use super::scoring::ScoreProfile;

/// The four narrative blocks every report carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub diag_summary: String,
    pub main_blocker: String,
    pub priority: String,
    pub goodtime_recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAnalysis {
    pub score: i32,
    pub percentage: i32,
    pub status: &'static str,
    pub diagnostic: String,
    pub quick_wins: Vec<&'static str>,
}

/// Rough resale multiple today versus after restructuring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Valorisation {
    pub actuelle: &'static str,
    pub potentielle: &'static str,
    pub ecart: &'static str,
    pub explication: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapPhase {
    pub periode: &'static str,
    pub objectif: String,
    pub actions: [&'static str; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roadmap {
    pub titre: &'static str,
    pub phases: [RoadmapPhase; 4],
}

/// Sections only the extended deterministic engine produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedAnalysis {
    pub structure_analysis: AreaAnalysis,
    pub acquisition_analysis: AreaAnalysis,
    pub value_analysis: AreaAnalysis,
    pub valorisation: Valorisation,
    pub roadmap: Roadmap,
}

/// Response body of `POST /api/diagnostic/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub units: String,
    pub segment: Segment,
    pub score: i32,
    pub structure_score: i32,
    pub acquisition_score: i32,
    pub value_score: i32,
    #[serde(flatten)]
    pub narrative: Narrative,
    #[serde(flatten)]
    pub extended: Option<ExtendedAnalysis>,
}

impl DiagnosticReport {
    pub fn assemble(
        user_info: &UserInfo,
        profile: &ScoreProfile,
        narrative: Narrative,
        extended: Option<ExtendedAnalysis>,
    ) -> Self {
        Self {
            first_name: user_info.first_name.clone(),
            last_name: user_info.last_name.clone(),
            email: user_info.email.clone(),
            phone: user_info.phone.clone(),
            city: user_info.city.clone(),
            units: user_info.units.clone(),
            segment: profile.segment,
            score: profile.scores.total,
            structure_score: profile.scores.structure,
            acquisition_score: profile.scores.acquisition,
            value_score: profile.scores.value,
            narrative,
            extended,
        }
    }
}
