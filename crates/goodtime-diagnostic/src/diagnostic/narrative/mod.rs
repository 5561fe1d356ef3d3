//! Deterministic score-to-narrative mapping.

mod extended;
mod templates;

use super::domain::{DiagnosticRequest, UserInfo};
use super::report::{DiagnosticReport, Narrative};
use super::scoring::ScoreProfile;

use templates::Placeholders;

fn placeholders<'a>(user_info: &'a UserInfo, profile: &ScoreProfile) -> Placeholders<'a> {
    Placeholders {
        first_name: &user_info.first_name,
        total: profile.scores.total,
        weakest: profile.weakest,
    }
}

/// Four narrative blocks, refined by weakest area for the transition segment.
pub fn compose(user_info: &UserInfo, profile: &ScoreProfile) -> Narrative {
    templates::lookup(profile.segment, profile.weakest).render(&placeholders(user_info, profile))
}

/// Segment-only copy, used when a generated narrative cannot be trusted.
pub fn segment_fallback(user_info: &UserInfo, profile: &ScoreProfile) -> Narrative {
    templates::segment_template(profile.segment).render(&placeholders(user_info, profile))
}

/// Full report with per-area analyses, valuation estimate and roadmap.
pub fn extended_report(request: &DiagnosticRequest) -> DiagnosticReport {
    let profile = ScoreProfile::from_scores(request.scores);
    let narrative = compose(&request.user_info, &profile);
    let extended =
        extended::extended_analysis(&profile, &placeholders(&request.user_info, &profile));
    DiagnosticReport::assemble(&request.user_info, &profile, narrative, Some(extended))
}
