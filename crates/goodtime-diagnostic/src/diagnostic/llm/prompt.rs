use super::super::domain::{Area, DiagnosticRequest};
use super::super::questionnaire;
use super::super::scoring::ScoreProfile;

pub(crate) const SYSTEM_MESSAGE: &str = "Tu es un expert des conciergeries de location courte durée. Tu réponds uniquement avec un objet JSON valide, sans mise en forme Markdown.";

/// Chat prompt sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    pub system: String,
    pub user: String,
}

/// `Q<id>: <value>/2` lines in numeric question order.
fn answer_lines(request: &DiagnosticRequest) -> Vec<String> {
    let mut answers: Vec<(u8, u8)> = request
        .answers
        .iter()
        .map(|(id, value)| (id.trim().parse::<u8>().unwrap_or(u8::MAX), *value))
        .collect();
    answers.sort_unstable();
    answers
        .into_iter()
        .map(|(id, value)| format!("Q{id}: {value}/2"))
        .collect()
}

pub(crate) fn build(request: &DiagnosticRequest, profile: &ScoreProfile) -> CompletionPrompt {
    let user_info = &request.user_info;
    let scores = &profile.scores;

    let user = format!(
        "Analyse ce diagnostic pour {first} {last}.\n\n\
         PROFIL :\n\
         - Ville : {city}\n\
         - Logements gérés : {units}\n\n\
         SCORES :\n\
         - Total : {total}/44\n\
         - {structure_title} : {structure}/{structure_max}\n\
         - {acquisition_title} : {acquisition}/{acquisition_max}\n\
         - {value_title} : {value}/{value_max}\n\n\
         RÉPONSES DÉTAILLÉES :\n{answers}\n\n\
         CONTEXTE DES QUESTIONS :\n{taxonomy}\n\
         SEGMENT DÉTERMINÉ : {segment}\n\n\
         Rédige en français une analyse personnalisée contenant :\n\
         1. \"diagSummary\" : 2 à 3 phrases directes qui résument la situation (utilise le prénom).\n\
         2. \"mainBlocker\" : le principal blocage en 2 à 6 mots.\n\
         3. \"priority\" : la priorité n°1 des 90 prochains jours, en une phrase concrète.\n\
         4. \"goodtimeRecommendation\" : 3 à 5 phrases sur la façon dont Goodtime peut aider (structuration et moteur d'acquisition local).\n\n\
         Ton professionnel, direct et orienté business.\n\n\
         Réponds UNIQUEMENT avec ce JSON :\n\
         {{\"diagSummary\": \"...\", \"mainBlocker\": \"...\", \"priority\": \"...\", \"goodtimeRecommendation\": \"...\"}}",
        first = user_info.first_name,
        last = user_info.last_name,
        city = user_info.city,
        units = user_info.units,
        total = scores.total,
        structure_title = Area::Structure.title(),
        structure = scores.structure,
        structure_max = Area::Structure.max_score(),
        acquisition_title = Area::Acquisition.title(),
        acquisition = scores.acquisition,
        acquisition_max = Area::Acquisition.max_score(),
        value_title = Area::Value.title(),
        value = scores.value,
        value_max = Area::Value.max_score(),
        answers = answer_lines(request).join("\n"),
        taxonomy = questionnaire::taxonomy_text(),
        segment = profile.segment.as_str(),
    );

    CompletionPrompt {
        system: SYSTEM_MESSAGE.to_string(),
        user,
    }
}
