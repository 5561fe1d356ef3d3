//! Copy for the four narrative blocks, keyed by (segment, weakest area).
//!
//! Templates understand three placeholders: `{first_name}`, `{total}` and `{weakest}`.
//! Unknown placeholders are left untouched.

use super::super::domain::{Area, Segment};
use super::super::report::Narrative;

/// Values substituted into templates in a single pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Placeholders<'a> {
    pub first_name: &'a str,
    pub total: i32,
    pub weakest: Area,
}

impl Placeholders<'_> {
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "first_name" => Some(self.first_name.trim().to_string()),
            "total" => Some(self.total.to_string()),
            "weakest" => Some(self.weakest.label().to_string()),
            _ => None,
        }
    }
}

/// Substituted values are never rescanned, so a name containing `{total}` stays literal.
pub(crate) fn interpolate(template: &str, values: &Placeholders<'_>) -> String {
    let mut rendered = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let candidate = &rest[open..];
        match candidate.find('}') {
            Some(close) => {
                match values.lookup(&candidate[1..close]) {
                    Some(value) => rendered.push_str(&value),
                    None => rendered.push_str(&candidate[..=close]),
                }
                rest = &candidate[close + 1..];
            }
            None => {
                rendered.push_str(candidate);
                rest = "";
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NarrativeTemplate {
    pub diag_summary: &'static str,
    pub main_blocker: &'static str,
    pub priority: &'static str,
    pub goodtime_recommendation: &'static str,
}

impl NarrativeTemplate {
    pub(crate) fn render(&self, values: &Placeholders<'_>) -> Narrative {
        Narrative {
            diag_summary: interpolate(self.diag_summary, values),
            main_blocker: interpolate(self.main_blocker, values),
            priority: interpolate(self.priority, values),
            goodtime_recommendation: interpolate(self.goodtime_recommendation, values),
        }
    }
}

const ARTISANAL_SUMMARY: &str = "{first_name}, avec {total}/44, ta conciergerie repose encore presque entièrement sur toi. Tu as surtout un job amélioré, pas une entreprise : l'opérationnel absorbe tes journées, les process restent dans ta tête et la valeur de ce que tu as construit dépend de ta présence quotidienne.";

const TRANSITION_SUMMARY: &str = "{first_name}, avec {total}/44, tu as mis des choses en place, mais il reste trop de trous dans la raquette. Les fondations existent et la délégation a commencé, pourtant la machine n'est pas encore autonome et ta croissance se heurte à un plafond de verre.";

const MACHINE_SUMMARY: &str = "Bravo {first_name} : avec {total}/44, tu fais partie des rares gérants dont la conciergerie fonctionne déjà comme une vraie entreprise. Process, vision de la performance et début de moteur d'acquisition sont en place ; l'enjeu est désormais d'optimiser et de sécuriser la valeur.";

const TRANSITION_FOCUSED_RECOMMENDATION: &str = "Ta zone la plus fragile aujourd'hui : {weakest}. Goodtime peut t'accompagner pour la renforcer en priorité, puis consolider le reste de ta structure. Nous installons avec toi un moteur d'acquisition local simple, régulier et prévisible, piloté par des chiffres fiables, pour que tu puisses scaler sans te replonger dans l'opérationnel.";

/// Rows with `None` as weakest area are the segment-only copy.
static NARRATIVE_TABLE: [(Segment, Option<Area>, NarrativeTemplate); 6] = [
    (
        Segment::Artisanal,
        None,
        NarrativeTemplate {
            diag_summary: ARTISANAL_SUMMARY,
            main_blocker: "Dépendance totale au gérant",
            priority: "Sortir de l'opérationnel : écrire les process critiques et déléguer la gestion voyageurs dans les 90 prochains jours.",
            goodtime_recommendation: "Goodtime peut t'accompagner pour poser les fondations d'une vraie entreprise : clarifier les rôles, documenter les process critiques et t'équiper des bons outils pour que la conciergerie tourne sans toi. Une fois cette base stabilisée, nous installons avec toi un moteur d'acquisition local simple pour signer de nouveaux propriétaires sans dépendre uniquement du bouche-à-oreille.",
        },
    ),
    (
        Segment::Transition,
        None,
        NarrativeTemplate {
            diag_summary: TRANSITION_SUMMARY,
            main_blocker: "Plafond de verre opérationnel",
            priority: "Consolider la structure existante et installer un moteur d'acquisition simple mais régulier.",
            goodtime_recommendation: "Goodtime peut t'aider à consolider ce qui existe déjà et à installer un moteur d'acquisition local régulier et prévisible. Nous travaillons avec toi sur les process, les outils et le pilotage par les chiffres pour que tu puisses scaler sans te replonger dans l'opérationnel.",
        },
    ),
    (
        Segment::Transition,
        Some(Area::Structure),
        NarrativeTemplate {
            diag_summary: TRANSITION_SUMMARY,
            main_blocker: "Structure interne encore fragile",
            priority: "Finaliser la structuration interne : rôles clairs, process écrits et outils synchronisés avant d'accélérer la croissance.",
            goodtime_recommendation: TRANSITION_FOCUSED_RECOMMENDATION,
        },
    ),
    (
        Segment::Transition,
        Some(Area::Acquisition),
        NarrativeTemplate {
            diag_summary: TRANSITION_SUMMARY,
            main_blocker: "Acquisition dépendante du bouche-à-oreille",
            priority: "Installer un moteur d'acquisition local : fiche Google optimisée, site orienté propriétaires et suivi des leads dans un CRM.",
            goodtime_recommendation: TRANSITION_FOCUSED_RECOMMENDATION,
        },
    ),
    (
        Segment::Transition,
        Some(Area::Value),
        NarrativeTemplate {
            diag_summary: TRANSITION_SUMMARY,
            main_blocker: "Valeur trop liée à ta personne",
            priority: "Rendre l'entreprise transmissible : contrats propriétaires structurés, indicateurs suivis et dépendance au gérant réduite.",
            goodtime_recommendation: TRANSITION_FOCUSED_RECOMMENDATION,
        },
    ),
    (
        Segment::Machine,
        None,
        NarrativeTemplate {
            diag_summary: MACHINE_SUMMARY,
            main_blocker: "Optimisation et scaling",
            priority: "Affiner les chiffres d'acquisition et sécuriser l'équipe pour scaler sereinement.",
            goodtime_recommendation: "Goodtime peut t'aider à passer un cap : rendre ton moteur d'acquisition local vraiment prévisible, fiabiliser tes indicateurs et préparer ton entreprise à être finançable et revendable. Nous t'accompagnons pour transformer une structure solide en actif valorisable.",
        },
    ),
];

fn find(segment: Segment, weakest: Option<Area>) -> Option<&'static NarrativeTemplate> {
    NARRATIVE_TABLE
        .iter()
        .find(|(row_segment, row_weakest, _)| *row_segment == segment && *row_weakest == weakest)
        .map(|(_, _, template)| template)
}

/// Copy that ignores the weakest area entirely.
pub(crate) fn segment_template(segment: Segment) -> &'static NarrativeTemplate {
    match find(segment, None) {
        Some(template) => template,
        // Every segment has a segment-only row.
        None => &NARRATIVE_TABLE[0].2,
    }
}

/// Most specific copy for the pair, falling back to the segment-only row.
pub(crate) fn lookup(segment: Segment, weakest: Area) -> &'static NarrativeTemplate {
    find(segment, Some(weakest)).unwrap_or_else(|| segment_template(segment))
}
