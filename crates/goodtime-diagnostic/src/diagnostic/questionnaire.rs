//! The 22-question catalog behind the diagnostic, grouped into the three scored areas.

use super::domain::Area;

/// Highest value a single answer can take.
pub const MAX_ANSWER_VALUE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u8,
    pub area: Area,
    pub title: &'static str,
}

pub static QUESTIONS: [Question; 22] = [
    Question {
        id: 1,
        area: Area::Structure,
        title: "Rôle au quotidien (opérationnel vs pilotage)",
    },
    Question {
        id: 2,
        area: Area::Structure,
        title: "Capacité à s'absenter 10 jours",
    },
    Question {
        id: 3,
        area: Area::Structure,
        title: "Clarté des rôles et responsabilités",
    },
    Question {
        id: 4,
        area: Area::Structure,
        title: "Répartition des fonctions clés",
    },
    Question {
        id: 5,
        area: Area::Structure,
        title: "Process écrits pour situations critiques",
    },
    Question {
        id: 6,
        area: Area::Structure,
        title: "Gestion des tâches (outils)",
    },
    Question {
        id: 7,
        area: Area::Structure,
        title: "Qualité du stack outils (PMS, automatisations)",
    },
    Question {
        id: 8,
        area: Area::Structure,
        title: "Synchronisation des informations",
    },
    Question {
        id: 9,
        area: Area::Structure,
        title: "Vision logement par logement (performance)",
    },
    Question {
        id: 10,
        area: Area::Structure,
        title: "Suivi des indicateurs clés (CA, marge, occupation)",
    },
    Question {
        id: 11,
        area: Area::Acquisition,
        title: "Origine des nouveaux propriétaires",
    },
    Question {
        id: 12,
        area: Area::Acquisition,
        title: "Capacité d'absorption de nouveaux logements",
    },
    Question {
        id: 13,
        area: Area::Acquisition,
        title: "Site internet (SEO local)",
    },
    Question {
        id: 14,
        area: Area::Acquisition,
        title: "Fiche Google My Business",
    },
    Question {
        id: 15,
        area: Area::Acquisition,
        title: "Réseaux sociaux côté propriétaires",
    },
    Question {
        id: 16,
        area: Area::Acquisition,
        title: "Gestion des leads propriétaires (CRM)",
    },
    Question {
        id: 17,
        area: Area::Acquisition,
        title: "Nurturing des \"pas maintenant\"",
    },
    Question {
        id: 18,
        area: Area::Acquisition,
        title: "Maîtrise des chiffres d'acquisition",
    },
    Question {
        id: 19,
        area: Area::Acquisition,
        title: "Prévisibilité globale de l'acquisition",
    },
    Question {
        id: 20,
        area: Area::Value,
        title: "Dépendance à la personne du gérant",
    },
    Question {
        id: 21,
        area: Area::Value,
        title: "Qualité du portefeuille propriétaires (contrats)",
    },
    Question {
        id: 22,
        area: Area::Value,
        title: "Regard d'un banquier/investisseur sur le business",
    },
];

pub fn question(id: u8) -> Option<&'static Question> {
    QUESTIONS.iter().find(|question| question.id == id)
}

pub fn questions_for(area: Area) -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(move |question| question.area == area)
}

/// Plain-text taxonomy handed to the language model alongside the answers.
pub fn taxonomy_text() -> String {
    let mut text = String::new();
    for (index, area) in Area::ALL.into_iter().enumerate() {
        let ids: Vec<u8> = questions_for(area).map(|question| question.id).collect();
        let first = ids.first().copied().unwrap_or_default();
        let last = ids.last().copied().unwrap_or_default();
        if index > 0 {
            text.push('\n');
        }
        text.push_str(&format!(
            "BLOC {} - {} (Q{}-Q{}, max {} pts):\n",
            index + 1,
            area.title().to_uppercase(),
            first,
            last,
            area.max_score()
        ));
        for question in questions_for(area) {
            text.push_str(&format!("- Q{}: {}\n", question.id, question.title));
        }
    }

    text.push_str(
        "\nSCORING:\n\
         - 0 = situation problématique/artisanale\n\
         - 1 = en cours de structuration mais fragile\n\
         - 2 = bien structuré/professionnel\n\
         \nSEGMENTS:\n\
         - 0-18 pts: \"artisanal\" (conciergerie artisanale fragile)\n\
         - 19-32 pts: \"transition\" (entreprise en transition)\n\
         - 33-44 pts: \"machine\" (machine en devenir)\n",
    );
    text
}
