use super::super::domain::{Area, Segment};
use super::super::report::{AreaAnalysis, ExtendedAnalysis, Roadmap, RoadmapPhase, Valorisation};
use super::super::scoring::{AreaStatus, ScoreProfile};
use super::templates::{interpolate, Placeholders};

struct AreaCopy {
    area: Area,
    fragile: &'static str,
    consolidating: &'static str,
    solid: &'static str,
    quick_wins: [&'static str; 3],
}

impl AreaCopy {
    fn diagnostic(&self, status: AreaStatus) -> &'static str {
        match status {
            AreaStatus::Fragile => self.fragile,
            AreaStatus::Consolidating => self.consolidating,
            AreaStatus::Solid => self.solid,
        }
    }
}

static AREA_COPY: [AreaCopy; 3] = [
    AreaCopy {
        area: Area::Structure,
        fragile: "{first_name}, ta structure interne tient surtout grâce à toi. Les rôles sont flous, les process critiques ne sont pas écrits et l'information circule par messages épars : au moindre imprévu, c'est toi qui éteins l'incendie.\n\nTant que cette base n'est pas posée, chaque nouveau logement ajoute de la charge plutôt que de la marge. La priorité est de sortir les savoir-faire de ta tête pour les rendre transmissibles.",
        consolidating: "Ta structure interne a commencé à se professionnaliser : certaines fonctions sont déléguées et tu disposes d'outils. Mais les process restent partiels et la synchronisation des informations dépend encore de vérifications manuelles.\n\nC'est typiquement le stade où tout fonctionne tant que le volume reste stable. Pour absorber de la croissance, il faut finir le travail : process écrits pour chaque situation critique et outils connectés entre eux.",
        solid: "Ta structure interne est un vrai point fort. Les rôles sont clairs, les process existent et tu pilotes avec une vision logement par logement.\n\nL'enjeu n'est plus de structurer mais d'entretenir : revues régulières des process, indicateurs partagés avec l'équipe et montée en compétence des personnes clés pour que la structure reste solide pendant la croissance.",
        quick_wins: [
            "Écrire en une page le process d'onboarding d'un nouveau logement",
            "Centraliser toutes les tâches de l'équipe dans un seul outil partagé",
            "Suivre chaque mois CA, marge et taux d'occupation par logement",
        ],
    },
    AreaCopy {
        area: Area::Acquisition,
        fragile: "{first_name}, tes nouveaux propriétaires arrivent surtout par le bouche-à-oreille et le hasard. Sans site orienté propriétaires, sans fiche Google travaillée et sans suivi des leads, ta croissance dépend de facteurs que tu ne contrôles pas.\n\nLe risque : des mois sans nouvelle signature, puis un afflux que ta structure ne sait pas absorber. Un moteur d'acquisition local, même simple, rend la croissance pilotable.",
        consolidating: "Ton acquisition commence à s'organiser : quelques canaux existent et tu reçois des demandes régulières. Mais les leads ne sont pas toujours suivis, les \"pas maintenant\" se perdent et tu ne connais pas précisément ton coût d'acquisition.\n\nEn structurant le suivi des leads et le nurturing, tu peux transformer un flux irrégulier en pipeline prévisible sans forcément augmenter ton budget.",
        solid: "Ton moteur d'acquisition est en place : canaux identifiés, leads suivis et chiffres d'acquisition maîtrisés.\n\nLa marge de progression se situe dans l'optimisation : tester de nouveaux canaux locaux, améliorer le taux de conversion des rendez-vous et anticiper ta capacité d'absorption avant chaque accélération.",
        quick_wins: [
            "Optimiser ta fiche Google My Business avec avis et photos récents",
            "Créer une page dédiée aux propriétaires avec un formulaire de contact",
            "Lister tous tes leads propriétaires dans un CRM avec une date de relance",
        ],
    },
    AreaCopy {
        area: Area::Value,
        fragile: "{first_name}, aujourd'hui la valeur de ta conciergerie est essentiellement ta personne. Les contrats sont courts, la relation propriétaire passe par toi et un banquier y verrait une activité fragile plutôt qu'un actif.\n\nTant que cette dépendance persiste, ta valeur de revente reste faible et ta capacité à financer ta croissance limitée.",
        consolidating: "Ta conciergerie commence à avoir une valeur propre : un portefeuille correct et une activité qui tourne. Mais la relation propriétaire reste très centrée sur toi et les chiffres ne sont pas encore présentables à un investisseur.\n\nStructurer les contrats et documenter la performance sont les deux leviers les plus rapides pour augmenter la valeur perçue.",
        solid: "Ta conciergerie ressemble déjà à un actif : contrats structurés, relation propriétaire portée par l'entreprise et chiffres lisibles.\n\nPour maximiser la valeur, il reste à sécuriser la récurrence du portefeuille et à préparer un dossier financier que banquier ou repreneur peuvent lire sans toi.",
        quick_wins: [
            "Passer les contrats propriétaires sur une durée d'un an reconductible",
            "Présenter les propriétaires à un interlocuteur de l'équipe autre que toi",
            "Préparer un tableau de bord annuel lisible par un banquier",
        ],
    },
];

fn area_copy(area: Area) -> &'static AreaCopy {
    match area {
        Area::Structure => &AREA_COPY[0],
        Area::Acquisition => &AREA_COPY[1],
        Area::Value => &AREA_COPY[2],
    }
}

fn analyze_area(profile: &ScoreProfile, area: Area, values: &Placeholders<'_>) -> AreaAnalysis {
    let copy = area_copy(area);
    debug_assert_eq!(copy.area, area);
    let percentage = profile.percentage(area);
    let status = AreaStatus::from_percentage(percentage);

    AreaAnalysis {
        score: profile.scores.score_for(area),
        percentage,
        status: status.label(),
        diagnostic: interpolate(copy.diagnostic(status), values),
        quick_wins: copy.quick_wins.to_vec(),
    }
}

fn valorisation(segment: Segment) -> Valorisation {
    match segment {
        Segment::Artisanal => Valorisation {
            actuelle: "0,3x à 0,5x le chiffre d'affaires annuel",
            potentielle: "0,8x à 1,2x le chiffre d'affaires annuel",
            ecart: "Jusqu'à 2 à 3 fois la valeur actuelle",
            explication: "Aujourd'hui, un repreneur achèterait surtout ton carnet d'adresses et ta présence : sans toi, le portefeuille risque de partir. En documentant les process, en contractualisant proprement les propriétaires et en suivant des indicateurs fiables, tu transformes un job en actif transmissible.",
        },
        Segment::Transition => Valorisation {
            actuelle: "0,5x à 0,8x le chiffre d'affaires annuel",
            potentielle: "1x à 1,5x le chiffre d'affaires annuel",
            ecart: "+50 % à +90 % de valeur",
            explication: "Les fondations existent, mais un acquéreur appliquerait une décote pour la dépendance au gérant et l'irrégularité de l'acquisition. Consolider la structure et rendre la croissance prévisible fait disparaître l'essentiel de cette décote.",
        },
        Segment::Machine => Valorisation {
            actuelle: "0,8x à 1,2x le chiffre d'affaires annuel",
            potentielle: "1,5x à 2x le chiffre d'affaires annuel",
            ecart: "+40 % à +70 % de valeur",
            explication: "Ta conciergerie est déjà finançable. Les derniers points de multiple se gagnent sur la récurrence du portefeuille, la prévisibilité de l'acquisition et la qualité du reporting financier présenté aux investisseurs.",
        },
    }
}

fn roadmap(segment: Segment, values: &Placeholders<'_>) -> Roadmap {
    match segment {
        Segment::Artisanal => Roadmap {
            titre: "Feuille de route : de l'artisanat à l'entreprise",
            phases: [
                RoadmapPhase {
                    periode: "Jours 1-30",
                    objectif: "Reprendre du temps sur l'opérationnel".to_string(),
                    actions: [
                        "Lister toutes les tâches récurrentes et leur responsable",
                        "Écrire les 3 process les plus critiques (ménage, check-in, incidents)",
                        "Choisir un outil unique de gestion des tâches",
                    ],
                },
                RoadmapPhase {
                    periode: "Jours 31-90",
                    objectif: "Déléguer les fonctions clés".to_string(),
                    actions: [
                        "Confier la gestion voyageurs à une personne formée",
                        "Connecter PMS et channel manager pour supprimer la double saisie",
                        "Mettre en place un point hebdomadaire de pilotage",
                    ],
                },
                RoadmapPhase {
                    periode: "Mois 4-6",
                    objectif: "Piloter par les chiffres".to_string(),
                    actions: [
                        "Suivre CA, marge et occupation logement par logement",
                        "Identifier les logements non rentables",
                        "Fixer des objectifs trimestriels",
                    ],
                },
                RoadmapPhase {
                    periode: "Mois 7-12",
                    objectif: "Lancer un moteur d'acquisition local".to_string(),
                    actions: [
                        "Optimiser la fiche Google My Business",
                        "Créer une page propriétaires sur ton site",
                        "Suivre chaque lead propriétaire jusqu'à la signature",
                    ],
                },
            ],
        },
        Segment::Transition => Roadmap {
            titre: "Feuille de route : consolider puis accélérer",
            phases: [
                RoadmapPhase {
                    periode: "Jours 1-30",
                    objectif: interpolate("Renforcer en priorité : {weakest}", values),
                    actions: [
                        "Auditer les process et outils existants",
                        "Identifier les 3 points de friction les plus coûteux",
                        "Définir un responsable pour chaque fonction clé",
                    ],
                },
                RoadmapPhase {
                    periode: "Jours 31-90",
                    objectif: "Installer un moteur d'acquisition régulier".to_string(),
                    actions: [
                        "Structurer le suivi des leads dans un CRM",
                        "Relancer les \"pas maintenant\" avec une séquence mensuelle",
                        "Publier du contenu destiné aux propriétaires chaque semaine",
                    ],
                },
                RoadmapPhase {
                    periode: "Mois 4-6",
                    objectif: "Rendre la croissance prévisible".to_string(),
                    actions: [
                        "Mesurer coût et délai d'acquisition d'un logement",
                        "Anticiper la capacité d'absorption de l'équipe",
                        "Automatiser le reporting mensuel",
                    ],
                },
                RoadmapPhase {
                    periode: "Mois 7-12",
                    objectif: "Augmenter la valeur de l'entreprise".to_string(),
                    actions: [
                        "Allonger la durée des contrats propriétaires",
                        "Réduire la dépendance au gérant sur la relation propriétaire",
                        "Préparer un dossier financier présentable",
                    ],
                },
            ],
        },
        Segment::Machine => Roadmap {
            titre: "Feuille de route : optimiser et valoriser",
            phases: [
                RoadmapPhase {
                    periode: "Jours 1-30",
                    objectif: "Affiner les indicateurs".to_string(),
                    actions: [
                        "Fiabiliser le calcul de marge par logement",
                        "Suivre le churn propriétaires chaque mois",
                        "Partager un tableau de bord avec l'équipe",
                    ],
                },
                RoadmapPhase {
                    periode: "Jours 31-90",
                    objectif: "Optimiser le moteur d'acquisition".to_string(),
                    actions: [
                        "Tester un nouveau canal d'acquisition local",
                        "Améliorer le taux de conversion des rendez-vous",
                        "Mettre en place un programme de recommandation propriétaires",
                    ],
                },
                RoadmapPhase {
                    periode: "Mois 4-6",
                    objectif: "Sécuriser l'équipe".to_string(),
                    actions: [
                        "Former un second niveau de management",
                        "Documenter les décisions de pilotage",
                        "Mettre en place des objectifs individuels",
                    ],
                },
                RoadmapPhase {
                    periode: "Mois 7-12",
                    objectif: "Maximiser la valeur de revente".to_string(),
                    actions: [
                        "Faire auditer les comptes et les contrats",
                        "Présenter le dossier à un banquier ou un investisseur",
                        "Étudier les options de croissance externe",
                    ],
                },
            ],
        },
    }
}

pub(crate) fn extended_analysis(
    profile: &ScoreProfile,
    values: &Placeholders<'_>,
) -> ExtendedAnalysis {
    ExtendedAnalysis {
        structure_analysis: analyze_area(profile, Area::Structure, values),
        acquisition_analysis: analyze_area(profile, Area::Acquisition, values),
        value_analysis: analyze_area(profile, Area::Value, values),
        valorisation: valorisation(profile.segment),
        roadmap: roadmap(profile.segment, values),
    }
}
