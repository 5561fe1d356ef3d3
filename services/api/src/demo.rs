use clap::Args;
use goodtime_diagnostic::diagnostic::{
    narrative, Area, DiagnosticReport, DiagnosticRequest, DiagnosticServiceError, ScoreBundle,
    UserInfo,
};
use goodtime_diagnostic::error::AppError;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Submission JSON file in the `/api/diagnostic/analyze` request format
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.input)?;
    let report = build_report(&raw)?;
    print_report(&report, args.json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Goodtime diagnostic demo");
    for request in demo_requests() {
        let report = narrative::extended_report(&request);
        println!();
        print_report(&report, args.json)?;
    }
    Ok(())
}

pub(crate) fn build_report(raw: &str) -> Result<DiagnosticReport, AppError> {
    let request: DiagnosticRequest = serde_json::from_str(raw)?;
    request.validate().map_err(DiagnosticServiceError::from)?;
    Ok(narrative::extended_report(&request))
}

fn print_report(report: &DiagnosticReport, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_report(report));
    }
    Ok(())
}

pub(crate) fn render_report(report: &DiagnosticReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} ({}, {} logements)\n",
        report.first_name, report.last_name, report.city, report.units
    ));
    out.push_str(&format!(
        "Segment: {} | score {}/44\n",
        report.segment.display_name(),
        report.score
    ));

    match &report.extended {
        Some(extended) => {
            for (title, analysis) in [
                (Area::Structure.title(), &extended.structure_analysis),
                (Area::Acquisition.title(), &extended.acquisition_analysis),
                (Area::Value.title(), &extended.value_analysis),
            ] {
                out.push_str(&format!(
                    "- {}: {} ({}%) {}\n",
                    title, analysis.score, analysis.percentage, analysis.status
                ));
                for quick_win in &analysis.quick_wins {
                    out.push_str(&format!("    * {quick_win}\n"));
                }
            }
        }
        None => {
            out.push_str(&format!(
                "- Structure {} | Acquisition {} | Valeur {}\n",
                report.structure_score, report.acquisition_score, report.value_score
            ));
        }
    }

    out.push_str(&format!("Résumé: {}\n", report.narrative.diag_summary));
    out.push_str(&format!("Blocage principal: {}\n", report.narrative.main_blocker));
    out.push_str(&format!("Priorité 90 jours: {}\n", report.narrative.priority));
    out.push_str(&format!(
        "Recommandation: {}\n",
        report.narrative.goodtime_recommendation
    ));

    if let Some(extended) = &report.extended {
        out.push_str(&format!(
            "Valorisation: {} -> {} ({})\n",
            extended.valorisation.actuelle,
            extended.valorisation.potentielle,
            extended.valorisation.ecart
        ));
        out.push_str(&format!("{}\n", extended.roadmap.titre));
        for phase in &extended.roadmap.phases {
            out.push_str(&format!("  {}: {}\n", phase.periode, phase.objectif));
        }
    }

    out
}

fn demo_request(
    first_name: &str,
    city: &str,
    units: &str,
    structure: i32,
    acquisition: i32,
    value: i32,
) -> DiagnosticRequest {
    DiagnosticRequest {
        user_info: UserInfo {
            first_name: first_name.to_string(),
            last_name: "Demo".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: String::new(),
            city: city.to_string(),
            units: units.to_string(),
        },
        answers: BTreeMap::new(),
        scores: ScoreBundle {
            total: structure + acquisition + value,
            structure,
            acquisition,
            value,
        },
    }
}

pub(crate) fn demo_requests() -> [DiagnosticRequest; 3] {
    [
        demo_request("Marie", "Nice", "15", 6, 4, 2),
        demo_request("Jean", "Lyon", "30", 10, 9, 3),
        demo_request("Sophie", "Bordeaux", "60", 18, 15, 5),
    ]
}
