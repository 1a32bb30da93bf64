use crate::infra::{load_roster, InMemoryStudentStore};
use clap::Args;
use mock_placement::config::PlacementConfig;
use mock_placement::error::AppError;
use mock_placement::placement::PlacementEngine;
use mock_placement::roster::report::views::{CountEntry, DashboardView, ReportView};
use mock_placement::roster::RosterService;
use mock_placement::spreadsheet::ImportSummary;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// JSON array of student records to start from
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Student spreadsheet (CSV) applied on top of the roster
    #[arg(long)]
    pub(crate) students_csv: Option<PathBuf>,
    /// Mock test spreadsheet (CSV) applied after the student import
    #[arg(long)]
    pub(crate) mock_tests_csv: Option<PathBuf>,
    /// Number of top performers to list
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Optional school directory JSON (defaults to the built-in directory)
    #[arg(long)]
    pub(crate) schools: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let mut placement = PlacementConfig::from_env()?;
    if let Some(path) = &args.schools {
        placement.school_directory = Some(path.clone());
    }
    let (dashboard, report, imports) = build_report(&args, &placement)?;

    for (label, summary) in &imports {
        render_import(label, summary);
    }
    render_dashboard(&dashboard);
    render_report(&report);
    Ok(())
}

pub(crate) fn build_report(
    args: &ReportArgs,
    placement: &PlacementConfig,
) -> Result<(DashboardView, ReportView, Vec<(&'static str, ImportSummary)>), AppError> {
    let engine = Arc::new(PlacementEngine::new(Arc::new(placement.load_directory()?)));
    let roster = match &args.roster {
        Some(path) => load_roster(path)?,
        None => Vec::new(),
    };
    let service = RosterService::new(Arc::new(InMemoryStudentStore::seeded(roster)), engine)
        .with_top_performers(args.top.unwrap_or(placement.top_performers));

    let mut imports = Vec::new();
    if let Some(path) = &args.students_csv {
        let reader = BufReader::new(File::open(path)?);
        imports.push(("students", service.import_students(reader)?));
    }
    if let Some(path) = &args.mock_tests_csv {
        let reader = BufReader::new(File::open(path)?);
        imports.push(("mock tests", service.import_mock_tests(reader)?));
    }

    let analytics = service.analytics(None)?;
    Ok((analytics.dashboard(), analytics.report(), imports))
}

fn render_import(label: &str, summary: &ImportSummary) {
    println!(
        "Imported {label}: {} ok, {} skipped",
        summary.imported, summary.failed
    );
    for failure in &summary.failures {
        println!("  - row {}: {}", failure.row, failure.reason);
    }
}

fn render_dashboard(dashboard: &DashboardView) {
    println!("\nRoster dashboard");
    println!(
        "- {} students ({} with mock results)",
        dashboard.total_students, dashboard.students_with_tests
    );
    println!(
        "- Average aggregate {:.1} | improvement rate {:.1}%",
        dashboard.average_aggregate, dashboard.improvement_rate
    );

    if dashboard.top_performers.is_empty() {
        println!("Top performers: none yet");
    } else {
        println!("Top performers:");
        for (rank, entry) in dashboard.top_performers.iter().enumerate() {
            println!(
                "  {}. {} ({}) aggregate {} | {} -> {}",
                rank + 1,
                entry.name,
                entry.index_number,
                entry.aggregate,
                entry.category.short_label(),
                entry.predicted_school
            );
        }
    }

    render_counts("Gender", &dashboard.gender_distribution);
    render_counts("Performance", &dashboard.performance_distribution);
}

fn render_report(report: &ReportView) {
    println!("\nSubject averages (latest tests)");
    for entry in &report.subject_performance {
        println!("  - {}: {:.1}", entry.label, entry.value);
    }

    if !report.improvement_trend.is_empty() {
        println!("Most improved:");
        for entry in &report.improvement_trend {
            println!("  - {}: {:+}", entry.student, entry.improvement);
        }
    }

    render_counts("Predicted schools", &report.top_schools);
}

fn render_counts(title: &str, entries: &[CountEntry]) {
    if entries.is_empty() {
        return;
    }
    let line = entries
        .iter()
        .map(|entry| format!("{} {}", entry.label, entry.value))
        .collect::<Vec<_>>()
        .join(" | ");
    println!("{title}: {line}");
}
