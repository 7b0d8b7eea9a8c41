use crate::infra::{InMemoryScholarshipCatalog, InMemoryStudentDirectory};
use chrono::NaiveDate;
use clap::Args;
use scholar_fit::config::{AppConfig, CorpusConfig};
use scholar_fit::error::AppError;
use scholar_fit::import::ScholarshipCsvImporter;
use scholar_fit::matching::{
    Dimension, FeatureVector, MatchService, MatchingConfig, RecommendationSet, ScholarshipId,
    ScholarshipRecord, StudentId, StudentRecord, WeightVector,
};
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) const DEMO_STUDENT_ID: &str = "stu-avery";

type DemoService = MatchService<InMemoryStudentDirectory, InMemoryScholarshipCatalog>;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Drop scholarships whose deadline falls before this date (YYYY-MM-DD).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Number of recommendations to print.
    #[arg(long, default_value_t = 3)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Student to rank scholarships for (see the demo roster).
    #[arg(long, default_value = DEMO_STUDENT_ID)]
    pub(crate) student_id: String,
    /// Maximum number of recommendations (defaults to MATCH_DEFAULT_LIMIT).
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Drop scholarships whose deadline falls before this date (YYYY-MM-DD).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Scholarship corpus CSV; falls back to MATCH_CORPUS_CSV, then the built-in demo corpus.
    #[arg(long)]
    pub(crate) corpus_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemandArgs {
    /// Scholarship corpus CSV; falls back to MATCH_CORPUS_CSV, then the built-in demo corpus.
    #[arg(long)]
    pub(crate) corpus_csv: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of, limit } = args;
    let student = demo_student();
    let service = build_service(demo_corpus(), MatchingConfig::default());

    println!("Scholarship fit demo for {} ({})", student.name, student.id);

    let report = service.score(&student.id, &ScholarshipId("merit-excellence".to_string()))?;
    let scores = report.fit.view();
    println!(
        "\n{}: overall {} | personality {} | winner {}",
        report.scholarship_name, scores.overall_fit, scores.personality_fit, scores.winner_fit
    );
    println!("Contribution breakdown:");
    for contribution in &report.contributions {
        println!("  - {}", contribution.note());
    }

    let recommendations = service.recommend(&student.id, Some(limit), as_of)?;
    render_recommendations(&student.id, &recommendations);

    let demand = service.demand()?;
    render_demand(&demand.view());
    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs, config: AppConfig) -> Result<(), AppError> {
    let RecommendArgs {
        student_id,
        limit,
        as_of,
        corpus_csv,
    } = args;

    let corpus = load_corpus(corpus_source(corpus_csv, &config.corpus))?;
    let service = build_service(corpus, config.matching);
    let student_id = StudentId(student_id);
    let recommendations = service.recommend(&student_id, limit, as_of)?;
    render_recommendations(&student_id, &recommendations);
    Ok(())
}

pub(crate) fn run_demand(args: DemandArgs, config: AppConfig) -> Result<(), AppError> {
    let corpus = load_corpus(corpus_source(args.corpus_csv, &config.corpus))?;
    let service = build_service(corpus, config.matching);
    render_demand(&service.demand()?.view());
    Ok(())
}

/// `--corpus-csv` wins over `MATCH_CORPUS_CSV`.
fn corpus_source(flag: Option<PathBuf>, configured: &CorpusConfig) -> Option<PathBuf> {
    flag.or_else(|| configured.csv_path.clone())
}

pub(crate) fn load_corpus(path: Option<PathBuf>) -> Result<Vec<ScholarshipRecord>, AppError> {
    match path {
        Some(path) => ScholarshipCsvImporter::from_path(path).map_err(AppError::from),
        None => Ok(demo_corpus()),
    }
}

fn build_service(corpus: Vec<ScholarshipRecord>, config: MatchingConfig) -> DemoService {
    MatchService::new(
        Arc::new(InMemoryStudentDirectory::with_students(demo_roster())),
        Arc::new(InMemoryScholarshipCatalog::with_scholarships(corpus)),
        config,
    )
}

fn render_recommendations(student_id: &StudentId, recommendations: &RecommendationSet) {
    let view = recommendations.view(student_id);
    println!("\nRecommendations for {} ({})", view.student_id, view.source);
    if view.recommendations.is_empty() {
        println!("  none available");
    }
    for entry in &view.recommendations {
        let contributors: Vec<&str> = entry
            .top_contributors
            .iter()
            .map(|dimension| dimension.title())
            .collect();
        let deadline = entry
            .deadline
            .map(|date| format!(" | closes {date}"))
            .unwrap_or_default();
        println!(
            "  {}. {} [{}] fit {} | driven by {}{}",
            entry.rank,
            entry.name,
            entry.category,
            entry.overall_fit,
            contributors.join(", "),
            deadline
        );
    }
}

fn render_demand(view: &scholar_fit::matching::DemandView) {
    println!(
        "\nPriority demand across {} scholarships",
        view.corpus_size
    );
    for entry in &view.dimensions {
        println!("  - {}: {:.2}%", entry.title, entry.percentage);
    }
}

fn features(values: [f64; Dimension::COUNT]) -> FeatureVector {
    Dimension::ALL.into_iter().zip(values).collect()
}

fn weights(values: [f64; Dimension::COUNT]) -> WeightVector {
    Dimension::ALL.into_iter().zip(values).collect()
}

fn scholarship(
    id: &str,
    name: &str,
    category: &str,
    weight_values: [f64; Dimension::COUNT],
    priorities: &[Dimension],
    deadline: Option<NaiveDate>,
) -> ScholarshipRecord {
    ScholarshipRecord {
        id: ScholarshipId(id.to_string()),
        name: name.to_string(),
        category: category.to_string(),
        weights: weights(weight_values),
        priorities: priorities.to_vec(),
        deadline,
    }
}

pub(crate) fn demo_student() -> StudentRecord {
    StudentRecord {
        id: StudentId(DEMO_STUDENT_ID.to_string()),
        name: "Avery Chen".to_string(),
        features: features([0.8, 0.6, 0.5, 0.2, 0.7, 0.7, 0.4]),
        recommended_scholarship_ids: Vec::new(),
    }
}

/// Avery plus a student whose advisor already shortlisted three awards.
pub(crate) fn demo_roster() -> Vec<StudentRecord> {
    let advised = StudentRecord {
        id: StudentId("stu-jordan".to_string()),
        name: "Jordan Ellis".to_string(),
        features: features([0.5, 0.4, 0.8, 0.9, 0.3, 0.2, 0.9]),
        recommended_scholarship_ids: ["first-gen-promise", "resilience-fund", "civic-leaders"]
            .into_iter()
            .map(|id| ScholarshipId(id.to_string()))
            .collect(),
    };
    vec![demo_student(), advised]
}

pub(crate) fn demo_corpus() -> Vec<ScholarshipRecord> {
    vec![
        scholarship(
            "merit-excellence",
            "Merit Excellence Award",
            "Merit",
            [0.9, 0.7, 0.3, 0.1, 0.35, 0.6, 0.15],
            &[Dimension::Academics, Dimension::Leadership],
            NaiveDate::from_ymd_opt(2026, 3, 1),
        ),
        scholarship(
            "first-gen-promise",
            "First Generation Promise Grant",
            "Need-Based",
            [0.4, 0.3, 0.4, 0.9, 0.2, 0.1, 0.8],
            &[Dimension::Need, Dimension::Adversity],
            NaiveDate::from_ymd_opt(2026, 4, 15),
        ),
        scholarship(
            "stem-frontiers",
            "STEM Frontiers Research Fellowship",
            "STEM",
            [0.6, 0.2, 0.1, 0.1, 0.8, 0.9, 0.2],
            &[Dimension::Research, Dimension::Innovation, Dimension::Academics],
            NaiveDate::from_ymd_opt(2026, 2, 1),
        ),
        scholarship(
            "civic-leaders",
            "Civic Leaders Scholarship",
            "Service",
            [0.3, 0.8, 0.9, 0.2, 0.2, 0.1, 0.3],
            &[Dimension::Community, Dimension::Leadership],
            None,
        ),
        scholarship(
            "resilience-fund",
            "Resilience Fund",
            "Need-Based",
            [0.2, 0.2, 0.3, 0.7, 0.1, 0.1, 0.9],
            &[Dimension::Adversity, Dimension::Need],
            NaiveDate::from_ymd_opt(2026, 5, 30),
        ),
    ]
}
