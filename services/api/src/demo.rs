use crate::infra::{engine_from_config, parse_score_arg, InMemoryHistoryStore, ScoreArg};
use clap::{Args, ValueEnum};
use gradecalc::config::AppConfig;
use gradecalc::error::AppError;
use gradecalc::grading::{
    classify, Calculation, CalculationRequest, ComponentInput, ComponentSet, CourseInput,
    CourseStanding, GradeEngine, GradeService, GradeSheetRequest, LetterGrade, WeightingScheme,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SchemeArg {
    #[default]
    Midterm,
    Committee,
}

impl From<SchemeArg> for WeightingScheme {
    fn from(value: SchemeArg) -> Self {
        match value {
            SchemeArg::Midterm => WeightingScheme::Midterm,
            SchemeArg::Committee => WeightingScheme::Committee,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct MinimumFinalArgs {
    /// Component layout used when --weights is omitted
    #[arg(long, value_enum, default_value_t = SchemeArg::Midterm)]
    pub(crate) scheme: SchemeArg,
    /// Weights of the graded components; the final takes the remainder of 100
    #[arg(long, value_delimiter = ',')]
    pub(crate) weights: Vec<f64>,
    /// Scores of the graded components, in order (`-` leaves one unset)
    #[arg(long, value_delimiter = ',', required = true, value_parser = parse_score_arg)]
    pub(crate) scores: Vec<ScoreArg>,
    /// Passing grade (defaults to GRADE_PASSING_GRADE or 60)
    #[arg(long)]
    pub(crate) passing_grade: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct YearEndArgs {
    /// Component layout used when --weights is omitted
    #[arg(long, value_enum, default_value_t = SchemeArg::Midterm)]
    pub(crate) scheme: SchemeArg,
    /// Weights of the graded components; the final takes the remainder of 100
    #[arg(long, value_delimiter = ',')]
    pub(crate) weights: Vec<f64>,
    /// Scores of the graded components, in order
    #[arg(long, value_delimiter = ',', required = true, value_parser = parse_score_arg)]
    pub(crate) scores: Vec<ScoreArg>,
    /// Score of the final component
    #[arg(long)]
    pub(crate) final_score: f64,
    /// Passing grade (defaults to GRADE_PASSING_GRADE or 60)
    #[arg(long)]
    pub(crate) passing_grade: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Course score to classify
    #[arg(allow_negative_numbers = true)]
    pub(crate) score: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Passing grade used throughout the demo
    #[arg(long)]
    pub(crate) passing_grade: Option<f64>,
    /// Skip the multi-course grade sheet portion of the demo
    #[arg(long)]
    pub(crate) skip_sheet: bool,
}

pub(crate) fn run_minimum_final(args: MinimumFinalArgs) -> Result<(), AppError> {
    let MinimumFinalArgs {
        scheme,
        weights,
        scores,
        passing_grade,
    } = args;

    let engine = load_engine()?;
    let scheme = WeightingScheme::from(scheme);
    let set = build_set(scheme, &weights, &scores, None)?;
    let calculation = engine.minimum_final(&set, passing_grade)?;

    render_calculation(scheme, &set, &calculation);
    Ok(())
}

pub(crate) fn run_year_end(args: YearEndArgs) -> Result<(), AppError> {
    let YearEndArgs {
        scheme,
        weights,
        scores,
        final_score,
        passing_grade,
    } = args;

    let engine = load_engine()?;
    let scheme = WeightingScheme::from(scheme);
    let set = build_set(scheme, &weights, &scores, Some(final_score))?;
    let calculation = engine.year_end(&set, passing_grade)?;

    render_calculation(scheme, &set, &calculation);
    Ok(())
}

pub(crate) fn run_grade(args: GradeArgs) -> Result<(), AppError> {
    let grade = classify(args.score);
    println!("{:.2} -> {}", args.score, grade);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        passing_grade,
        skip_sheet,
    } = args;

    let engine = match passing_grade {
        Some(value) => GradeEngine::new(value)?,
        None => load_engine()?,
    };
    let passing_grade = engine.passing_grade();
    let history = Arc::new(InMemoryHistoryStore::with_limit(10));
    let service = GradeService::new(history, engine);

    println!("Grade calculator demo (passing grade {:.0})", passing_grade);

    println!("\nMinimum final: committees 70 and 80 at 30% each, final at 40%");
    let request = demo_committee_request(passing_grade, true);
    let view = service.minimum_final(request)?;
    println!("- {}", view.summary);

    println!("\nMinimum final: same scores, aiming for 95");
    let request = demo_committee_request(95.0, true);
    let view = service.minimum_final(request)?;
    println!("- {}", view.summary);

    println!("\nYear end: two halves, both 90");
    let view = service.year_end(CalculationRequest {
        scheme: WeightingScheme::Midterm,
        components: vec![
            ComponentInput {
                weight: 50.0,
                score: Some(90.0),
            },
            ComponentInput {
                weight: 50.0,
                score: Some(90.0),
            },
        ],
        passing_grade: Some(passing_grade),
        save: true,
        label: Some("Two halves".to_string()),
    })?;
    match view.calculation.letter_grade {
        Some(grade) => println!("- {} ({})", view.summary, grade),
        None => println!("- {}", view.summary),
    }

    let records = service.history()?;
    println!("\nSaved calculations ({}):", records.len());
    for record in &records {
        println!(
            "  - {} [{}] pass {:.0}: {}",
            record.id.0,
            record.mode.label(),
            record.passing_grade(),
            record.outcome.summary()
        );
    }

    if skip_sheet {
        return Ok(());
    }

    println!("\nGrade sheet");
    let standings = service.grade_sheet(demo_sheet(passing_grade))?;
    for standing in standings {
        match standing {
            CourseStanding::Graded {
                name,
                final_score,
                letter_grade,
                passed,
            } => println!(
                "  - {}: {:.2} {} ({})",
                name,
                final_score,
                letter_grade,
                if passed { "passed" } else { "failed" }
            ),
            CourseStanding::Pending { name, missing } => {
                println!("  - {}: waiting on {}", name, missing.join(", "))
            }
        }
    }

    println!("\nLetter bands:");
    for grade in LetterGrade::ordered() {
        if grade == LetterGrade::FF {
            println!("  - {}: below {:.0}", grade, LetterGrade::FD.lower_bound());
        } else {
            println!("  - {}: {:.0} and above", grade, grade.lower_bound());
        }
    }

    Ok(())
}

fn load_engine() -> Result<GradeEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(engine_from_config(&config.grading)?)
}

/// Graded components first, the final component last.
fn build_set(
    scheme: WeightingScheme,
    weights: &[f64],
    scores: &[ScoreArg],
    final_score: Option<f64>,
) -> Result<ComponentSet, AppError> {
    let mut set = if weights.is_empty() {
        scheme.default_set().set_count(scores.len() + 1)
    } else {
        ComponentSet::with_weights(weights)?
    };

    for (index, score) in scores.iter().enumerate() {
        set = set.set_score(index, score.0)?;
    }
    if let Some(score) = final_score {
        set = set.set_score(set.derived_index(), Some(score))?;
    }
    Ok(set)
}

fn render_calculation(scheme: WeightingScheme, set: &ComponentSet, calculation: &Calculation) {
    println!(
        "{} calculation ({} scheme, passing grade {:.0})",
        calculation.mode.label(),
        scheme.label(),
        calculation.mode.passing_grade()
    );
    for (index, component) in set.components().iter().enumerate() {
        let score = component
            .score
            .map(|score| format!("{:.2}", score))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  - {}: {} at {:.2}%",
            scheme.component_name(index, set.len()),
            score,
            component.weight
        );
    }
    for advisory in &calculation.advisories {
        println!("  ! {}", advisory.summary());
    }
    println!("Result: {}", calculation.outcome.summary());
    if let Some(grade) = calculation.letter_grade {
        println!("Letter grade: {}", grade);
    }
}

fn demo_committee_request(passing_grade: f64, save: bool) -> CalculationRequest {
    CalculationRequest {
        scheme: WeightingScheme::Committee,
        components: vec![
            ComponentInput {
                weight: 30.0,
                score: Some(70.0),
            },
            ComponentInput {
                weight: 30.0,
                score: Some(80.0),
            },
            ComponentInput {
                weight: 40.0,
                score: None,
            },
        ],
        passing_grade: Some(passing_grade),
        save,
        label: Some(format!("Committee block, pass {:.0}", passing_grade)),
    }
}

fn demo_sheet(passing_grade: f64) -> GradeSheetRequest {
    GradeSheetRequest {
        courses: vec![
            CourseInput {
                name: "Anatomy".to_string(),
                scheme: WeightingScheme::Midterm,
                components: vec![
                    ComponentInput {
                        weight: 40.0,
                        score: Some(68.0),
                    },
                    ComponentInput {
                        weight: 60.0,
                        score: Some(74.0),
                    },
                ],
            },
            CourseInput {
                name: "Physiology".to_string(),
                scheme: WeightingScheme::Midterm,
                components: vec![
                    ComponentInput {
                        weight: 40.0,
                        score: Some(52.0),
                    },
                    ComponentInput {
                        weight: 60.0,
                        score: None,
                    },
                ],
            },
            CourseInput {
                name: "Histology".to_string(),
                scheme: WeightingScheme::Committee,
                components: vec![
                    ComponentInput {
                        weight: 30.0,
                        score: Some(45.0),
                    },
                    ComponentInput {
                        weight: 30.0,
                        score: Some(50.0),
                    },
                    ComponentInput {
                        weight: 40.0,
                        score: Some(55.0),
                    },
                ],
            },
        ],
        passing_grade: Some(passing_grade),
    }
}
