// Copyright 2025 the askplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Example binary for `askplan_pipeline`.
//!
//! Runs a few questions through an [`Analyst`] backed by a canned planner and a template
//! explainer. Set `RUST_LOG=debug` to see every stage.

use std::error::Error;

use askplan_charts::ChartDescriptor;
use askplan_core::{Field, Table, Value};
use askplan_pipeline::{
    Analysis, Analyst, Answer, CollaboratorError, Explainer, PipelineConfig, Planner,
};
use askplan_plan::{NormalizedPlan, RawPlan};
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Answers a fixed set of questions with hand-written plans.
struct CannedPlanner;

impl Planner for CannedPlanner {
    fn plan(&self, _columns: &[String], question: &str) -> Result<RawPlan, CollaboratorError> {
        let q = question.to_lowercase();
        let plan = if q.contains("highest population") {
            json!({
                "analysis_type": "aggregation",
                "filters": [],
                "group_by": [],
                "metrics": [{"column": "population", "operation": "max"}],
                "sort": {"by": "population", "order": "desc"},
                "visualization": {"type": "bar", "x": "country", "y": "population", "top_n": 1},
                "user_intent": {"focus": "highest", "show_highest": true},
            })
        } else if q.contains("discount") {
            json!({
                "analysis_type": "comparison",
                "filters": [{"column": "discount", "operator": ">", "value": "10%"}],
                "group_by": ["region"],
                "metrics": [{"column": "population", "operation": "sum"}],
                "sort": {"by": "population", "order": "desc"},
                "visualization": {"type": "bar", "x": "region", "y": "mean"},
                "user_intent": {"focus": "general"},
            })
        } else if q.contains("by region") {
            json!({
                "analysis_type": "comparison",
                "filters": [],
                "group_by": ["region"],
                "metrics": [
                    {"column": "population", "operation": "mean"},
                    {"column": "population", "operation": "bar"},
                ],
                "sort": {"by": "population", "order": "desc"},
                "visualization": {"type": "bar", "x": "region", "y": "NULL", "color": "region"},
                "user_intent": {"focus": "both"},
            })
        } else {
            return Err(CollaboratorError::planner(format!(
                "no canned plan for {question:?}"
            )));
        };
        Ok(RawPlan::new(plan))
    }
}

/// Describes results with a fixed template.
struct TemplateExplainer;

impl Explainer for TemplateExplainer {
    fn explain(
        &self,
        question: &str,
        analysis: &Analysis,
        plan: &NormalizedPlan,
    ) -> Result<String, CollaboratorError> {
        Ok(format!(
            "{} analysis of {question:?}: {} result rows from {} filtered rows.",
            plan.analysis_type,
            analysis.result.row_count(),
            analysis.filtered.row_count(),
        ))
    }

    fn describe_dataset(&self, table: &Table, summary: &Table) -> Result<String, CollaboratorError> {
        Ok(format!(
            "{} rows over {} columns.",
            table.row_count(),
            summary.row_count()
        ))
    }
}

fn countries() -> Result<Table, askplan_core::TableError> {
    Table::from_columns(vec![
        (
            Field::text("country"),
            vec![
                "France".into(),
                "Germany".into(),
                "Italy".into(),
                "Spain".into(),
                "Poland".into(),
                "Portugal".into(),
            ],
        ),
        (
            Field::text("region"),
            vec![
                "west".into(),
                "central".into(),
                "south".into(),
                "south".into(),
                "central".into(),
                "south".into(),
            ],
        ),
        (
            Field::numeric("population"),
            vec![
                68.2.into(),
                84.5.into(),
                58.9.into(),
                48.6.into(),
                36.7.into(),
                Value::Null,
            ],
        ),
        (
            Field::text("discount"),
            vec![
                "12%".into(),
                "8%".into(),
                "15 %".into(),
                "20%".into(),
                "n/a".into(),
                "11%".into(),
            ],
        ),
    ])
}

fn print_table(table: &Table) {
    let names: Vec<&str> = table.column_names().collect();
    println!("  {}", names.join(" | "));
    for row in 0..table.row_count() {
        let cells: Vec<String> = table
            .row(row)
            .unwrap_or_default()
            .into_iter()
            .map(|v| v.render().unwrap_or_else(|| "-".to_owned()))
            .collect();
        println!("  {}", cells.join(" | "));
    }
}

fn print_chart(chart: &ChartDescriptor, result: &Table) -> Result<(), serde_json::Error> {
    println!("chart: {}", serde_json::to_string(chart)?);
    if let Some(points) = chart.points(result) {
        for (x, y) in points {
            println!("  ({}, {})", x.render().unwrap_or_default(), y.render().unwrap_or_default());
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let config = PipelineConfig::from_json_str(r#"{"display_limit": 20, "history_capacity": 8}"#)?;
    let table = countries()?;
    let mut analyst = Analyst::new(CannedPlanner, TemplateExplainer, &config);

    let questions = [
        "Give me a dataset summary",
        "Which country has the highest population?",
        "Population by region, highest and lowest",
        "Total population where the discount is above 10%, per region",
        "What will sales be next year?",
    ];

    for question in questions {
        println!("\n> {question}");
        match analyst.ask(question, &table) {
            Ok(Answer::Dataset(answer)) => {
                print_table(&answer.summary);
                println!("{}", answer.insight);
            }
            Ok(Answer::Analysis(answer)) => {
                println!("plan: {}", serde_json::to_string(&answer.plan)?);
                print_table(&answer.display.table);
                println!("{}", answer.display.caption);
                match &answer.analysis.chart {
                    Ok(Some(chart)) => print_chart(chart, &answer.analysis.result)?,
                    Ok(None) => println!("no chart"),
                    Err(err) => println!("chart error: {err}"),
                }
                println!("{}", answer.insight);
            }
            Err(err) => warn!(%err, "question not answered"),
        }
    }

    println!("\nhistory (newest first):");
    for entry in analyst.history().recent() {
        println!("  {} {}", entry.id, entry.question);
    }
    Ok(())
}
