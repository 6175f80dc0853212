//! Text and JSON rendering

use anyhow::Result;
use flo_finance_core::{
    format_currency, format_fte, round_cents, Estimate, FacilitySummary, OrganizationSummary,
};
use serde::Serialize;

/// Labelled read-only fields for the text view
pub trait SummaryLines: Serialize {
    fn lines(&self) -> Vec<(&'static str, String)>;
}

impl SummaryLines for OrganizationSummary {
    fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Health System Name", self.name.clone()),
            ("Bed Size", self.bed_size.to_string()),
            ("States", self.states.clone()),
            ("Affiliated Hospitals", self.affiliated_hospitals.to_string()),
        ]
    }
}

impl SummaryLines for FacilitySummary {
    fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Hospital Name", self.name.clone()),
            ("Bed Size", self.bed_size.to_string()),
            ("State", self.state.clone()),
            ("Health System", self.parent_organization.clone()),
        ]
    }
}

#[derive(Serialize)]
struct SelectionReport<'a, S: Serialize> {
    summary: &'a S,
    estimate: &'a Estimate,
}

pub fn names(names: &[&str], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(names)?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}

pub fn selection<S: SummaryLines>(summary: &S, estimate: &Estimate, json: bool) -> Result<()> {
    if json {
        println!("{}", selection_json(summary, estimate)?);
    } else {
        for line in selection_lines(summary, estimate) {
            println!("{}", line);
        }
    }
    Ok(())
}

pub fn estimate_only(estimate: &Estimate, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(estimate)?);
    } else {
        for line in estimate_lines(estimate) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn selection_json<S: Serialize>(summary: &S, estimate: &Estimate) -> Result<String> {
    let report = SelectionReport { summary, estimate };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn selection_lines<S: SummaryLines>(summary: &S, estimate: &Estimate) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .lines()
        .into_iter()
        .map(|(label, value)| format!("{:<22}{}", format!("{}:", label), value))
        .collect();
    lines.push(String::new());
    lines.extend(estimate_lines(estimate));
    lines
}

fn estimate_lines(estimate: &Estimate) -> Vec<String> {
    match estimate {
        Estimate::Comparison { savings, inputs } => vec![
            format!("Model Result: {}", format_currency(round_cents(*savings))),
            format!(
                "Inputs: Staff Labor Rate: {}, Agency Labor Rate: {}, Estimated RN Need: {}",
                format_currency(inputs.staff_rate),
                format_currency(inputs.agency_rate),
                format_fte(inputs.rn_need)
            ),
        ],
        Estimate::Promotional { rn_need } => {
            vec![format!("Estimated RN Need (FTE): {}", format_fte(*rn_need))]
        }
    }
}
