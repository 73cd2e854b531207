//! Vertical card display for analysis results.
//!
//! Prints a grouped, human-readable card: headline risk, summary, alerts,
//! entities, then one block per analysed clause.

use lexrisk_core::{
    AnalysisResult, ClauseComparison, ClauseOutcome, ClauseUnit, EntitySet, RiskLevel,
};

const MAX_LIST_ITEMS: usize = 10;
const MAX_EXCERPT_CHARS: usize = 160;

// ── Public API ──

/// Print a finished analysis as a card grouped by section.
pub fn print_analysis_card(result: &AnalysisResult) {
    let summary = result.summary();
    let risk = result.composite_risk();

    println!("=== {} ===", summary.contract_type);
    println!(
        "Risk {}/100 ({})  {}",
        risk.score,
        risk.level,
        risk_marker(risk.level)
    );
    println!();

    print_field_section(
        "Summary",
        &[
            ("overall_risk", summary.overall_risk.to_string()),
            ("summary", summary.summary.trim().to_string()),
            ("scored_from", format!("{:?}", risk.basis)),
        ],
    );
    print_list_section("Key Dates", &summary.key_dates);
    print_list_section("Key Obligations", &summary.key_obligations);

    let alerts = summary.specific_risks.alerts();
    if !alerts.is_empty() {
        println!("Critical Alerts");
        for (title, detail) in alerts {
            println!("  ! {title}: {detail}");
        }
        println!();
    }

    let e = result.entities();
    if !e.is_empty() {
        println!("Entities");
        print_entity_row("parties", &e.parties);
        print_entity_row("dates", &e.dates);
        print_entity_row("money", &e.money);
        print_entity_row("locations", &e.locations);
        println!();
    }

    print_clauses(result);
}

/// Print segmented clauses with an excerpt of each body.
pub fn print_clause_units(units: &[ClauseUnit]) {
    println!("{} clause(s)", units.len());
    for unit in units {
        println!("  [{:>2}] {:<14} {}", unit.order, unit.id, excerpt(&unit.text));
    }
}

pub fn print_comparison(label: &str, comparison: &ClauseComparison) {
    println!("=== {label} ===");
    print_field_section(
        "Comparison",
        &[
            ("similarity", format!("{}/100", comparison.similarity_score)),
            ("verdict", comparison.verdict.to_string()),
            ("deviations", comparison.deviations.trim().to_string()),
        ],
    );
}

// ── Section rendering ──

fn print_field_section(header: &str, fields: &[(&str, String)]) {
    if fields.iter().all(|(_, v)| v.is_empty()) {
        return;
    }
    println!("{header}");
    for (name, value) in fields {
        if !value.is_empty() {
            println!("  {:<26} {}", name, value);
        }
    }
    println!();
}

fn print_list_section(header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{header}");
    for item in items.iter().take(MAX_LIST_ITEMS) {
        println!("  - {item}");
    }
    if items.len() > MAX_LIST_ITEMS {
        println!("  ... and {} more", items.len() - MAX_LIST_ITEMS);
    }
    println!();
}

fn print_entity_row(name: &str, set: &EntitySet) {
    if set.is_empty() {
        return;
    }
    let items: Vec<&str> = set.iter().take(MAX_LIST_ITEMS).collect();
    let more = set.len().saturating_sub(MAX_LIST_ITEMS);
    if more > 0 {
        println!("  {:<26} {} (+{more} more)", name, items.join(", "));
    } else {
        println!("  {:<26} {}", name, items.join(", "));
    }
}

// ── Clauses ──

fn print_clauses(result: &AnalysisResult) {
    let clauses = result.clauses();
    if clauses.is_empty() {
        println!("No clauses analysed.");
        return;
    }

    println!("Clauses ({} analysed)", clauses.len());
    for clause in clauses {
        match &clause.outcome {
            ClauseOutcome::Judged(j) => {
                let score = j.risk_score.get();
                println!("  {:<14} risk {:>2}/10  {}", clause.id, score, score_marker(score));
                println!("      {}", j.explanation.trim());
                if score > 3
                    && let Some(reason) = &j.risk_reason
                {
                    println!("      reason: {reason}");
                }
                if score > 5
                    && let Some(suggestion) = &j.suggestion
                {
                    println!("      suggestion: {suggestion}");
                }
            }
            ClauseOutcome::Failed { error } => {
                println!("  {:<14} not analysed: {error}", clause.id);
            }
        }
    }

    let skipped = result.unanalysed_units().len();
    if skipped > 0 {
        println!("  ... and {skipped} more not analysed");
    }
}

fn score_marker(score: u8) -> &'static str {
    if score >= 8 {
        "[high]"
    } else if score >= 5 {
        "[medium]"
    } else {
        ""
    }
}

fn risk_marker(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical | RiskLevel::High => "[review before signing]",
        RiskLevel::Medium | RiskLevel::Low => "",
    }
}

fn excerpt(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > MAX_EXCERPT_CHARS {
        let cut: String = flat.chars().take(MAX_EXCERPT_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}
