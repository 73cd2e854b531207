//! Downloadable report renderers.

use std::fmt::Write;

use chrono::{Local, NaiveDate};
use lexrisk_core::{AnalysisResult, ClauseOutcome, EntitySet, RenderError, ReportRenderer};

/// Markdown risk report.
pub struct MarkdownReport {
    date: NaiveDate,
}

impl MarkdownReport {
    /// Dated today, in local time.
    pub fn new() -> Self {
        Self::dated(Local::now().date_naive())
    }

    pub fn dated(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Default for MarkdownReport {
    fn default() -> Self {
        Self::new()
    }
}

fn write_list(out: &mut String, items: &[String], empty: &str) -> std::fmt::Result {
    if items.is_empty() {
        return writeln!(out, "_{empty}_\n");
    }
    for item in items {
        writeln!(out, "- {item}")?;
    }
    writeln!(out)
}

fn write_entities(out: &mut String, label: &str, set: &EntitySet) -> std::fmt::Result {
    if set.is_empty() {
        return Ok(());
    }
    let joined: Vec<&str> = set.iter().collect();
    writeln!(out, "- **{label}:** {}", joined.join(", "))
}

impl ReportRenderer for MarkdownReport {
    fn content_type(&self) -> &'static str {
        "text/markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, result: &AnalysisResult) -> Result<Vec<u8>, RenderError> {
        let summary = result.summary();
        let risk = result.composite_risk();
        let mut out = String::new();

        writeln!(out, "# Legal Risk Assessment Report\n")?;
        writeln!(out, "Analysis date: {}\n", self.date.format("%Y-%m-%d"))?;
        writeln!(
            out,
            "**Overall Risk Score: {}/100 ({})**\n",
            risk.score, risk.level
        )?;
        writeln!(out, "- Contract type: {}", summary.contract_type)?;
        writeln!(out, "- Document risk: {}\n", summary.overall_risk)?;

        writeln!(out, "## Executive Summary\n")?;
        if summary.summary.trim().is_empty() {
            writeln!(out, "_No summary available._\n")?;
        } else {
            writeln!(out, "{}\n", summary.summary.trim())?;
        }

        writeln!(out, "## Key Dates\n")?;
        write_list(&mut out, &summary.key_dates, "No key dates identified.")?;

        writeln!(out, "## Key Obligations\n")?;
        write_list(
            &mut out,
            &summary.key_obligations,
            "No key obligations identified.",
        )?;

        writeln!(out, "## Critical Alerts\n")?;
        let alerts = summary.specific_risks.alerts();
        if alerts.is_empty() {
            writeln!(out, "_No specific critical alerts detected._\n")?;
        } else {
            for (title, detail) in alerts {
                writeln!(out, "- **{title}**: {detail}")?;
            }
            writeln!(out)?;
        }

        let entities = result.entities();
        if !entities.is_empty() {
            writeln!(out, "## Entities\n")?;
            write_entities(&mut out, "Parties", &entities.parties)?;
            write_entities(&mut out, "Dates", &entities.dates)?;
            write_entities(&mut out, "Money", &entities.money)?;
            write_entities(&mut out, "Locations", &entities.locations)?;
            writeln!(out)?;
        }

        writeln!(out, "## Clause Breakdown\n")?;
        if result.clauses().is_empty() {
            writeln!(out, "_No clauses were analysed._\n")?;
        }
        for clause in result.clauses() {
            match &clause.outcome {
                ClauseOutcome::Judged(j) => {
                    writeln!(out, "### {} (risk {}/10)\n", clause.id, j.risk_score)?;
                    writeln!(out, "{}\n", j.explanation.trim())?;
                    if j.risk_score.get() > 3
                        && let Some(reason) = &j.risk_reason
                    {
                        writeln!(out, "- **Risk reason:** {reason}")?;
                    }
                    if j.risk_score.get() > 5
                        && let Some(suggestion) = &j.suggestion
                    {
                        writeln!(out, "- **Suggestion:** {suggestion}")?;
                    }
                    if let Some(favours) = j.favorable {
                        writeln!(out, "- **Favours:** {favours:?}")?;
                    }
                    writeln!(out)?;
                }
                ClauseOutcome::Failed { error } => {
                    writeln!(out, "### {} (not analysed)\n", clause.id)?;
                    writeln!(out, "_Analysis failed: {error}_\n")?;
                }
            }
        }

        let skipped = result.unanalysed_units().len();
        if skipped > 0 {
            writeln!(
                out,
                "_{skipped} further clause(s) were segmented but not analysed._"
            )?;
        }

        Ok(out.into_bytes())
    }
}

/// The full result as pretty-printed JSON.
pub struct JsonReport;

impl ReportRenderer for JsonReport {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, result: &AnalysisResult) -> Result<Vec<u8>, RenderError> {
        Ok(serde_json::to_vec_pretty(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexrisk_core::{
        ClauseAnalysis, ClauseJudgment, ClauseUnit, DocumentSummary, EntityBundle, OverallRisk,
        ResultAssembler, RiskScore, RiskWeights, SpecificRisks,
    };

    fn unit(id: &str, order: usize) -> ClauseUnit {
        ClauseUnit {
            id: id.into(),
            text: format!("Text of {id}"),
            order,
        }
    }

    fn judgment(score: u8) -> ClauseJudgment {
        ClauseJudgment {
            explanation: "The supplier can walk away at any time.".into(),
            risk_score: RiskScore::new(score).unwrap(),
            risk_reason: Some("One-sided exit".into()),
            favorable: None,
            suggestion: Some("Add a notice period".into()),
        }
    }

    fn result(
        summary_text: &str,
        clauses: Vec<ClauseAnalysis>,
        units: Vec<ClauseUnit>,
    ) -> AnalysisResult {
        ResultAssembler::new()
            .text("contract".into())
            .entities(EntityBundle {
                parties: ["Acme Corp"].into_iter().collect(),
                ..Default::default()
            })
            .summary(DocumentSummary {
                summary: summary_text.into(),
                contract_type: "Services Agreement".into(),
                key_dates: vec![],
                key_obligations: vec!["Pay invoices within 30 days".into()],
                overall_risk: OverallRisk::High,
                specific_risks: SpecificRisks {
                    has_indemnity: true,
                    ..Default::default()
                },
            })
            .clause_units(units)
            .clauses(clauses)
            .finish(&RiskWeights::default())
            .unwrap()
    }

    fn render_md(result: &AnalysisResult) -> String {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        String::from_utf8(MarkdownReport::dated(date).render(result).unwrap()).unwrap()
    }

    #[test]
    fn markdown_has_headline_sections() {
        let units = vec![unit("1.", 0), unit("2.", 1)];
        let clauses = vec![
            ClauseAnalysis::judged(&units[0], judgment(9)),
            ClauseAnalysis::judged(&units[1], judgment(6)),
        ];
        let md = render_md(&result("A one-year services deal.", clauses, units));

        assert!(md.starts_with("# Legal Risk Assessment Report"));
        assert!(md.contains("Analysis date: 2026-03-14"));
        assert!(md.contains("**Overall Risk Score: 85/100 (Critical)**"));
        assert!(md.contains("A one-year services deal."));
        assert!(md.contains("- Pay invoices within 30 days"));
        assert!(md.contains("_No key dates identified._"));
        assert!(md.contains("**Indemnity clause detected**"));
        assert!(md.contains("- **Parties:** Acme Corp"));
        assert!(md.contains("### 1. (risk 9/10)"));
    }

    #[test]
    fn reason_and_suggestion_follow_thresholds() {
        let units = vec![unit("1.", 0)];
        let md = render_md(&result(
            "x",
            vec![ClauseAnalysis::judged(&units[0], judgment(4))],
            units,
        ));
        assert!(md.contains("**Risk reason:** One-sided exit"));
        assert!(!md.contains("**Suggestion:**"));
    }

    #[test]
    fn failed_and_missing_pieces_render_placeholders() {
        let units = vec![unit("1.", 0), unit("2.", 1), unit("3.", 2)];
        let clauses = vec![ClauseAnalysis::failed(&units[0], "no response within 60s")];
        let md = render_md(&result("  ", clauses, units));

        assert!(md.contains("_No summary available._"));
        assert!(md.contains("### 1. (not analysed)"));
        assert!(md.contains("_Analysis failed: no response within 60s_"));
        assert!(md.contains("_2 further clause(s) were segmented but not analysed._"));
    }

    #[test]
    fn json_report_roundtrips() {
        let r = result("x", vec![], vec![]);
        let bytes = JsonReport.render(&r).unwrap();
        let parsed: AnalysisResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, r);
        assert_eq!(JsonReport.extension(), "json");
    }
}
