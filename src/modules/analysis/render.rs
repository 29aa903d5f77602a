use super::parser::{
    Executive, Financials, Overview, RisksAndOpportunities, Segments, Swot, TimelineEvent,
};
use std::fmt::Write;

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}

fn section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "**{title}**");
    bullets(out, items);
    out.push('\n');
}

fn finish(out: String) -> String {
    out.trim_end().to_string()
}

pub fn swot(company: &str, swot: &Swot) -> String {
    let mut out = format!("## SWOT Analysis: {company}\n\n");
    section(&mut out, "Strengths", &swot.strengths);
    section(&mut out, "Weaknesses", &swot.weaknesses);
    section(&mut out, "Opportunities", &swot.opportunities);
    section(&mut out, "Threats", &swot.threats);
    finish(out)
}

pub fn risks(company: &str, risks: &RisksAndOpportunities) -> String {
    let mut out = format!("## Risks & Opportunities: {company}\n\n");
    section(&mut out, "Red Flags", &risks.red_flags);
    section(&mut out, "Opportunities", &risks.opportunities);
    finish(out)
}

pub fn trends(company: &str, trends: &[String]) -> String {
    if trends.is_empty() {
        return format!("No recent financial trends were identified for {company}.");
    }
    let mut out = format!("## Financial Trends: {company}\n\n");
    bullets(&mut out, trends);
    finish(out)
}

pub fn leadership(company: &str, executives: &[Executive]) -> String {
    if executives.is_empty() {
        return format!("Could not extract leadership information for {company}.");
    }
    let mut out = format!("## Leadership: {company}\n\n");
    for executive in executives {
        let _ = writeln!(out, "- **{}**: {}", executive.name, executive.title);
    }
    finish(out)
}

pub fn timeline(company: &str, events: &[TimelineEvent]) -> String {
    let mut out = format!("## Timeline: {company}\n\n");
    for event in events {
        let _ = writeln!(out, "- {}: {}", event.year, event.description);
    }
    finish(out)
}

pub fn financials(company: &str, financials: &Financials) -> String {
    if financials.is_empty() {
        return format!("No financial metrics were found for {company}.");
    }
    let mut out = format!("## Key Financials: {company}\n\n");
    for (name, value) in financials.iter() {
        let _ = writeln!(out, "- {name}: {value}");
    }
    finish(out)
}

pub fn segments(company: &str, segments: &Segments) -> String {
    if segments.is_empty() {
        return format!("No business segment breakdown was found for {company}.");
    }
    let mut out = format!("## Business Segments: {company}\n\n");
    for (name, value) in segments.iter() {
        let _ = writeln!(out, "- {name}: {value}%");
    }
    finish(out)
}

pub fn investor_links(company: &str, url: &str, links: &[String]) -> String {
    if links.is_empty() {
        return format!("No investor relations documents were found on {url}.");
    }
    let mut out = format!("## Investor Relations Documents: {company}\n\n");
    bullets(&mut out, links);
    finish(out)
}

pub fn overview(company: &str, overview: &Overview, financials: &Financials) -> String {
    let mut out = format!("## Company Overview: {company}\n\n");

    if !overview.summary.is_empty() {
        let _ = writeln!(out, "**Summary**\n{}\n", overview.summary);
    }
    if !financials.is_empty() {
        let _ = writeln!(out, "**Key Financials**");
        for (name, value) in financials.iter() {
            let _ = writeln!(out, "- {name}: {value}");
        }
        out.push('\n');
    }
    section(&mut out, "Strengths", &overview.swot.strengths);
    section(&mut out, "Weaknesses", &overview.swot.weaknesses);
    section(&mut out, "Opportunities", &overview.swot.opportunities);
    section(&mut out, "Threats", &overview.swot.threats);
    section(&mut out, "Recent Trends", &overview.trends);
    section(&mut out, "Red Flags", &overview.risks.red_flags);
    section(&mut out, "Growth Opportunities", &overview.risks.opportunities);

    if !overview.timeline.is_empty() {
        let _ = writeln!(out, "**Timeline**");
        for event in &overview.timeline {
            let _ = writeln!(out, "- {}: {}", event.year, event.description);
        }
    }

    finish(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_swot_sections_in_order() {
        let swot_result = swot(
            "Acme",
            &Swot {
                strengths: vec!["Brand".to_string()],
                weaknesses: vec![],
                opportunities: vec!["Cloud".to_string()],
                threats: vec!["Rivals".to_string()],
            },
        );

        assert_eq!(
            swot_result,
            "## SWOT Analysis: Acme\n\n**Strengths**\n- Brand\n\n**Opportunities**\n- Cloud\n\n**Threats**\n- Rivals"
        );
    }

    #[test]
    fn renders_leadership_list() {
        let executives = vec![Executive {
            name: "Tim Cook".to_string(),
            title: "CEO".to_string(),
        }];

        assert_eq!(
            leadership("Apple", &executives),
            "## Leadership: Apple\n\n- **Tim Cook**: CEO"
        );
        assert_eq!(
            leadership("Apple", &[]),
            "Could not extract leadership information for Apple."
        );
    }

    #[test]
    fn renders_segments_as_percentages() {
        let mut parsed = Segments::default();
        parsed.insert("Cloud", 40.0);
        parsed.insert("Hardware", 35.5);

        assert_eq!(
            segments("Acme", &parsed),
            "## Business Segments: Acme\n\n- Cloud: 40%\n- Hardware: 35.5%"
        );
    }

    #[test]
    fn empty_findings_render_a_sentence() {
        assert_eq!(
            financials("Acme", &Financials::default()),
            "No financial metrics were found for Acme."
        );
        assert_eq!(
            investor_links("Acme", "https://acme.com/", &[]),
            "No investor relations documents were found on https://acme.com/."
        );
    }
}
