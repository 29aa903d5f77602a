#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Summary,
    Swot,
    Financials,
    Segments,
    Trends,
    Risks,
    Timeline,
    Leadership,
    Overview,
    InvestorLinks,
    /// Anything that is not a known action is asked as a question about the company.
    Question(String),
}

impl Action {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let normalized = raw.to_lowercase().replace(['-', ' '], "_");

        match normalized.as_str() {
            "summary" | "summarize" | "summarise" | "brief" | "briefing" => Self::Summary,
            "swot" | "swot_analysis" => Self::Swot,
            "financials" | "financial" | "metrics" => Self::Financials,
            "segments" | "business_segments" => Self::Segments,
            "trends" | "financial_trends" => Self::Trends,
            "risks" | "risks_opps" | "red_flags" | "opportunities" => Self::Risks,
            "timeline" | "timeline_events" | "events" => Self::Timeline,
            "leadership" | "executives" | "management" => Self::Leadership,
            "overview" | "analyze" | "analyse" | "analysis" | "full" => Self::Overview,
            "investor_links" | "ir_links" | "documents" => Self::InvestorLinks,
            _ => Self::Question(raw.to_string()),
        }
    }

    /// Whether answering needs the language model at all.
    pub fn uses_model(&self) -> bool {
        !matches!(self, Self::InvestorLinks)
    }
}
