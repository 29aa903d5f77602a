//! Turns free-form model output and page text into structured findings.
//!
//! Models rarely follow the requested layout exactly, so headings are matched after stripping
//! Markdown emphasis and numbering, and bullets may use `-`, `*`, `•` or `1.` markers.

use regex::Regex;
use std::sync::LazyLock;

const GENERIC_RED_FLAGS: [&str; 3] = [
    "Regulatory changes impacting the industry",
    "Increased competition from global players",
    "Potential data security or privacy breaches",
];

const GENERIC_OPPORTUNITIES: [&str; 3] = [
    "Expansion into emerging markets",
    "Adoption of new technologies",
    "Strategic partnerships or acquisitions",
];

const MIN_FINDINGS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Swot {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

impl Swot {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.opportunities.is_empty()
            && self.threats.is_empty()
    }

    fn is_quadrant(heading: &str) -> bool {
        matches!(heading, "strengths" | "weaknesses" | "opportunities" | "threats")
    }

    fn section(&mut self, heading: &str) -> Option<&mut Vec<String>> {
        match heading {
            "strengths" => Some(&mut self.strengths),
            "weaknesses" => Some(&mut self.weaknesses),
            "opportunities" => Some(&mut self.opportunities),
            "threats" => Some(&mut self.threats),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RisksAndOpportunities {
    pub red_flags: Vec<String>,
    pub opportunities: Vec<String>,
}

impl RisksAndOpportunities {
    /// Tops both lists up to three entries with generic industry items.
    pub fn pad(mut self) -> Self {
        pad_with(&mut self.red_flags, &GENERIC_RED_FLAGS);
        pad_with(&mut self.opportunities, &GENERIC_OPPORTUNITIES);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimelineEvent {
    pub year: i32,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Executive {
    pub name: String,
    pub title: String,
}

/// Ordered `metric -> value` pairs; the first value found for a metric wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics<V> {
    entries: Vec<(String, V)>,
}

impl<V> Metrics<V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, name: &str, value: V) {
        let name = name.trim();
        if name.is_empty()
            || self
                .entries
                .iter()
                .any(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            return;
        }
        self.entries.push((name.to_string(), value));
    }

    pub fn merge(&mut self, other: Metrics<V>) {
        for (name, value) in other.entries {
            self.insert(&name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

pub type Financials = Metrics<String>;
pub type Segments = Metrics<f64>;

/// Everything a single overview call returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overview {
    pub summary: String,
    pub swot: Swot,
    pub trends: Vec<String>,
    pub risks: RisksAndOpportunities,
    pub timeline: Vec<TimelineEvent>,
}

static FINANCIAL_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    let amount = r"([$€₹£]?\s?\d[\d,.]*\s*(?:million|billion|trillion|crore|lakh|mn|bn)?)";
    let percent = r"(-?\d[\d.]*\s?%)";

    [
        ("Revenue", format!(r"(?i)\b(?:total revenue|revenue|turnover)\b[^\d$€₹£]{{0,40}}{amount}")),
        ("Net Profit", format!(r"(?i)\b(?:net profit|net income|profit after tax)\b[^\d$€₹£]{{0,40}}{amount}")),
        ("Growth", format!(r"(?i)\b(?:yoy growth|growth|increase)\b[^\d\-]{{0,40}}{percent}")),
        ("Operating Margin", format!(r"(?i)\boperating margin\b[^\d\-]{{0,40}}{percent}")),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(&pattern).expect("Invalid financial regex")))
    .collect()
});

static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z &]*?)\s*[-:]+\s*(\d+(?:\.\d+)?)\s?%")
        .expect("Invalid segment regex")
});

static EXECUTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z .'-]+): (.+)$").expect("Invalid executive regex")
});

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").expect("Invalid numbering regex"));

fn pad_with(items: &mut Vec<String>, generic: &[&str]) {
    let missing = MIN_FINDINGS.saturating_sub(items.len());
    items.extend(generic.iter().take(missing).map(|item| item.to_string()));
}

fn strip_emphasis(line: &str) -> String {
    line.replace("**", "").replace("__", "")
}

/// Returns the lower-cased heading and any text after its colon, e.g.
/// `**2. Summary:** Acme builds anvils` -> `("summary", "Acme builds anvils")`.
fn heading(line: &str) -> Option<(String, String)> {
    let cleaned = strip_emphasis(line.trim())
        .trim_start_matches('#')
        .trim()
        .to_string();
    let cleaned = NUMBERED.replace(&cleaned, "").to_string();
    let (head, rest) = cleaned.split_once(':')?;
    let head = head.trim().trim_matches('*').trim().to_lowercase();

    match head.is_empty() || head.len() > 40 {
        true => None,
        false => Some((head, rest.trim().to_string())),
    }
}

/// Text of a bulleted line, without its marker.
fn bullet(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let rest = if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix('•'))
        .or_else(|| trimmed.strip_prefix('-'))
    {
        rest.to_string()
    } else if NUMBERED.is_match(trimmed) {
        NUMBERED.replace(trimmed, "").to_string()
    } else {
        return None;
    };

    let text = strip_emphasis(&rest).trim().to_string();
    match text.is_empty() {
        true => None,
        false => Some(text),
    }
}

fn timeline_event(line: &str) -> Option<TimelineEvent> {
    let cleaned = strip_emphasis(line.trim());
    let cleaned = cleaned
        .trim_start_matches(|c: char| c == '-' || c == '*' || c == '•' || c.is_whitespace());
    let (year, description) = cleaned.split_once(':')?;
    let year = year.trim();
    let description = description.trim();

    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) || description.is_empty() {
        return None;
    }

    Some(TimelineEvent {
        year: year.parse().ok()?,
        description: description.to_string(),
    })
}

pub fn parse_swot(text: &str) -> Swot {
    let mut swot = Swot::default();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if let Some((head, rest)) = heading(line) {
            if Swot::is_quadrant(&head) {
                if let (Some(section), false) = (swot.section(&head), rest.is_empty()) {
                    section.push(rest);
                }
                current = Some(head);
                continue;
            }
        }

        if let (Some(head), Some(item)) = (current.as_deref(), bullet(line)) {
            if let Some(section) = swot.section(head) {
                section.push(item);
            }
        }
    }

    swot
}

pub fn parse_risks(text: &str) -> RisksAndOpportunities {
    let mut result = RisksAndOpportunities::default();
    let mut in_red_flags: Option<bool> = None;

    for line in text.lines() {
        let lowered = strip_emphasis(line.trim())
            .trim_start_matches('#')
            .trim()
            .to_lowercase();

        if lowered.starts_with("red flags") || lowered.starts_with("risks") {
            in_red_flags = Some(true);
        } else if lowered.starts_with("opportunities") {
            in_red_flags = Some(false);
        } else if let (Some(red), Some(item)) = (in_red_flags, bullet(line)) {
            match red {
                true => result.red_flags.push(item),
                false => result.opportunities.push(item),
            }
        }
    }

    result
}

pub fn parse_trends(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let item = bullet(line).unwrap_or_else(|| strip_emphasis(line.trim()));
            let item = item.replace('*', "").trim().to_string();
            match item.is_empty() || item.ends_with(':') {
                true => None,
                false => Some(item),
            }
        })
        .collect()
}

/// Keeps only `Name: Title` lines, dropping any commentary the model adds around the list.
pub fn parse_leadership(text: &str) -> Vec<Executive> {
    text.lines()
        .filter_map(|line| {
            let line = bullet(line).unwrap_or_else(|| strip_emphasis(line.trim()));
            let caps = EXECUTIVE.captures(line.trim())?;
            let name = caps[1].trim();
            let title = caps[2].trim();
            match name.is_empty() || title.is_empty() {
                true => None,
                false => Some(Executive {
                    name: name.to_string(),
                    title: title.to_string(),
                }),
            }
        })
        .collect()
}

pub fn parse_timeline(text: &str) -> Vec<TimelineEvent> {
    let mut events = text.lines().filter_map(timeline_event).collect::<Vec<_>>();
    events.sort();
    events
}

/// Tops the timeline up to three events relative to `current_year`, keeping it sorted.
pub fn pad_timeline(mut events: Vec<TimelineEvent>, current_year: i32) -> Vec<TimelineEvent> {
    let generic = [
        (current_year - 2, "Adopted digital transformation initiatives"),
        (current_year - 1, "Expanded into new markets"),
        (current_year, "Launched new product line or service"),
    ];
    let missing = MIN_FINDINGS.saturating_sub(events.len());
    events.extend(
        generic
            .into_iter()
            .take(missing)
            .map(|(year, description)| TimelineEvent {
                year,
                description: description.to_string(),
            }),
    );
    events.sort();
    events
}

pub fn extract_financials(text: &str) -> Financials {
    let mut financials = Financials::default();
    for (name, pattern) in FINANCIAL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let value = caps[1].trim().trim_end_matches(['.', ',']).trim();
            financials.insert(name, value.to_string());
        }
    }
    financials
}

/// Parses `Metric: value` lines as returned by the model.
pub fn parse_financial_lines(text: &str) -> Financials {
    let mut financials = Financials::default();
    for line in text.lines() {
        let line = bullet(line).unwrap_or_else(|| strip_emphasis(line.trim()));
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if !value.is_empty() {
                financials.insert(name, value.to_string());
            }
        }
    }
    financials
}

pub fn extract_segments(text: &str) -> Segments {
    let mut segments = Segments::default();
    for caps in SEGMENT.captures_iter(text) {
        if let Ok(value) = caps[2].parse::<f64>() {
            segments.insert(&caps[1], value);
        }
    }
    segments
}

/// Parses `Segment: 40%` lines as returned by the model.
pub fn parse_segments(text: &str) -> Segments {
    let mut segments = Segments::default();
    for line in text.lines() {
        let line = bullet(line).unwrap_or_else(|| strip_emphasis(line.trim()));
        if let Some((name, value)) = line.split_once(':') {
            if !value.contains('%') {
                continue;
            }
            if let Ok(value) = value.trim().trim_end_matches('%').trim().parse::<f64>() {
                segments.insert(name, value);
            }
        }
    }
    segments
}

#[derive(Clone, Copy, PartialEq)]
enum OverviewSection {
    Summary,
    Swot,
    Trends,
    RedFlags,
    Opportunities,
    Timeline,
}

pub fn parse_overview(text: &str) -> Overview {
    let mut overview = Overview::default();
    let mut section: Option<OverviewSection> = None;
    let mut swot_heading: Option<String> = None;
    let mut summary = Vec::new();

    for line in text.lines() {
        if let Some((head, rest)) = heading(line) {
            let next = match head.as_str() {
                "summary" | "executive summary" => Some(OverviewSection::Summary),
                "swot" | "swot analysis" => Some(OverviewSection::Swot),
                "strengths" | "weaknesses" | "threats" => Some(OverviewSection::Swot),
                // Inside the SWOT block this is a quadrant, afterwards it pairs with red flags
                "opportunities" if section == Some(OverviewSection::Swot) => {
                    Some(OverviewSection::Swot)
                }
                "opportunities" => Some(OverviewSection::Opportunities),
                "trends" | "recent trends" => Some(OverviewSection::Trends),
                "red flags" | "risks" | "red flags & opportunities" => {
                    Some(OverviewSection::RedFlags)
                }
                "timeline" => Some(OverviewSection::Timeline),
                _ => None,
            };

            if let Some(next) = next {
                swot_heading = match next {
                    OverviewSection::Swot if Swot::is_quadrant(&head) => Some(head.clone()),
                    OverviewSection::Swot => swot_heading,
                    _ => None,
                };
                if next == OverviewSection::Summary && !rest.is_empty() {
                    summary.push(rest);
                }
                section = Some(next);
                continue;
            }
        }

        match section {
            Some(OverviewSection::Summary) => {
                let line = strip_emphasis(line.trim());
                if !line.is_empty() {
                    summary.push(line);
                }
            }
            Some(OverviewSection::Swot) => {
                if let (Some(head), Some(item)) = (swot_heading.as_deref(), bullet(line)) {
                    if let Some(quadrant) = overview.swot.section(head) {
                        quadrant.push(item);
                    }
                }
            }
            Some(OverviewSection::Trends) => overview.trends.extend(bullet(line)),
            Some(OverviewSection::RedFlags) => overview.risks.red_flags.extend(bullet(line)),
            Some(OverviewSection::Opportunities) => {
                overview.risks.opportunities.extend(bullet(line))
            }
            Some(OverviewSection::Timeline) => overview.timeline.extend(timeline_event(line)),
            None => {}
        }
    }

    overview.summary = summary.join(" ");
    overview.timeline.sort();
    overview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_swot_with_markdown_headings() {
        let swot = parse_swot(
            "**Strengths:**\n- Strong brand\n* Global reach\n\n**Weaknesses:**\n- High costs\n\
             ### Opportunities\nOpportunities:\n• Cloud growth\nThreats:\n1. Regulation\n",
        );

        assert_eq!(swot.strengths, vec!["Strong brand", "Global reach"]);
        assert_eq!(swot.weaknesses, vec!["High costs"]);
        assert_eq!(swot.opportunities, vec!["Cloud growth"]);
        assert_eq!(swot.threats, vec!["Regulation"]);
    }

    #[test]
    fn ignores_bullets_before_any_swot_heading() {
        let swot = parse_swot("- orphan\nThreats:\n- Competition");

        assert!(swot.strengths.is_empty());
        assert_eq!(swot.threats, vec!["Competition"]);
    }

    #[test]
    fn pads_risks_to_three_items() {
        let risks = parse_risks(
            "Red Flags:\n- Debt load\n- Key person risk\n- Litigation\n- Currency\n\nOpportunities:\n- AI services\n",
        )
        .pad();

        assert_eq!(risks.red_flags.len(), 4);
        assert_eq!(
            risks.opportunities,
            vec![
                "AI services",
                "Expansion into emerging markets",
                "Adoption of new technologies"
            ]
        );
    }

    #[test]
    fn empty_risks_get_generic_items() {
        let risks = parse_risks("nothing useful").pad();

        assert_eq!(risks.red_flags, GENERIC_RED_FLAGS.to_vec());
        assert_eq!(risks.opportunities, GENERIC_OPPORTUNITIES.to_vec());
    }

    #[test]
    fn parses_trends_without_markup() {
        let trends = parse_trends("Trends:\n- **Revenue** grew 10% in 2023\nMargins *improved*\n\n");

        assert_eq!(trends, vec!["Revenue grew 10% in 2023", "Margins improved"]);
    }

    #[test]
    fn keeps_name_and_title_lines_only() {
        let executives = parse_leadership(
            "Here are the key executives:\n\n- **Tim Cook**: Chief Executive Officer\n\
             2. Jeff Williams: Chief Operating Officer\nKevan Parekh: CFO\n\
             Board since 2011: see annual report\n",
        );

        assert_eq!(
            executives,
            vec![
                Executive {
                    name: "Tim Cook".to_string(),
                    title: "Chief Executive Officer".to_string(),
                },
                Executive {
                    name: "Jeff Williams".to_string(),
                    title: "Chief Operating Officer".to_string(),
                },
                Executive {
                    name: "Kevan Parekh".to_string(),
                    title: "CFO".to_string(),
                },
            ]
        );
    }

    #[test]
    fn parses_and_sorts_timeline() {
        let events = parse_timeline(
            "2021: Acquired Beta\n- **2019**: Founded\nsoon: nothing\n123: bad\n2023: \n",
        );

        assert_eq!(
            events,
            vec![
                TimelineEvent { year: 2019, description: "Founded".to_string() },
                TimelineEvent { year: 2021, description: "Acquired Beta".to_string() },
            ]
        );
    }

    #[test]
    fn pads_timeline_relative_to_year() {
        let events = pad_timeline(
            vec![TimelineEvent { year: 2010, description: "IPO".to_string() }],
            2026,
        );

        assert_eq!(
            events.iter().map(|event| event.year).collect::<Vec<_>>(),
            vec![2010, 2024, 2025]
        );
    }

    #[test]
    fn extracts_financials_from_text() {
        let financials = extract_financials(
            "Total revenue for the year was $12.5 billion. Net income reached ₹3,200 crore, \
             a YoY growth of 8.4% with an operating margin of 21%.",
        );

        assert_eq!(financials.get("Revenue").map(String::as_str), Some("$12.5 billion"));
        assert_eq!(financials.get("Net Profit").map(String::as_str), Some("₹3,200 crore"));
        assert_eq!(financials.get("Growth").map(String::as_str), Some("8.4%"));
        assert_eq!(financials.get("Operating Margin").map(String::as_str), Some("21%"));
    }

    #[test]
    fn financial_lines_do_not_override_extracted_values() {
        let mut financials = extract_financials("Revenue: $5 million");
        financials.merge(parse_financial_lines(
            "Revenue: $9 million\nNet Profit: N/A\nGrowth: 4%\nOperating Margin:",
        ));

        assert_eq!(financials.len(), 3);
        assert_eq!(financials.get("revenue").map(String::as_str), Some("$5 million"));
        assert_eq!(financials.get("Net Profit").map(String::as_str), Some("N/A"));
    }

    #[test]
    fn extracts_segments() {
        let segments = extract_segments("Cloud Services: 40%, Hardware - 35.5%, Other: 24.5 %");

        assert_eq!(
            segments.iter().map(|(name, value)| (name.to_string(), *value)).collect::<Vec<_>>(),
            vec![
                ("Cloud Services".to_string(), 40.0),
                ("Hardware".to_string(), 35.5),
                ("Other".to_string(), 24.5),
            ]
        );
    }

    #[test]
    fn parses_segment_lines() {
        let segments = parse_segments("- Banking: 32%\nRetail: 18.5%\nNotes: none\nBad: x%");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments.get("Retail"), Some(&18.5));
    }

    #[test]
    fn parses_overview_sections() {
        let overview = parse_overview(
            "Summary:\nAcme builds anvils.\nIt sells worldwide.\n\n\
             SWOT:\nStrengths:\n- Brand\nWeaknesses:\n- Costs\nOpportunities:\n- Cloud\nThreats:\n- Rivals\n\n\
             Trends:\n- Revenue up 5%\n\n\
             Red Flags:\n- Debt\nOpportunities:\n- Asia\n\n\
             Timeline:\n2022: Launched X\n2020: Founded\n",
        );

        assert_eq!(overview.summary, "Acme builds anvils. It sells worldwide.");
        assert_eq!(overview.swot.strengths, vec!["Brand"]);
        assert_eq!(overview.swot.opportunities, vec!["Cloud"]);
        assert_eq!(overview.swot.threats, vec!["Rivals"]);
        assert_eq!(overview.trends, vec!["Revenue up 5%"]);
        assert_eq!(overview.risks.red_flags, vec!["Debt"]);
        assert_eq!(overview.risks.opportunities, vec!["Asia"]);
        assert_eq!(
            overview.timeline.iter().map(|event| event.year).collect::<Vec<_>>(),
            vec![2020, 2022]
        );
    }

    #[test]
    fn overview_accepts_inline_summary() {
        let overview = parse_overview("**1. Summary:** Acme builds anvils.\n2. **Trends:**\n- Up");

        assert_eq!(overview.summary, "Acme builds anvils.");
        assert_eq!(overview.trends, vec!["Up"]);
    }
}
