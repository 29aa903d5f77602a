use super::company::CompanyContext;

/// The page text block every prompt ends with. Thin pages ask the model to lean on what it
/// already knows about the company instead.
fn company_info(company: &CompanyContext) -> String {
    match company.is_thin() {
        true => format!(
            "Little or no content could be read from {url}. Use your own knowledge of {name}, \
             its industry and similar companies to answer as best as possible.\n",
            url = company.url,
            name = company.name,
        ),
        false => format!(
            "--- START OF BUSINESS CONTENT ({url}) ---\n\n{text}\n\n--- END OF BUSINESS CONTENT ---\n",
            url = company.url,
            text = company.text,
        ),
    }
}

pub fn summary(company: &CompanyContext) -> String {
    format!(
        r#"You are a senior investment analyst preparing a concise executive briefing on {name} for a busy executive.

Instructions:
- Use numbers and named facts where possible (e.g. "2023 revenue: $X billion", "Founded in 19XX").
- Keep the output under 400 words, professional, objective and data-driven.
- Use Markdown with a bold heading for each section.
- Do not use first-person phrases or add introductory or concluding paragraphs.

Briefing structure:

**1. Executive Summary:** one dense paragraph of no more than 3 sentences covering the company's core identity, primary business and market position.

**2. Key Offerings & Business Segments:** a bulleted list of the main products, services or divisions.

**3. Strategic Direction & Initiatives:** a bulleted list of stated strategic goals or areas of focus.

**4. Market Positioning & Target Audience:** 1-2 sentences on the company's position in the market and its primary customers.

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn swot(company: &CompanyContext) -> String {
    format!(
        r#"You are an expert business analyst. Generate a detailed and realistic SWOT analysis for {name}. If information is not explicit, infer likely points from {name}'s industry and similar companies. Do not leave any section blank.

Format as:
Strengths:
- ...
Weaknesses:
- ...
Opportunities:
- ...
Threats:
- ...

Keep the total output under 2500 characters.

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn financials(company: &CompanyContext) -> String {
    format!(
        r#"Extract the following financial metrics for {name} from the text below (if present): Revenue, Net Profit, Growth, Operating Margin. If a metric is not found, say 'N/A'.

Format:
Revenue: ...
Net Profit: ...
Growth: ...
Operating Margin: ...

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn segments(company: &CompanyContext) -> String {
    format!(
        r#"Extract the business segment breakdown of {name} (segment name and share of revenue in percent) from the text below.

Format, one segment per line:
Segment: %

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn trends(company: &CompanyContext) -> String {
    format!(
        r#"Analyze the following information about {name} and list the most important financial trends or changes from the last 1-3 years.
- Include revenue, profit, growth rates, margins and notable financial events (acquisitions, major investments, restructuring).
- Use numbers and specifics where possible (e.g. 'Revenue grew 10% in 2023 to $X billion').
- Format as a plain bullet list, one trend per line, no code block.
- Keep the output under 2000 characters.

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn risks(company: &CompanyContext) -> String {
    format!(
        r#"Analyze the following information about {name} and list:
- Red Flags: risks, negative trends, controversies or issues that could concern a client or investor.
- Opportunities: growth areas, positive trends, new initiatives or strengths that could be leveraged.

If the information is insufficient, infer likely risks and opportunities from the company's industry, similar companies and recent news. Always provide at least 3 red flags and 3 opportunities.

Format as:
Red Flags:
- ...
Opportunities:
- ...

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn timeline(company: &CompanyContext) -> String {
    format!(
        r#"Extract a timeline of the most important events for {name} (product launches, acquisitions, leadership changes, major partnerships, strategic initiatives).

If company-specific events are not found, infer likely milestones from the company's industry and recent news. Always provide at least 3 events.

Format, one event per line:
YYYY: short description

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn leadership(company: &CompanyContext) -> String {
    format!(
        r#"From the following information, extract ONLY a list of at least 8 key executives of {name} with their titles.
- Do not include a company summary, description or any other information.
- Output ONLY the list, one executive per line, in the format: Name: Title
- If the information names fewer than 8, list the executives you know {name} to have, without explanation.

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn overview(company: &CompanyContext) -> String {
    format!(
        r#"You are a senior business analyst. Analyze the following information about {name} and provide:

1. Summary: a concise executive summary (3-4 sentences).
2. SWOT Analysis: Strengths, Weaknesses, Opportunities, Threats as bullet points.
3. Recent Trends: the most important changes of the last 1-3 years as bullet points.
4. Red Flags & Opportunities as bullet points.
5. Timeline: the most important company events.

Format your response exactly as:

Summary:
...

SWOT:
Strengths:
- ...
Weaknesses:
- ...
Opportunities:
- ...
Threats:
- ...

Trends:
- ...

Red Flags:
- ...
Opportunities:
- ...

Timeline:
2023: ...
2022: ...

{info}"#,
        name = company.name,
        info = company_info(company),
    )
}

pub fn question(company: &CompanyContext, question: &str) -> String {
    format!(
        r#"You are an expert business analyst with deep knowledge of companies, industries and business strategy. Use the information below about {name} to answer the user's question professionally.

Instructions:
- Give factual answers based on the available information; include numbers and metrics for financial questions.
- If the information is not available, use your own knowledge to answer as best as possible.
- Keep answers concise: 2-4 sentences for simple questions, up to 6 for complex ones.
- If the question is unclear, give a general answer about the company.

{info}
Question: {question}

Answer:"#,
        name = company.name,
        info = company_info(company),
    )
}
