use regex::Regex;
use reqwest::Url;
use std::collections::HashSet;
use std::sync::LazyLock;

const STRIPPED_BLOCKS: [&str; 7] = [
    "script", "style", "nav", "header", "footer", "aside", "noscript",
];

const IR_KEYWORDS: [&str; 9] = [
    "pdf",
    "xls",
    "xlsx",
    "investor",
    "presentation",
    "results",
    "earnings",
    "annual-report",
    "/ir/",
];

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"));

static BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STRIPPED_BLOCKS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("Invalid block regex")
        })
        .collect()
});

static CONTENT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)(?:p|li|h1|h2|h3)\b[^>]*>").expect("Invalid content regex")
});

static BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").expect("Invalid body regex"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("Invalid entity regex")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']([^"']+)["']"#).expect("Invalid href regex")
});

fn decode_entity(entity: &str) -> Option<String> {
    let decoded = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '-',
        "mdash" => '-',
        "rsquo" | "lsquo" => '\'',
        "rdquo" | "ldquo" => '"',
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };

    Some(decoded.to_string())
}

fn to_plain_text(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, " ");
    let decoded = ENTITY.replace_all(&without_tags, |caps: &regex::Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Text of the outermost content elements, in document order. Nested content elements are
/// flattened into their parent and an element left open runs to the end of the document.
fn content_fragments(html: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for caps in CONTENT_TAG.captures_iter(html) {
        let Some(tag) = caps.get(0) else {
            continue;
        };
        let closing = !caps[1].is_empty();

        match (closing, depth) {
            (false, 0) => {
                start = tag.end();
                depth = 1;
            }
            (false, _) => depth += 1,
            (true, 0) => {}
            (true, 1) => {
                fragments.push(to_plain_text(&html[start..tag.start()]));
                depth = 0;
            }
            (true, _) => depth -= 1,
        }
    }
    if depth > 0 {
        fragments.push(to_plain_text(&html[start..]));
    }

    fragments.retain(|text| !text.is_empty());
    fragments
}

/// Reduces an HTML document to the readable text of its paragraphs, list items and headings.
pub fn extract_text(html: &str) -> String {
    let mut cleaned = COMMENT.replace_all(html, " ").into_owned();
    for block in BLOCKS.iter() {
        cleaned = block.replace_all(&cleaned, " ").into_owned();
    }

    let fragments = content_fragments(&cleaned);
    if !fragments.is_empty() {
        return fragments.join(" ");
    }

    match BODY.captures(&cleaned) {
        Some(caps) => to_plain_text(&caps[1]),
        None => to_plain_text(&cleaned),
    }
}

/// Collects links to investor-relations material, resolved against the page URL.
pub fn extract_ir_links(base: &Url, html: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    HREF.captures_iter(html)
        .filter_map(|caps| {
            let href = caps[1].trim();
            let lowered = href.to_lowercase();
            if !IR_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
                return None;
            }

            let resolved = base.join(href).ok()?;
            match resolved.scheme() {
                "http" | "https" => Some(resolved.to_string()),
                _ => None,
            }
        })
        .filter(|link| seen.insert(link.clone()))
        .collect()
}
