use crate::utils::crawler::Page;
use reqwest::Url;
use std::net::IpAddr;

const THIN_CONTEXT_CHARS: usize = 100;

/// Second-level labels that form a public suffix under a country TLD, as in `co.uk`.
const SECOND_LEVEL_SUFFIXES: [&str; 9] = ["co", "com", "ac", "gov", "org", "net", "ne", "or", "edu"];

#[derive(Debug, PartialEq, Eq)]
pub enum UrlError {
    Blank,
    Unparseable,
    UnsupportedScheme,
    MissingHost,
}

/// What the analysis knows about a company: its name, where it was read from and the page text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyContext {
    pub name: String,
    pub url: Url,
    pub text: String,
    pub links: Vec<String>,
}

impl CompanyContext {
    pub fn from_page(url: &Url, page: Page, max_chars: usize) -> Self {
        Self {
            name: company_name_from_url(url),
            url: url.clone(),
            text: truncate_chars(&page.text, max_chars),
            links: page.links,
        }
    }

    /// Too little page text to ground an analysis on.
    pub fn is_thin(&self) -> bool {
        self.text.chars().filter(|c| !c.is_whitespace()).count() < THIN_CONTEXT_CHARS
    }
}

/// Accepts bare domains by assuming `https://`.
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlError::Blank);
    }

    let lowered = raw.to_lowercase();
    let candidate = match lowered.starts_with("http://") || lowered.starts_with("https://") {
        true => raw.to_string(),
        false if raw.contains("://") => return Err(UrlError::UnsupportedScheme),
        false => format!("https://{raw}"),
    };

    let url = Url::parse(&candidate).map_err(|_| UrlError::Unparseable)?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}

/// Derives a display name from the registrable label of the host, e.g. `Infosys` for
/// `https://www.infosys.com/investors`.
pub fn company_name_from_url(url: &Url) -> String {
    let host = match url.host_str() {
        Some(host) => host.to_lowercase(),
        None => return String::new(),
    };
    if host.trim_matches(['[', ']']).parse::<IpAddr>().is_ok() {
        return host;
    }

    let labels = host
        .trim_start_matches("www.")
        .split('.')
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>();

    let label = match labels.as_slice() {
        [] => "",
        [only] => *only,
        [.., registrable, second_level, country]
            if country.len() == 2 && SECOND_LEVEL_SUFFIXES.contains(second_level) =>
        {
            *registrable
        }
        [.., registrable, _suffix] => *registrable,
    };

    capitalize(label)
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn normalizes_bare_domains() {
        assert_eq!(
            normalize_url(" acme.com/about ").unwrap().as_str(),
            "https://acme.com/about"
        );
        assert_eq!(
            normalize_url("HTTP://acme.com").unwrap().as_str(),
            "http://acme.com/"
        );
    }

    #[test]
    fn rejects_unusable_urls() {
        assert_eq!(normalize_url("  ").unwrap_err(), UrlError::Blank);
        assert_eq!(
            normalize_url("ftp://acme.com").unwrap_err(),
            UrlError::UnsupportedScheme
        );
        assert_eq!(
            normalize_url("not a url at all").unwrap_err(),
            UrlError::Unparseable
        );
    }

    #[test]
    fn derives_company_names() {
        assert_eq!(company_name_from_url(&url("https://www.infosys.com/investors")), "Infosys");
        assert_eq!(company_name_from_url(&url("https://investor.apple.com")), "Apple");
        assert_eq!(company_name_from_url(&url("https://www.tesco.co.uk")), "Tesco");
        assert_eq!(company_name_from_url(&url("https://shop.bhp.com.au/x")), "Bhp");
        assert_eq!(company_name_from_url(&url("https://investor.bmw.de")), "Bmw");
        assert_eq!(company_name_from_url(&url("https://careers.sap.de")), "Sap");
        assert_eq!(company_name_from_url(&url("https://www.toyota.co.jp")), "Toyota");
        assert_eq!(company_name_from_url(&url("http://localhost:8080")), "Localhost");
        assert_eq!(company_name_from_url(&url("http://127.0.0.1/")), "127.0.0.1");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("₹100 crore", 4), "₹100");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn thin_context_is_detected() {
        let page = Page {
            text: "Acme makes anvils.".to_string(),
            links: vec![],
        };
        let context = CompanyContext::from_page(&url("https://acme.com"), page, 8000);

        assert_eq!(context.name, "Acme");
        assert!(context.is_thin());

        let page = Page {
            text: "Acme makes anvils. ".repeat(10),
            links: vec![],
        };
        assert!(!CompanyContext::from_page(&url("https://acme.com"), page, 8000).is_thin());
    }
}
