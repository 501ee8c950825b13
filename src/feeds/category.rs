use once_cell::sync::Lazy;
use regex::Regex;

/// Category assigned when no keyword matches
pub const DEFAULT_CATEGORY: &str = "altro";

/// Ordered keyword table. The first category with a matching keyword wins, so order matters.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "forfetario",
        &["forfettario", "forfetario", "regime forfettario"],
    ),
    ("IVA", &["IVA", "imposta sul valore aggiunto"]),
    (
        "dichiarazioni",
        &[
            "dichiarazione dei redditi",
            "modello unico",
            "730",
            "dichiarazioni",
        ],
    ),
    ("scadenze", &["scadenze", "adempimenti fiscali", "termini"]),
    ("società", &["società", "SRL", "SPA", "societario"]),
    (
        "agevolazioni",
        &["agevolazioni", "bonus", "credito d'imposta", "incentivi"],
    ),
    (
        "lavoro",
        &["lavoro", "dipendenti", "autonomo", "collaborazione"],
    ),
    ("contabilità", &["contabilità", "bilancio", "registrazioni"]),
];

// One case-insensitive alternation per category, in table order. Keywords match anywhere in
// the text ("superbonus" matches "bonus"), except acronyms, which must stand alone.
static CATEGORY_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| keyword_pattern(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!("(?i){alternation}")).unwrap();
            (*category, pattern)
        })
        .collect()
});

/// Short uppercase or numeric keywords (IVA, SRL, SPA, 730)
fn is_acronym(keyword: &str) -> bool {
    keyword
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn keyword_pattern(keyword: &str) -> String {
    let escaped = regex::escape(keyword);
    if is_acronym(keyword) {
        format!(r"\b{escaped}\b")
    } else {
        escaped
    }
}

/// Infer a topical category from an article's title and description
pub fn infer_category(title: &str, description: &str) -> &'static str {
    // typographic apostrophes are common in Italian feeds
    let text = format!("{title} {description}").replace('\u{2019}', "'");
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&text))
        .map_or(DEFAULT_CATEGORY, |(category, _)| *category)
}

/// All category names, in match order, followed by the default
pub fn category_names() -> impl Iterator<Item = &'static str> {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, _)| *category)
        .chain(std::iter::once(DEFAULT_CATEGORY))
}
