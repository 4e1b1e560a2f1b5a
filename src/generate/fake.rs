//! Random placeholder values for generated entities.

use rand::seq::SliceRandom;
use rand::Rng;

const WORDS: &[&str] = &[
    "alpha", "billing", "cache", "delta", "engine", "format", "gateway", "harbor", "invoice",
    "journal", "kernel", "ledger", "module", "network", "order", "portal", "queue", "refund",
    "signal", "ticket", "update", "vector", "widget", "yield", "zone",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Brian", "Chloe", "Dmitri", "Elena", "Farah", "Gustav", "Hana", "Ivan", "Jun",
    "Keira", "Liam", "Maya", "Nikhil", "Olga", "Pedro",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Brennan", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Hughes",
    "Ivanova", "Jensen", "Kowalski", "Lopez", "Murphy", "Nakamura", "O'Neill", "Park",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Acme", "Blue Harbor", "Copperleaf", "Driftwood", "Evergreen", "Foxglove", "Granite",
    "Helix", "Ironbark", "Juniper",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "Labs", "Partners", "Systems"];

const TLDS: &[&str] = &["com", "net", "org", "io", "dev"];

const FILE_EXTENSIONS: &[&str] = &["jpg", "png", "pdf", "txt", "csv", "docx"];

const SAFE_COLORS: &[&str] = &[
    "black", "maroon", "green", "navy", "olive", "purple", "teal", "lime", "blue", "silver",
    "gray", "yellow", "fuchsia", "aqua", "white",
];

fn pick(items: &[&'static str]) -> &'static str {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

/// Uniform integer in `low..=high`.
pub fn number(low: i64, high: i64) -> i64 {
    rand::thread_rng().gen_range(low..=high)
}

pub fn word() -> String {
    pick(WORDS).to_string()
}

/// A capitalised sentence of `words` words ending in a full stop.
pub fn sentence(words: usize) -> String {
    let mut text = (0..words.max(1)).map(|_| pick(WORDS)).collect::<Vec<_>>().join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

/// `sentences` sentences of `words` words each, joined by `separator`.
pub fn paragraph(sentences: usize, words: usize, separator: &str) -> String {
    (0..sentences.max(1))
        .map(|_| sentence(words))
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn first_name() -> String {
    pick(FIRST_NAMES).to_string()
}

pub fn last_name() -> String {
    pick(LAST_NAMES).to_string()
}

pub fn company() -> String {
    format!("{} {}", pick(COMPANY_PREFIXES), pick(COMPANY_SUFFIXES))
}

pub fn domain_name() -> String {
    format!("{}{}.{}", pick(WORDS), number(1, 999), pick(TLDS))
}

pub fn email() -> String {
    format!(
        "{}.{}{}@{}",
        first_name().to_lowercase(),
        last_name().to_lowercase().replace('\'', ""),
        number(1, 99),
        domain_name()
    )
}

pub fn safe_color() -> String {
    pick(SAFE_COLORS).to_string()
}

pub fn file_extension() -> String {
    pick(FILE_EXTENSIONS).to_string()
}

/// Bytes framed as a JPEG stream (SOI/EOI markers around noise). Enough
/// for upload targets that sniff the header.
pub fn jpeg(width: u16, height: u16) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let size = usize::from(width) * usize::from(height) / 64;

    let mut bytes = Vec::with_capacity(size + 4);
    bytes.extend_from_slice(&[0xFF, 0xD8]);
    bytes.extend((0..size).map(|_| rng.gen_range(0x00..0xFF_u8)));
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}
