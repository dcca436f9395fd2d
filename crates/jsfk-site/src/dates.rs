//! Localized date formatting.
//!
//! Supports the small token set used by the site's listings: `YYYY`, `YY`,
//! `MMMM`, `MMM`, `MM`, `M`, `DD` and `D`. Text inside `[...]` is copied
//! verbatim.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const RU_MONTHS: [&str; 12] = [
    "январь", "февраль", "март", "апрель", "май", "июнь", "июль", "август", "сентябрь",
    "октябрь", "ноябрь", "декабрь",
];
const RU_MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];
const RU_MONTHS_SHORT: [&str; 12] = [
    "янв.", "февр.", "март", "апр.", "май", "июнь", "июль", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];
const RU_MONTHS_SHORT_GENITIVE: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июня", "июля", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Year4,
    Year2,
    MonthLong,
    MonthShort,
    Month2,
    Month,
    Day2,
    Day,
    Literal(&'a str),
}

const TOKENS: [(&str, Token<'static>); 8] = [
    ("YYYY", Token::Year4),
    ("YY", Token::Year2),
    ("MMMM", Token::MonthLong),
    ("MMM", Token::MonthShort),
    ("MM", Token::Month2),
    ("M", Token::Month),
    ("DD", Token::Day2),
    ("D", Token::Day),
];

fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = pattern;

    'outer: while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            if let Some(end) = after.find(']') {
                tokens.push(Token::Literal(&after[..end]));
                rest = &after[end + 1..];
                continue;
            }
        }

        for (text, token) in TOKENS {
            if let Some(after) = rest.strip_prefix(text) {
                tokens.push(token);
                rest = after;
                continue 'outer;
            }
        }

        let len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        tokens.push(Token::Literal(&rest[..len]));
        rest = &rest[len..];
    }

    tokens
}

/// Russian uses genitive month names when the day precedes the month.
fn uses_genitive(pattern: &str) -> bool {
    static DAY_BEFORE_MONTH: OnceLock<Regex> = OnceLock::new();
    DAY_BEFORE_MONTH
        .get_or_init(|| Regex::new(r"D[oD]?(\[[^\[\]]*\]|\s)+MMMM?").expect("valid pattern"))
        .is_match(pattern)
}

fn is_russian(lang: &str) -> bool {
    lang == "ru" || lang.starts_with("ru-")
}

/// Format `date` with a dayjs-style `pattern` in the given language.
///
/// Unknown languages fall back to English month names.
pub fn format_date(date: &DateTime<Utc>, pattern: &str, lang: &str) -> String {
    let month = date.month0() as usize;
    let russian = is_russian(lang);
    let genitive = russian && uses_genitive(pattern);

    let mut out = String::with_capacity(pattern.len() + 8);
    for token in tokenize(pattern) {
        match token {
            Token::Year4 => out.push_str(&format!("{:04}", date.year())),
            Token::Year2 => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
            Token::MonthLong => out.push_str(match (russian, genitive) {
                (true, true) => RU_MONTHS_GENITIVE[month],
                (true, false) => RU_MONTHS[month],
                _ => EN_MONTHS[month],
            }),
            Token::MonthShort => out.push_str(match (russian, genitive) {
                (true, true) => RU_MONTHS_SHORT_GENITIVE[month],
                (true, false) => RU_MONTHS_SHORT[month],
                _ => EN_MONTHS_SHORT[month],
            }),
            Token::Month2 => out.push_str(&format!("{:02}", month + 1)),
            Token::Month => out.push_str(&(month + 1).to_string()),
            Token::Day2 => out.push_str(&format!("{:02}", date.day())),
            Token::Day => out.push_str(&date.day().to_string()),
            Token::Literal(text) => out.push_str(text),
        }
    }

    out
}

/// Whether `date` lies after `now`.
pub fn is_future(date: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    date > now
}
