use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Wicket-keeper marker scorers put in front of the keeper's name.
pub const KEEPER_GLYPH: char = '†';

static CAUGHT: Lazy<Regex> = Lazy::new(|| build(r"(?i)^\s*c\s+(.+?)\s+b(?:\s|$)"));
static CAUGHT_AND_BOWLED: Lazy<Regex> = Lazy::new(|| build(r"(?i)^\s*c\s*&\s*b\s+(.+)$"));
static STUMPED: Lazy<Regex> = Lazy::new(|| build(r"(?i)^\s*(?:stumped|st)\s+(\S+)"));
static RUN_OUT: Lazy<Regex> = Lazy::new(|| build(r"(?i)\brun\s+out\b\s*([^/]*)"));

fn build(pattern: &str) -> Regex {
    // Patterns are literals above; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid dismissal pattern {pattern}: {err}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalKind {
    Caught,
    CaughtAndBowled,
    Stumped,
    RunOut,
}

/// One fielder credited with one dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldingCredit {
    pub kind: DismissalKind,
    pub name: String,
}

/// Extract fielding credits from a scorer's free-text dismissal.
///
/// Every pattern is tried on its own, so an odd string can yield more than one
/// credit. Anything unrecognised (bowled, lbw, not out, retired) yields none.
pub fn parse_dismissal(raw: &str) -> Vec<FieldingCredit> {
    let mut credits = Vec::new();
    if raw.trim().is_empty() {
        return credits;
    }

    if let Some(name) = capture(&CAUGHT, raw) {
        push_credit(&mut credits, DismissalKind::Caught, &name);
    }
    if let Some(name) = capture(&CAUGHT_AND_BOWLED, raw) {
        push_credit(&mut credits, DismissalKind::CaughtAndBowled, &name);
    }
    if let Some(name) = capture(&STUMPED, raw) {
        push_credit(&mut credits, DismissalKind::Stumped, &name);
    }
    if let Some(name) = capture(&RUN_OUT, raw) {
        push_credit(&mut credits, DismissalKind::RunOut, &name);
    }

    credits
}

/// Same as [`parse_dismissal`], treating a missing dismissal as not out.
pub fn parse_optional_dismissal(raw: Option<&str>) -> Vec<FieldingCredit> {
    raw.map(parse_dismissal).unwrap_or_default()
}

/// Strip keeper glyphs and surrounding whitespace.
pub fn normalize_fielder_name(raw: &str) -> String {
    raw.replace(KEEPER_GLYPH, "").trim().to_string()
}

/// Reduce a captured fielder to a bare name.
///
/// `(Gupta)` and `sub (Nair)` credit the bracketed name; a trailing note such as
/// `Rao (sub)` is cut off. Keeper glyphs and whitespace are stripped first.
pub fn clean_fielder_name(raw: &str) -> String {
    let name = normalize_fielder_name(raw);
    let name = strip_substitute_marker(&name);
    let is_open = |c: char| c == '(' || c == '[';
    let is_close = |c: char| c == ')' || c == ']';
    let name = match name.strip_prefix(is_open) {
        Some(inner) => inner.split(is_close).next().unwrap_or(""),
        None => name.split(is_open).next().unwrap_or(""),
    };
    name.trim().to_string()
}

fn strip_substitute_marker(name: &str) -> &str {
    match name.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("sub") => {
            let rest = name[3..].trim_start();
            if rest.starts_with(['(', '[']) { rest } else { name }
        }
        _ => name,
    }
}

fn capture(re: &Regex, raw: &str) -> Option<String> {
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn push_credit(credits: &mut Vec<FieldingCredit>, kind: DismissalKind, raw_name: &str) {
    let name = clean_fielder_name(raw_name);
    // Single letters and stray punctuation are capture noise, not fielders.
    if name.chars().count() <= 1 {
        return;
    }
    credits.push(FieldingCredit { kind, name });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_glyph_and_whitespace() {
        assert_eq!(normalize_fielder_name("  †Khan "), "Khan");
        assert_eq!(normalize_fielder_name("† "), "");
    }

    #[test]
    fn caught_name_stops_at_first_bowler_token() {
        let credits = parse_dismissal("c Bobby Brown b Jones");
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].name, "Bobby Brown");
    }

    #[test]
    fn caught_by_keeper_drops_glyph() {
        let credits = parse_dismissal("c †Khan b Rao");
        assert_eq!(credits[0].kind, DismissalKind::Caught);
        assert_eq!(credits[0].name, "Khan");
    }

    #[test]
    fn caught_and_bowled_is_not_read_as_plain_catch() {
        let credits = parse_dismissal("c & b Patel");
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].kind, DismissalKind::CaughtAndBowled);
        assert_eq!(credits[0].name, "Patel");
    }

    #[test]
    fn stumped_long_form() {
        let credits = parse_dismissal("Stumped Verma b Rao");
        assert_eq!(
            credits,
            vec![FieldingCredit {
                kind: DismissalKind::Stumped,
                name: "Verma".to_string(),
            }]
        );
    }

    #[test]
    fn lone_glyph_token_is_discarded() {
        assert!(parse_dismissal("st † Khan b Rao").is_empty());
    }

    #[test]
    fn bare_run_out_has_no_fielder() {
        assert!(parse_dismissal("run out").is_empty());
        assert!(parse_dismissal("run out ()").is_empty());
    }

    #[test]
    fn bracketed_notes_are_cut_from_names() {
        assert_eq!(clean_fielder_name("(Gupta"), "Gupta");
        assert_eq!(clean_fielder_name("Rao (sub)"), "Rao");
        assert_eq!(clean_fielder_name("sub (Nair)"), "Nair");
        assert_eq!(clean_fielder_name("Subhash"), "Subhash");
        assert_eq!(clean_fielder_name("[†Khan]"), "Khan");
    }

    #[test]
    fn run_out_with_trailing_note_credits_fielder() {
        let credits = parse_dismissal("run out Rao (sub)");
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].name, "Rao");
        assert_eq!(parse_dismissal("run out (Gupta/Sharma)")[0].name, "Gupta");
    }

    #[test]
    fn substitute_catch_credits_the_substitute() {
        let credits = parse_dismissal("c sub (Nair) b Iyer");
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].kind, DismissalKind::Caught);
        assert_eq!(credits[0].name, "Nair");
    }

    #[test]
    fn missing_dismissal_is_not_out() {
        assert!(parse_optional_dismissal(None).is_empty());
        assert!(parse_optional_dismissal(Some("   ")).is_empty());
    }
}
