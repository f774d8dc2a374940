use lbpl_stats::dismissal::{parse_dismissal, DismissalKind, FieldingCredit};

fn single(raw: &str) -> FieldingCredit {
    let credits = parse_dismissal(raw);
    assert_eq!(credits.len(), 1, "expected one credit for {raw:?}, got {credits:?}");
    credits.into_iter().next().unwrap()
}

#[test]
fn caught_credits_the_catcher() {
    let credit = single("c Smith b Jones");
    assert_eq!(credit.kind, DismissalKind::Caught);
    assert_eq!(credit.name, "Smith");
}

#[test]
fn caught_and_bowled_credits_the_bowler() {
    let credit = single("c&b Patel");
    assert_eq!(credit.kind, DismissalKind::CaughtAndBowled);
    assert_eq!(credit.name, "Patel");
}

#[test]
fn stumping_strips_keeper_glyph() {
    let credit = single("st †Khan b Rao");
    assert_eq!(credit.kind, DismissalKind::Stumped);
    assert_eq!(credit.name, "Khan");
}

#[test]
fn run_out_takes_first_fielder() {
    let credit = single("run out (Gupta)/Sharma");
    assert_eq!(credit.kind, DismissalKind::RunOut);
    assert_eq!(credit.name, "Gupta");

    assert_eq!(single("run out (Rao)").name, "Rao");
    assert_eq!(single("Run Out Verma").name, "Verma");
}

#[test]
fn patterns_are_case_insensitive() {
    assert_eq!(single("C Smith B Jones").name, "Smith");
    assert_eq!(single("C&B Patel").kind, DismissalKind::CaughtAndBowled);
    assert_eq!(single("ST Khan b Rao").kind, DismissalKind::Stumped);
}

#[test]
fn unrecognised_dismissals_yield_nothing() {
    for raw in [
        "",
        "not out",
        "b Singh",
        "lbw b Singh",
        "retired hurt",
        "hit wicket b Rao",
        "absent",
        "???",
    ] {
        assert!(parse_dismissal(raw).is_empty(), "{raw:?} should not credit anyone");
    }
}

#[test]
fn single_character_names_are_discarded() {
    assert!(parse_dismissal("c X b Jones").is_empty());
    assert!(parse_dismissal("c&b P").is_empty());
    assert!(parse_dismissal("st † b Rao").is_empty());
    assert!(parse_dismissal("run out (G)").is_empty());
}

#[test]
fn independent_patterns_can_all_fire() {
    // Garbled entry that mentions both a catch and a run out.
    let credits = parse_dismissal("c Smith b Jones run out (Gupta)");
    let kinds: Vec<DismissalKind> = credits.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![DismissalKind::Caught, DismissalKind::RunOut]);
    assert_eq!(credits[1].name, "Gupta");
}
