use super::*;

#[test]
fn typing_pattern_then_text_highlights_live() {
    let mut session = Session::new();
    let update = session.pattern_text_changed(r"o(\w)").expect("not blocked");
    assert_eq!(update.compile_state(), CompileState::Compiled);
    assert_eq!(update.highlights().match_count(), 0);

    let update = session.input_text_changed("foo bot").expect("not blocked");
    assert_eq!(update.highlights().match_count(), 2);
    assert_eq!(update.spans().len(), 5);
    assert_eq!(session.highlights(), update.highlights());
}

#[test]
fn invalid_pattern_reports_error_and_recovers() {
    let mut session = Session::new();
    session.input_text_changed("(a)");

    let update = session.pattern_text_changed("(a").expect("not blocked");
    assert_eq!(update.compile_state(), CompileState::Failed);
    assert!(update.pattern_error().is_some());
    assert_eq!(update.spans().len(), 1);
    assert_eq!(session.pattern_error(), update.pattern_error());

    let update = session.pattern_text_changed(r"\(a\)").expect("not blocked");
    assert_eq!(update.pattern_error(), None);
    assert_eq!(update.highlights().match_count(), 1);
}

#[test]
fn clearing_pattern_is_not_an_error() {
    let mut session = Session::new();
    session.input_text_changed("text");
    session.pattern_text_changed("t");
    let update = session.pattern_text_changed("").expect("not blocked");
    assert_eq!(update.compile_state(), CompileState::Empty);
    assert_eq!(update.pattern_error(), None);
    assert_eq!(update.spans().len(), 1);
}

#[test]
fn flag_toggles_recompile_and_rehighlight() {
    let mut session = Session::new();
    session.input_text_changed("Cat cat CAT");
    session.pattern_text_changed("cat");
    assert_eq!(session.highlights().match_count(), 1);

    let update = session
        .flag_toggled(Flag::CaseInsensitive, true)
        .expect("not blocked");
    assert_eq!(update.highlights().match_count(), 3);

    session.flag_toggled(Flag::CaseInsensitive, true);
    assert_eq!(session.compiler().flags(), FlagSet::from(Flag::CaseInsensitive));

    let update = session
        .dispatch(InputEvent::FlagToggled(Flag::CaseInsensitive, false))
        .expect("not blocked");
    assert_eq!(update.highlights().match_count(), 1);
}

#[test]
fn apply_blocks_feedback_events() {
    let mut session = Session::new();
    session.input_text_changed("aa");
    session.pattern_text_changed("(a)");

    let blocker = session.signal_blocker();
    let mut applied = Vec::new();
    let mut blocked_during_apply = true;
    let count = session.apply(&mut |span: &HighlightSpan| {
        blocked_during_apply &= blocker.is_blocked();
        applied.push(*span);
    });

    assert_eq!(count, 5);
    assert!(blocked_during_apply);
    assert!(!blocker.is_blocked());
    assert_eq!(applied, session.highlights().spans());
}

#[test]
fn events_are_ignored_while_signals_are_blocked() {
    let mut session = Session::new();
    session.enable_trace(true);
    session.input_text_changed("abc");

    let blocker = session.signal_blocker();
    {
        let _guard = blocker.block();
        assert!(session.input_text_changed("changed by apply").is_none());
        assert!(session.pattern_text_changed("b").is_none());
        assert!(session.flag_toggled(Flag::DotMatchesAll, true).is_none());
    }
    assert_eq!(session.snapshot().text, "abc");
    assert_eq!(session.snapshot().pattern, "");

    let logs = session.take_trace_logs();
    assert!(
        logs.iter()
            .any(|line| line.contains("ignored while applying highlights")),
        "{logs:?}"
    );
    assert!(session.pattern_text_changed("b").is_some());
}

#[test]
fn nested_guards_restore_outer_state() {
    let blocker = SignalBlocker::default();
    let outer = blocker.block();
    {
        let _inner = blocker.block();
        assert!(blocker.is_blocked());
    }
    assert!(blocker.is_blocked());
    drop(outer);
    assert!(!blocker.is_blocked());
}

#[test]
fn evaluate_snapshot_matches_incremental_events() {
    let snapshot = Snapshot {
        pattern: r"^(\w+)$".into(),
        flags: "m".parse().expect("valid flags"),
        text: "one\ntwo".into(),
    };

    let mut incremental = Session::new();
    incremental.input_text_changed(&snapshot.text);
    incremental.flag_toggled(Flag::MultilineAnchors, true);
    let expected = incremental
        .pattern_text_changed(&snapshot.pattern)
        .expect("not blocked");

    let mut direct = Session::new();
    let update = direct.evaluate(&snapshot).expect("not blocked");
    assert_eq!(update, expected);
    assert_eq!(direct.snapshot(), snapshot);
    assert_eq!(update.highlights().match_count(), 2);
}

#[test]
fn pattern_change_policy_resets_colors() {
    let config = SessionConfig::default().with_color_reset(ColorResetPolicy::OnPatternChange);
    let mut session = Session::with_config(config);
    session.input_text_changed("xy");
    session.pattern_text_changed("x");
    let first = session.engine().match_color(0);

    session.pattern_text_changed("x");
    assert_eq!(session.engine().match_color(0), first);

    session.pattern_text_changed("y");
    assert_ne!(session.engine().match_color(0), first);

    let mut keep = Session::new();
    keep.input_text_changed("xy");
    keep.pattern_text_changed("x");
    let kept = keep.engine().match_color(0);
    keep.pattern_text_changed("y");
    assert_eq!(keep.engine().match_color(0), kept);
}

#[test]
fn update_converts_into_output_events() {
    let mut session = Session::new();
    session.input_text_changed("q");
    let update = session.pattern_text_changed("*").expect("not blocked");
    let [ready, error] = update.into_events();
    assert!(matches!(ready, OutputEvent::HighlightsReady(spans) if spans.len() == 1));
    assert!(matches!(error, OutputEvent::PatternError(Some(_))));
}

#[test]
fn trace_records_events_and_passes() -> Result<()> {
    let mut session = Session::with_config(SessionConfig::default().with_trace(true));
    session.set_trace_log_limit(3)?;
    session.pattern_text_changed("a");
    session.input_text_changed("aaa");

    let logs = session.take_trace_logs();
    assert_eq!(logs.len(), 3);
    assert!(logs[0].starts_with("[pass]"));
    assert!(logs[1].starts_with("[event] input_text_changed"));
    assert!(logs[2].contains("matches=3"));

    session.set_trace_passes(false);
    session.refresh();
    assert!(session.take_trace_logs().is_empty());
    assert!(session.set_trace_log_limit(0).is_err());
    Ok(())
}
