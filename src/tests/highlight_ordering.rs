use super::*;

#[test]
fn groups_follow_their_match_in_ascending_index_order() -> Result<()> {
    let matcher = compile(r"((a)(b))", FlagSet::empty())?;
    let mut engine = engine_with("xab");
    let highlights = engine.highlight_matches(Some(&matcher));

    assert_eq!(
        ranges(&highlights),
        vec![
            (0, 3, SpanKind::Clear),
            (1, 3, SpanKind::Match { ordinal: 0 }),
            (1, 3, SpanKind::Group { match_ordinal: 0, index: 1 }),
            (1, 2, SpanKind::Group { match_ordinal: 0, index: 2 }),
            (2, 3, SpanKind::Group { match_ordinal: 0, index: 3 }),
        ]
    );
    Ok(())
}

#[test]
fn repeated_group_text_uses_real_capture_position() -> Result<()> {
    // The second `ab` is the one captured; a substring search would find the first.
    let matcher = compile(r"ab-(ab)", FlagSet::empty())?;
    let mut engine = engine_with("ab-ab");
    let highlights = engine.highlight_matches(Some(&matcher));

    let group: Vec<_> = highlights
        .group_spans(1)
        .map(|span| (span.start, span.end))
        .collect();
    assert_eq!(group, vec![(3, 5)]);
    Ok(())
}

#[test]
fn match_spans_are_increasing_and_disjoint() -> Result<()> {
    let matcher = compile(r"\w+", FlagSet::empty())?;
    let mut engine = engine_with("the quick  brown fox");
    let highlights = engine.highlight_matches(Some(&matcher));

    let spans: Vec<_> = highlights
        .match_spans()
        .map(|span| (span.start, span.end))
        .collect();
    assert_eq!(spans, vec![(0, 3), (4, 9), (11, 16), (17, 20)]);
    for pair in spans.windows(2) {
        assert!(pair[0].1 <= pair[1].0);
    }
    Ok(())
}

#[test]
fn flags_change_what_is_highlighted() -> Result<()> {
    let text = "Alpha\nbeta\nALPHA";
    let mut engine = engine_with(text);

    let plain = compile(r"^alpha$", FlagSet::empty())?;
    assert_eq!(engine.highlight_matches(Some(&plain)).match_count(), 0);

    let case_only = compile(r"^alpha$", FlagSet::from(Flag::CaseInsensitive))?;
    assert_eq!(engine.highlight_matches(Some(&case_only)).match_count(), 0);

    let both = compile(r"^alpha$", Flag::CaseInsensitive | Flag::MultilineAnchors)?;
    let highlights = engine.highlight_matches(Some(&both));
    let spans: Vec<_> = highlights
        .match_spans()
        .map(|span| (span.start, span.end))
        .collect();
    assert_eq!(spans, vec![(0, 5), (11, 16)]);

    let dot = compile(r"a.b", FlagSet::empty())?;
    let dot_all = compile(r"a.b", FlagSet::from(Flag::DotMatchesAll))?;
    engine.set_text("a\nb");
    assert_eq!(engine.highlight_matches(Some(&dot)).match_count(), 0);
    assert_eq!(engine.highlight_matches(Some(&dot_all)).match_count(), 1);
    Ok(())
}

#[test]
fn offsets_follow_configured_unit() -> Result<()> {
    let matcher = compile(r"(d)own", FlagSet::from(Flag::CaseInsensitive))?;
    let text = "🎉 Downloads";

    let expected = [
        (OffsetUnit::Byte, (0, 14), (5, 9), (5, 6)),
        (OffsetUnit::Char, (0, 11), (2, 6), (2, 3)),
        (OffsetUnit::Utf16, (0, 12), (3, 7), (3, 4)),
    ];
    for (unit, clear, whole, group) in expected {
        let config = SessionConfig::default().with_offset_unit(unit);
        let mut engine = HighlightEngine::with_config(&config);
        engine.set_text(text);
        let highlights = engine.highlight_matches(Some(&matcher));
        let spans = highlights.spans();
        assert_eq!((spans[0].start, spans[0].end), clear, "{unit:?}");
        assert_eq!((spans[1].start, spans[1].end), whole, "{unit:?}");
        assert_eq!((spans[2].start, spans[2].end), group, "{unit:?}");
        assert_eq!(spans[0].end, text_len(text, unit));
    }
    Ok(())
}

#[test]
fn find_matches_reports_library_scan() -> Result<()> {
    let matcher = compile(r"(?i)(b)a", FlagSet::empty())?;
    let found: Vec<_> = HighlightEngine::find_matches(Some(&matcher), "BA ba xa")
        .collect::<std::result::Result<Vec<_>, _>>()?;
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].whole().as_str(), "BA");
    assert_eq!(found[1].get(1).map(GroupMatch::range), Some(3..4));
    Ok(())
}
