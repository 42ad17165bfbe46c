use super::*;

fn consume_n(stream: &mut impl IntStream, n: usize) {
    for _ in 0..n {
        stream.consume().unwrap();
    }
}

#[test]
fn folds_single_chars() {
    assert_eq!(CaseMode::Lower.fold('A'), 'a');
    assert_eq!(CaseMode::Lower.fold('a'), 'a');
    assert_eq!(CaseMode::Upper.fold('a'), 'A');
    assert_eq!(CaseMode::Lower.fold('Σ'), 'σ');
    assert_eq!(CaseMode::Upper.fold('7'), '7');
}

#[test]
fn keeps_original_when_fold_expands() {
    // 'İ' lowercases to "i\u{307}", 'ß' uppercases to "SS"
    assert_eq!(CaseMode::Lower.fold('İ'), 'İ');
    assert_eq!(CaseMode::Upper.fold('ß'), 'ß');
    assert_eq!(CaseMode::Upper.fold('ﬁ'), 'ﬁ');
    assert_eq!(CaseMode::Lower.fold('ß'), 'ß');
}

#[test]
fn lookahead_buffer_has_one_entry_per_char() {
    let buffer = LookaheadBuffer::new("İstanbul", CaseMode::Lower);
    assert_eq!(buffer.len(), "İstanbul".chars().count());
    assert_eq!(buffer.as_slice()[0], 'İ' as u32);
    assert_eq!(buffer.as_slice()[1], 's' as u32);

    let buffer = LookaheadBuffer::new("Straße", CaseMode::Upper);
    let expected: Vec<u32> = "STRAßE".chars().map(|c| c as u32).collect();
    assert_eq!(buffer.as_slice(), expected.as_slice());
}

#[test]
fn lookahead_offset_zero_is_undefined() {
    let mut stream = CaseInsensitiveInputStream::new("abc", CaseMode::Upper);
    assert_eq!(stream.la(0), UNDEFINED);
    consume_n(&mut stream, 3);
    assert_eq!(stream.la(0), UNDEFINED);

    let empty = CaseInsensitiveInputStream::new("", CaseMode::Upper);
    assert_eq!(empty.la(0), UNDEFINED);
}

#[test]
fn lookahead_past_edges_is_eof() {
    let mut stream = CaseInsensitiveInputStream::new("ab", CaseMode::Upper);
    assert_eq!(stream.la(-1), EOF);
    assert_eq!(stream.la(1), 'A' as isize);
    assert_eq!(stream.la(2), 'B' as isize);
    assert_eq!(stream.la(3), EOF);
    assert_eq!(stream.la(isize::MAX / 2), EOF);

    consume_n(&mut stream, 2);
    assert_eq!(stream.la(1), EOF);
    assert_eq!(stream.la(-2), 'A' as isize);
    assert_eq!(stream.la(-3), EOF);

    let empty = CaseInsensitiveInputStream::new("", CaseMode::Lower);
    assert_eq!(empty.la(1), EOF);
    assert_eq!(empty.la(-1), EOF);
}

#[test]
fn lookahead_behind_reads_last_consumed() {
    let mut stream = CaseInsensitiveInputStream::new("SeLeCt", CaseMode::Lower);
    stream.consume().unwrap();
    assert_eq!(stream.la(-1), 's' as isize);
    consume_n(&mut stream, 2);
    assert_eq!(stream.la(-1), 'l' as isize);
    assert_eq!(stream.la(1), 'e' as isize);
}

#[test]
fn lookahead_does_not_move_cursor() {
    let stream = CaseInsensitiveInputStream::new("xyz", CaseMode::Upper);
    let _ = stream.la(1);
    let _ = stream.la(3);
    let _ = stream.la(-1);
    assert_eq!(stream.index(), 0);
}

#[test]
fn text_keeps_original_case() {
    let mut stream = CaseInsensitiveInputStream::new("Select Name", CaseMode::Lower);
    assert_eq!(stream.text(Interval::new(0, 5)), "Select");
    assert_eq!(stream.text((7..=100).into()), "Name");
    assert_eq!(stream.text(Interval::new(0, stream.size() - 1)), "Select Name");
    assert_eq!(stream.text(Interval::new(11, 12)), "");
    assert_eq!(stream.text(Interval::new(3, 2)), "");

    consume_n(&mut stream, 6);
    assert_eq!(stream.la(1), ' ' as isize);
    assert_eq!(stream.la(2), 'n' as isize);
}

#[test]
fn consume_at_end_is_an_error() {
    let mut stream = InputStream::new("a");
    assert_eq!(stream.consume(), Ok(()));
    assert_eq!(stream.consume(), Err(StreamError::ConsumeAtEof));
    assert_eq!(stream.index(), 1);
}

#[test]
fn seek_is_clamped() {
    let mut stream = InputStream::new("abc");
    stream.seek(2);
    assert_eq!(stream.la(1), 'c' as isize);
    stream.seek(10);
    assert_eq!(stream.index(), 3);
    assert_eq!(stream.la(1), EOF);
}

#[test]
fn plain_stream_does_not_fold() {
    let stream = InputStream::new("Ab");
    assert_eq!(stream.la(1), 'A' as isize);
    assert_eq!(stream.la(2), 'b' as isize);
    assert_eq!(stream.source_name(), UNKNOWN_SOURCE_NAME);
    assert_eq!(stream.with_name("Text").source_name(), "Text");
}

#[test]
fn marks_are_inert() {
    let mut stream = CaseInsensitiveInputStream::new("ab", CaseMode::Lower);
    let marker = stream.mark();
    assert_eq!(marker, -1);
    stream.consume().unwrap();
    stream.release(marker);
    assert_eq!(stream.index(), 1);
}

#[test]
fn lookahead_buffer_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LookaheadBuffer>();
    assert_send_sync::<CaseInsensitiveInputStream>();
}
