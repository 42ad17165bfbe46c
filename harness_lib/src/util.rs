use std::time::Duration;

/// Makes control whitespace visible: `\t`, `\n` and `\r` become `\\t`, `\\n` and `\\r`.
pub fn escape_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Formats a duration as `hh:mm:ss.fffffff` (100ns ticks), the constant time-span format the
/// grammar editor reads back.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let ticks = elapsed.subsec_nanos() / 100;
    format!(
        "{:02}:{:02}:{:02}.{:07}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        ticks
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_control_whitespace_only() {
        assert_eq!(escape_whitespace("a b\tc\r\n"), "a b\\tc\\r\\n");
        assert_eq!(escape_whitespace(""), "");
    }

    #[test]
    fn formats_elapsed_like_a_time_span() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00:00.0000000");
        assert_eq!(
            format_elapsed(Duration::from_micros(1_234_567)),
            "00:00:01.2345670"
        );
        assert_eq!(
            format_elapsed(Duration::from_secs(3 * 3600 + 25 * 60 + 7)),
            "03:25:07.0000000"
        );
    }
}
