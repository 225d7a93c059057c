use crate::transcription::Segment;

/// Renders segments into the published transcript format.
///
/// Each segment becomes one paragraph of the form
/// `[MM:SS.ss - MM:SS.ss] text` followed by a blank line, in input
/// order. No wrapping, no trimming.
#[derive(Debug, Clone, Default)]
pub struct TranscriptFormatter;

impl TranscriptFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render all segments in input order.
    pub fn render(&self, segments: &[Segment]) -> String {
        let mut document = String::new();

        for segment in segments {
            document.push_str(&format!(
                "[{} - {}] {}\n\n",
                format_timestamp(segment.start),
                format_timestamp(segment.end),
                segment.text
            ));
        }

        document
    }
}

/// Format seconds as `MM:SS.ss`.
///
/// Minutes are the whole quotient, zero-padded to two digits and
/// growing naturally past 99; seconds are the remainder to two
/// decimals. A remainder that rounds up to 60 renders as "60.00" and
/// is not carried into the minutes.
pub fn format_timestamp(seconds: f64) -> String {
    format!("{:02}:{:05.2}", (seconds / 60.0) as u64, seconds % 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_timestamp_formatting() {
        assert_eq!(format_timestamp(0.0), "00:00.00");
        assert_eq!(format_timestamp(5.2), "00:05.20");
        assert_eq!(format_timestamp(125.3), "02:05.30");
        assert_eq!(format_timestamp(600.0), "10:00.00");
    }

    #[test]
    fn test_timestamp_minute_boundary_rounding() {
        // 59.999 rounds to a 60-second remainder without carrying
        // into the minutes.
        assert_eq!(format_timestamp(59.999), "00:60.00");
    }

    #[test]
    fn test_timestamp_beyond_an_hour() {
        assert_eq!(format_timestamp(3600.0), "60:00.00");
        assert_eq!(format_timestamp(6154.5), "102:34.50");
    }

    #[test]
    fn test_render_one_paragraph_per_segment() {
        let formatter = TranscriptFormatter::new();
        let segments = vec![
            segment(0.0, 2.5, " Welcome back."),
            segment(4.5, 125.3, " Let's continue."),
        ];

        let document = formatter.render(&segments);

        assert_eq!(
            document,
            "[00:00.00 - 00:02.50]  Welcome back.\n\n\
             [00:04.50 - 02:05.30]  Let's continue.\n\n"
        );
    }

    #[test]
    fn test_render_preserves_input_order() {
        let formatter = TranscriptFormatter::new();
        let segments = vec![segment(10.0, 12.0, "second"), segment(0.0, 2.0, "first")];

        let document = formatter.render(&segments);
        let second_pos = document.find("second").unwrap();
        let first_pos = document.find("first").unwrap();
        assert!(second_pos < first_pos);
    }

    #[test]
    fn test_render_empty_segments() {
        let formatter = TranscriptFormatter::new();
        assert_eq!(formatter.render(&[]), "");
    }

    #[test]
    fn test_render_does_not_trim_text() {
        let formatter = TranscriptFormatter::new();
        let document = formatter.render(&[segment(0.0, 1.0, "  spaced  ")]);
        assert_eq!(document, "[00:00.00 - 00:01.00]   spaced  \n\n");
    }
}
