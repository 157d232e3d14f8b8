//! Transcript rendering with clip-relative offsets shifted to video time.

use super::TranscriptSegment;

/// Printed when a clip transcribes to nothing.
pub const NO_SPEECH_MESSAGE: &str = "No speech detected in this segment.";

/// Render a clip-relative millisecond offset as `minutes:seconds.tenths`,
/// shifted by the clip's absolute start time in seconds.
pub fn format_clip_timestamp(offset_ms: u64, clip_start: f64) -> String {
    let total_seconds = offset_ms as f64 / 1000.0 + clip_start;
    let minutes = (total_seconds / 60.0).floor() as u64;
    let seconds = total_seconds % 60.0;
    format!("{}:{:04.1}", minutes, seconds)
}

/// Render recognized segments as one `[start → end] text` line each.
///
/// Segments with empty trimmed text are dropped; if nothing remains the
/// fixed no-speech message is returned instead.
pub fn render_transcript(segments: &[TranscriptSegment], clip_start: f64) -> String {
    let lines: Vec<String> = segments
        .iter()
        .filter(|segment| !segment.text.trim().is_empty())
        .map(|segment| {
            format!(
                "[{} → {}] {}",
                format_clip_timestamp(segment.start_ms, clip_start),
                format_clip_timestamp(segment.end_ms, clip_start),
                segment.text.trim()
            )
        })
        .collect();

    if lines.is_empty() {
        NO_SPEECH_MESSAGE.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start_ms: u64, end_ms: u64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start_ms,
            end_ms,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_timestamp_zero_offset() {
        assert_eq!(format_clip_timestamp(0, 0.0), "0:00.0");
        assert_eq!(format_clip_timestamp(5500, 0.0), "0:05.5");
    }

    #[test]
    fn test_timestamp_shifted_by_clip_start() {
        // 3.2s into a clip starting at 2:00
        assert_eq!(format_clip_timestamp(3200, 120.0), "2:03.2");
        // Crossing a minute boundary after the shift
        assert_eq!(format_clip_timestamp(45000, 30.0), "1:15.0");
    }

    #[test]
    fn test_timestamp_seconds_zero_padded() {
        assert_eq!(format_clip_timestamp(1000, 60.0), "1:01.0");
        assert_eq!(format_clip_timestamp(0, 3600.0), "60:00.0");
    }

    #[test]
    fn test_render_lines() {
        let segments = vec![
            segment(0, 1500, " First line. "),
            segment(1500, 4000, "Second line."),
        ];
        let rendered = render_transcript(&segments, 60.0);
        assert_eq!(
            rendered,
            "[1:00.0 → 1:01.5] First line.\n[1:01.5 → 1:04.0] Second line."
        );
    }

    #[test]
    fn test_render_skips_blank_segments() {
        let segments = vec![
            segment(0, 1000, "   "),
            segment(1000, 2000, "Spoken."),
            segment(2000, 3000, ""),
        ];
        let rendered = render_transcript(&segments, 0.0);
        assert_eq!(rendered, "[0:01.0 → 0:02.0] Spoken.");
    }

    #[test]
    fn test_render_empty_is_no_speech() {
        assert_eq!(render_transcript(&[], 10.0), NO_SPEECH_MESSAGE);

        let only_blank = vec![segment(0, 900, " \t ")];
        assert_eq!(render_transcript(&only_blank, 10.0), NO_SPEECH_MESSAGE);
    }
}
