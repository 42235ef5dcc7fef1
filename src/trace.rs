//! Recorded touch traces
//!
//! A trace is a JSON array of batches:
//!
//! ```json
//! [
//!   {"phase": "start", "time": 0, "samples": [{"id": 1, "x": 10, "y": 10}]},
//!   {"phase": "end", "time": 50, "samples": [{"id": 1, "x": 10, "y": 10}]}
//! ]
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{GestureError, Result};
use crate::input::TouchBatch;

/// Parses a trace from JSON text
pub fn parse_trace(text: &str) -> Result<Vec<TouchBatch>> {
    let batches: Vec<TouchBatch> = serde_json::from_str(text)?;
    if let Some(pair) = batches.windows(2).find(|pair| pair[1].time < pair[0].time) {
        warn!(
            at = pair[1].time,
            previous = pair[0].time,
            "trace timestamps go backwards"
        );
    }
    Ok(batches)
}

/// Reads and parses a trace file
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TouchBatch>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GestureError::TraceIo {
        path: path.to_path_buf(),
        source,
    })?;
    let batches = parse_trace(&text)?;
    debug!(path = %path.display(), batches = batches.len(), "trace loaded");
    Ok(batches)
}

/// Serializes batches back into trace JSON
pub fn to_trace_json(batches: &[TouchBatch]) -> Result<String> {
    Ok(serde_json::to_string_pretty(batches)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{TargetId, TouchPhase};

    #[test]
    fn test_parse_trace() {
        let text = r#"[
            {"phase": "start", "time": 0, "samples": [{"id": 1, "x": 10, "y": 12.5, "target": 4}]},
            {"phase": "cancel", "time": 30}
        ]"#;
        let batches = parse_trace(text).unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].phase, TouchPhase::Start);
        assert_eq!(batches[0].samples[0].target, Some(TargetId(4)));
        assert!((batches[0].samples[0].y - 12.5).abs() < 0.001);
        assert!(batches[1].is_empty());
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let result = parse_trace(r#"[{"phase": "hover", "time": 0, "samples": []}]"#);
        assert!(matches!(result, Err(GestureError::TraceFormat(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_trace("no/such/trace.json").unwrap_err();
        assert!(matches!(err, GestureError::TraceIo { .. }));
        assert!(err.to_string().contains("no/such/trace.json"));
    }

    #[test]
    fn test_load_trace_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"[{"phase": "start", "time": 5, "samples": [{"id": 1, "x": 3, "y": 4}]}]"#,
        )
        .unwrap();

        let batches = load_trace(file.path()).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].time, 5);
    }

    #[test]
    fn test_written_trace_parses_back() {
        let text = r#"[{"phase": "move", "time": 16, "samples": [{"id": 2, "x": 1, "y": 2}]}]"#;
        let batches = parse_trace(text).unwrap();
        let again = parse_trace(&to_trace_json(&batches).unwrap()).unwrap();
        assert_eq!(batches, again);
    }
}
