//! Progress narration and phase framing
//!
//! Every discrete phase announcement is framed between a `/--` line and a
//! `\--` line. Downstream phase detectors match on these markers together
//! with the literal phrases inside them ("Starting Jenkins job", "Jenkins
//! job '<name>' started", the completion announcement), so the framing is
//! part of the contract, not cosmetics. Raw build log output passes through
//! unframed.

use std::sync::Arc;

/// Opening marker of a framed phase block.
pub const PHASE_OPEN: &str = "/--";

/// Closing marker of a framed phase block.
pub const PHASE_CLOSE: &str = "\\--";

/// Destination for human-readable execution narration.
pub trait ProgressSink: Send + Sync {
    /// Accept one formatted line of text.
    fn line(&self, text: &str);
}

/// Handle the execution phases narrate through.
#[derive(Clone)]
pub struct Progress {
    sink: Arc<dyn ProgressSink>,
}

impl Progress {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Progress { sink }
    }

    /// Write one framed phase block. Multi-line text is framed as a single
    /// block with one marker pair.
    pub fn phase(&self, text: &str) {
        self.sink.line(PHASE_OPEN);
        for line in text.lines() {
            self.sink.line(line);
        }
        self.sink.line(PHASE_CLOSE);
    }

    /// Forward text verbatim, without framing. Used for build log chunks.
    pub fn raw(&self, text: &str) {
        self.sink.line(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::MemoryProgressSink;

    #[test]
    fn test_phase_is_framed() {
        let sink = Arc::new(MemoryProgressSink::new());
        let progress = Progress::new(sink.clone());

        progress.phase("Starting Jenkins job 'app'");

        assert_eq!(
            sink.lines(),
            vec![
                "/--".to_string(),
                "Starting Jenkins job 'app'".to_string(),
                "\\--".to_string(),
            ]
        );
    }

    #[test]
    fn test_multiline_phase_shares_one_marker_pair() {
        let sink = Arc::new(MemoryProgressSink::new());
        let progress = Progress::new(sink.clone());

        progress.phase("line one\nline two");

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], PHASE_OPEN);
        assert_eq!(lines[3], PHASE_CLOSE);
    }

    #[test]
    fn test_raw_is_unframed() {
        let sink = Arc::new(MemoryProgressSink::new());
        let progress = Progress::new(sink.clone());

        progress.raw("[Pipeline] { (Build)");

        assert_eq!(sink.lines(), vec!["[Pipeline] { (Build)".to_string()]);
    }
}
