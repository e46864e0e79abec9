//! Live log streaming
//!
//! Chunks are forwarded to the progress sink verbatim, in arrival order.
//! Stream-level errors become diagnostic lines on the same sink and do not
//! terminate the wait; only the end of the stream resolves it. The pace is
//! entirely the server's.

use futures::StreamExt;
use jenkins_goal_domain::{LogEvent, LogStream, Progress};
use tracing::{debug, warn};

/// Forward the stream to the sink until the end-of-stream signal.
pub async fn stream_to_completion(mut stream: LogStream, progress: &Progress) {
    let mut chunks = 0u64;
    while let Some(event) = stream.next().await {
        match event {
            LogEvent::Chunk(text) => {
                chunks += 1;
                progress.raw(&text);
            }
            LogEvent::Error(message) => {
                warn!(error = %message, "log stream error");
                progress.raw(&format!("Jenkins log stream error: {}", message));
            }
        }
    }
    debug!(chunks, "log stream ended");
}
