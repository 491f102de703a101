use orderscribe_config::Config;
use orderscribe_core::{DraftOrder, TracingObserver};
use orderscribe_transcription::{ServiceTranscript, TranscriptionResponse};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, info_span};
use uuid::Uuid;

/// Input parameters for the Scan command strategy.
#[derive(Debug, Clone)]
pub struct ScanInput {
    pub menu: PathBuf,
    /// Plain transcript text; no entities.
    pub transcript: Option<String>,
    /// Path to a transcription service response body.
    pub response: Option<PathBuf>,
    pub draft: bool,
}

/// Strategy for matching a single transcript.
///
/// Prints the response envelope as JSON, or the draft order built from it
/// when `draft` is set.
#[derive(Debug, Clone, Copy)]
pub struct ScanStrategy;

impl super::CommandStrategy for ScanStrategy {
    type Input = ScanInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let matcher = config
            .build_matcher()?
            .with_observer(Arc::new(TracingObserver));
        let menu = super::load_menu(&input.menu)?;

        let service = match (input.transcript, input.response) {
            (Some(text), _) => ServiceTranscript::from_text(text),
            (None, Some(path)) => {
                let body = std::fs::read_to_string(&path)?;
                ServiceTranscript::from_json(&body)?
            }
            (None, None) => anyhow::bail!("Either --transcript or --response is required"),
        };

        let scan_id = Uuid::now_v7();
        let span = info_span!("scan", %scan_id);
        let _guard = span.enter();

        let response = TranscriptionResponse::from_service(service, &menu.names(), &matcher);
        info!("Matched {} items", response.parsed_items.len());

        let output = if input.draft {
            let draft = DraftOrder::from_matches(&menu, response.parsed_items, &config.draft);
            serde_json::to_string_pretty(&serde_json::json!({
                "scanId": scan_id,
                "lines": draft.lines(),
                "confirmed": draft.confirmed_lines(),
                "total": draft.total_amount(),
            }))?
        } else {
            serde_json::to_string_pretty(&response)?
        };

        println!("{output}");
        Ok(())
    }
}
