use orderscribe_config::Config;
use orderscribe_transcription::{ServiceTranscript, TranscriptionResponse};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct BatchInput {
    pub menu: PathBuf,
    /// JSONL file, one service response body per line.
    pub input: PathBuf,
}

/// Strategy for matching many service payloads at once.
///
/// Lines are matched in parallel and printed in input order, one JSON
/// envelope per line. Blank lines are skipped.
#[derive(Debug, Clone, Copy)]
pub struct BatchStrategy;

impl super::CommandStrategy for BatchStrategy {
    type Input = BatchInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let matcher = config.build_matcher()?;
        let menu = super::load_menu(&input.menu)?;
        let candidates = menu.names();

        let content = std::fs::read_to_string(&input.input)?;
        let lines: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();

        info!("Scanning {} transcripts from {}", lines.len(), input.input.display());

        let responses: Vec<TranscriptionResponse> = lines
            .par_iter()
            .map(|&(line_no, line)| {
                let scan_id = Uuid::now_v7();
                let _guard = info_span!("scan", %scan_id, line = line_no + 1).entered();

                match ServiceTranscript::from_json(line) {
                    Ok(service) => {
                        TranscriptionResponse::from_service(service, &candidates, &matcher)
                    }
                    Err(e) => {
                        warn!("Skipping line {}: {e}", line_no + 1);
                        TranscriptionResponse::failure(e.to_string())
                    }
                }
            })
            .collect();

        let failed = responses.iter().filter(|r| !r.success).count();
        for response in &responses {
            println!("{}", serde_json::to_string(response)?);
        }

        info!("Batch finished: {} ok, {failed} failed", responses.len() - failed);
        Ok(())
    }
}
