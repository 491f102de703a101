use orderscribe_config::Config;
use orderscribe_transcription::limit_keyterms;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct KeytermsInput {
    pub menu: PathBuf,
}

/// Strategy for printing the keyterms a transcription request would carry.
#[derive(Debug, Clone, Copy)]
pub struct KeytermsStrategy;

impl super::CommandStrategy for KeytermsStrategy {
    type Input = KeytermsInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let menu = super::load_menu(&input.menu)?;

        for term in limit_keyterms(&menu.names(), config.transcription.max_keyterms) {
            println!("{term}");
        }
        Ok(())
    }
}
