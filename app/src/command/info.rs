use orderscribe_config::Config;
use orderscribe_core::ModifierRule;

/// Strategy for displaying configuration information.
///
/// Shows where the config lives and the settings in effect, falling back to
/// built-in defaults when there is no config file.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== orderscribe Configuration ===\n");

        println!("File: {}", path.display());
        println!("  Present: {}", path.exists());
        println!();

        println!("Matcher:");
        println!("  Window Radius: {}", config.matcher.window_radius);
        println!("  Entity Max Distance: {}", config.matcher.entity_max_distance);
        println!(
            "  Whole Word Confidence: {}",
            config.matcher.whole_word_confidence
        );
        println!(
            "  Substring Confidence: {}",
            config.matcher.substring_confidence
        );
        println!();

        println!("Modifiers:");
        match &config.modifiers.rules {
            Some(rules) => {
                println!("  Rules: {} (custom)", rules.len());
                println!("  Ids: {}", rule_ids(rules));
            }
            None => println!("  Rules: built-in"),
        }
        // Surfaces pattern errors here rather than on the first scan.
        if let Err(e) = config.build_matcher() {
            println!("  Error: {e}");
        }
        println!();

        println!("Draft:");
        println!(
            "  Auto Confirm Threshold: {}",
            config.draft.auto_confirm_threshold
        );
        println!();

        println!("Transcription:");
        println!("  Max Keyterms: {}", config.transcription.max_keyterms);

        Ok(())
    }
}

fn rule_ids(rules: &[ModifierRule]) -> String {
    if rules.is_empty() {
        return "(none)".to_string();
    }
    rules
        .iter()
        .map(|rule| rule.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
