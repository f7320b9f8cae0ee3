// File: ./src/provider/placeholder.rs
//! Offline provider that only shows a prompt.
use crate::settings::Settings;

pub const DEFAULT_PROMPT: &str = "Choose a task provider in the plugin settings.";

pub fn prompt(settings: &Settings) -> String {
    settings.get_or("prompt", DEFAULT_PROMPT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_override() {
        assert_eq!(prompt(&Settings::new()), DEFAULT_PROMPT);
        let s: Settings = [("prompt", "Nothing to see")].into_iter().collect();
        assert_eq!(prompt(&s), "Nothing to see");
    }
}
