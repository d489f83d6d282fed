//! Mode presets: a closed set of named system instructions.

use evo_common::ConfigError;

/// Closed table of mode name -> instruction text.
const MODES: &[(&str, &str)] = &[
    (
        "chat",
        "You are a helpful assistant. Keep replies short, clear, and friendly.",
    ),
    (
        "tutor",
        "You are a Python tutor. Explain simply and give small examples.",
    ),
    (
        "helpdesk",
        "You are an IT helpdesk assistant. Ask 1 question if needed, then give step-by-step fixes.",
    ),
    (
        "study",
        "You are a study coach. Summarize clearly and ask one quick follow-up question.",
    ),
];

/// Instruction text for a mode. Unknown names are a validation error, not
/// a crash; lookup is case-insensitive.
pub fn mode_instruction(name: &str) -> Result<&'static str, ConfigError> {
    let name = name.trim().to_lowercase();
    MODES
        .iter()
        .find(|(mode, _)| *mode == name)
        .map(|(_, instruction)| *instruction)
        .ok_or_else(|| ConfigError::ValidationError(format!("unknown mode '{name}'")))
}

/// All mode names, in table order.
pub fn mode_names() -> Vec<&'static str> {
    MODES.iter().map(|(mode, _)| *mode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_resolves() {
        for name in mode_names() {
            assert!(mode_instruction(name).is_ok());
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(
            mode_instruction(" Tutor ").unwrap(),
            mode_instruction("tutor").unwrap()
        );
    }

    #[test]
    fn unknown_mode_is_a_validation_error() {
        let err = mode_instruction("poet").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("poet"));
    }

    #[test]
    fn mode_names_lists_the_closed_set() {
        assert_eq!(mode_names(), vec!["chat", "tutor", "helpdesk", "study"]);
    }
}
