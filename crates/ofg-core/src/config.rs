use serde::Deserialize;

/// Compilation options, passed explicitly to `Pipeline::new`. There is
/// no process-wide default configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Emit an informational `<METHOD> <path>` field before each
    /// operation's inputs.
    pub notice_fields: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            notice_fields: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CompilerOptions::default();
        assert!(options.notice_fields);
    }

    #[test]
    fn test_parse_options_yaml() {
        let options: CompilerOptions =
            serde_yaml_ng::from_str("notice_fields: false\n").unwrap();
        assert!(!options.notice_fields);

        let options: CompilerOptions = serde_yaml_ng::from_str("{}").unwrap();
        assert!(options.notice_fields);
    }
}
