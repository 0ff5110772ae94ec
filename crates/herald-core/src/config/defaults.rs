//! Default configuration values

use super::types::Config;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "herald.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "herald.yaml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".herald.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ".herald.toml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Herald Configuration

[git]
remote = "origin"

[changelog]
file = "CHANGELOG.md"
visible_revert_types = ["feat", "fix", "perf", "build"]
skip_markers = ["[skip ci]", "[ci skip]", "[skip github]", "[github skip]"]

[changelog.custom_types]
build = "Build System"

[parser]
merge_pattern = '^Merge pull request #(\d+) from (.*)$'
merge_correspondence = ["id", "source"]
note_keywords = ["BREAKING CHANGE", "BREAKING CHANGES", "BREAKING"]

[spellcheck]
dictionary = "/usr/share/dict/words"
ignore_file = ".spellcheckignore"
max_typos = 5
max_suggestions = 5
"#;
