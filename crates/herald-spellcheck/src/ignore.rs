//! Words the project already uses and that must never be reported

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use crate::words::split_out_words;

/// File extensions that commonly appear in commit messages
const TEXT_EXTENSIONS: &[&str] = &[
    "adoc", "asciidoc", "bash", "bat", "bib", "c", "cc", "cfg", "cjs", "clj", "cmake", "cmd",
    "conf", "cpp", "cs", "css", "csv", "cts", "cxx", "dart", "diff", "dockerfile", "editorconfig",
    "ejs", "el", "env", "erl", "ex", "exs", "fish", "go", "gradle", "graphql", "h", "haml", "hbs",
    "hpp", "hs", "htm", "html", "ini", "java", "jl", "js", "json", "jsonc", "jsx", "kt", "kts",
    "less", "lock", "log", "lua", "m", "makefile", "markdown", "md", "mdx", "mjs", "ml", "mts",
    "nix", "patch", "php", "pl", "pm", "properties", "proto", "ps", "py", "r", "rb", "rs", "rst",
    "sass", "scala", "scss", "sh", "sql", "svelte", "svg", "swift", "tex", "toml", "ts", "tsv",
    "tsx", "txt", "vue", "xml", "yaml", "yml", "zsh",
];

/// Fragments left over when contractions are split on the apostrophe
const CONTRACTIONS: &[&str] = &["ve", "re", "s", "ll", "t", "d", "o", "ol"];

/// cSpell keys read from editor settings
const CSPELL_KEYS: &[&str] = &["cSpell.words", "cSpell.userWords", "cSpell.ignoreWords"];

/// Where ignore words are gathered from
#[derive(Debug, Clone)]
pub struct IgnoreSources {
    /// Project root holding the ignore file and manifests
    pub project_dir: PathBuf,
    /// Home directory for the user-level ignore file and editor settings
    pub home_dir: Option<PathBuf>,
    /// Project ignore file, relative to `project_dir`
    pub ignore_file: PathBuf,
    /// Messages of earlier commits
    pub previous_messages: Vec<String>,
}

impl IgnoreSources {
    /// Sources rooted at `project_dir`, using the current user's home directory
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            home_dir: dirs::home_dir(),
            ignore_file: PathBuf::from(".spellcheckignore"),
            previous_messages: Vec::new(),
        }
    }

    /// Override the home directory
    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    /// Override the project ignore file
    pub fn with_ignore_file(mut self, ignore_file: impl Into<PathBuf>) -> Self {
        self.ignore_file = ignore_file.into();
        self
    }

    /// Set the messages of earlier commits
    pub fn with_previous_messages(mut self, messages: Vec<String>) -> Self {
        self.previous_messages = messages;
        self
    }
}

/// Normalised set of words to ignore
#[derive(Debug, Clone, Default)]
pub struct IgnoreWords {
    words: HashSet<String>,
}

impl IgnoreWords {
    /// Gather ignore words from every source
    ///
    /// Missing or unparsable files contribute nothing.
    #[instrument(skip_all, fields(project = %sources.project_dir.display()))]
    pub fn collect(sources: &IgnoreSources) -> Self {
        let project = &sources.project_dir;
        let mut raw: Vec<String> = Vec::new();

        raw.extend(read_lines(&project.join(&sources.ignore_file)));
        raw.extend(read_cspell_words(&project.join(".vscode/settings.json")));

        if let Some(home) = &sources.home_dir {
            raw.extend(read_lines(&home.join(".config/_spellcheckignore")));
            raw.extend(read_cspell_words(&home.join(".config/Code/User/settings.json")));
        }

        raw.extend(TEXT_EXTENSIONS.iter().map(|e| e.to_string()));
        raw.extend(CONTRACTIONS.iter().map(|c| c.to_string()));

        for name in manifest_names(project) {
            raw.extend(split_out_words(&name));
        }

        let history = sources.previous_messages.join("\n");
        let mut history_words = split_out_words(&history);
        history_words.pop();
        raw.extend(history_words);

        let words = Self::from_words(raw);
        debug!(word_count = words.len(), "collected ignore words");
        words
    }

    /// Build a set from raw words, trimming, lower-casing and splitting each
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .flat_map(|w| split_out_words(&w))
            .collect();
        Self { words }
    }

    /// Check if a lower-cased word is ignored
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) => {
            trace!(path = %path.display(), error = %e, "ignore file not read");
            Vec::new()
        }
    }
}

fn read_cspell_words(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let settings: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "editor settings not parsed");
            return Vec::new();
        }
    };

    CSPELL_KEYS
        .iter()
        .filter_map(|key| settings.get(key).and_then(|v| v.as_array()))
        .flatten()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Dependency names from `Cargo.toml` and `package.json`, plus npm script names
fn manifest_names(project: &Path) -> Vec<String> {
    let mut names = Vec::new();

    if let Ok(content) = std::fs::read_to_string(project.join("Cargo.toml")) {
        match content.parse::<toml::Table>() {
            Ok(manifest) => {
                for section in ["dependencies", "dev-dependencies"] {
                    if let Some(table) = manifest.get(section).and_then(|v| v.as_table()) {
                        names.extend(table.keys().cloned());
                    }
                }
            }
            Err(e) => debug!(error = %e, "Cargo.toml not parsed"),
        }
    }

    if let Ok(content) = std::fs::read_to_string(project.join("package.json")) {
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(package) => {
                for section in ["dependencies", "devDependencies", "scripts"] {
                    if let Some(object) = package.get(section).and_then(|v| v.as_object()) {
                        names.extend(object.keys().cloned());
                    }
                }
            }
            Err(e) => debug!(error = %e, "package.json not parsed"),
        }
    }

    names
}
