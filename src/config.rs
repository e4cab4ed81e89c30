//! Analysis configuration shared by the parser and the aggregator.
//!
//! [`AnalysisConfig`] is built once, up front, and then only borrowed. It
//! carries every lookup table the pipeline needs: the alias table used to
//! canonicalize author names, the exclusion set used by the word-frequency
//! step, and the noise filters applied to header lines.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::new()
//!     .with_alias("Galletita Ginger", "Pablo")
//!     .with_top_words(5);
//!
//! assert_eq!(config.resolve_alias("Galletita Ginger"), "Pablo");
//! assert_eq!(config.resolve_alias("Ana"), "Ana");
//! ```
//!
//! # Loading external resources
//!
//! Alias tables are JSON objects mapping display names to canonical names.
//! Exclusion lists are plain text, one token per line. A missing file is not
//! an error: the loader logs a warning and falls back to an empty table.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ChatstatsError, Result};

/// Display name of the built-in assistant that posts into group chats.
pub const DEFAULT_ASSISTANT_IDENTITY: &str = "Meta AI";

/// Body text WhatsApp writes in place of an attachment.
pub const DEFAULT_MEDIA_PLACEHOLDER: &str = "<Multimedia omitido>";

/// Number of words kept per participant in the frequency ranking.
pub const DEFAULT_TOP_WORDS: usize = 10;

/// System event fragments (Spanish locale) that mark a header line as a
/// group notification rather than a message.
pub const DEFAULT_SYSTEM_TEMPLATES: &[&str] = &[
    "creó el grupo",
    "añadió a",
    "te añadió",
    "cambió el asunto del grupo",
    "salió del grupo",
    "fue eliminado",
    "cambió el icono del grupo",
    "cambió la foto del grupo",
];

/// Curated tokens that are noise in chat vocabulary rankings: laughter,
/// short replies, URL fragments and very common function words.
pub const DEFAULT_EXTRA_EXCLUSIONS: &[&str] = &[
    // placeholders and links
    "multimedia", "omitido", "https", "http", "www", "com",
    // laughter and abbreviations
    "q", "k", "xd", "jaja", "jajaja", "jajajaja", "jejeje",
    // short replies
    "si", "no", "gracias", "ok", "vale", "claro", "bueno", "hola", "adios",
    // articles and demonstratives
    "un", "una", "unos", "unas", "el", "la", "los", "las",
    "este", "esta", "estos", "estas", "ese", "esa", "esos", "esas",
    // adverbs and indefinites
    "así", "más", "menos", "muy", "poco", "mucho", "demasiado",
    "todo", "nada", "algo", "nadie", "alguien", "siempre", "nunca", "aún", "ya", "ahora",
    "bien", "mal", "mejor", "peor", "casi", "solo", "tampoco",
    // common verbs
    "ser", "estar", "hacer", "ir", "tener", "decir", "poder", "querer", "haber", "ver",
    "voy", "va", "puedo", "puede", "vamos", "creo",
    // prepositions and conjunctions
    "a", "ante", "bajo", "cabe", "con", "contra", "de", "desde", "durante", "en",
    "entre", "hacia", "hasta", "para", "por", "según", "sin", "so", "sobre", "tras",
    "que", "pues", "porque", "aunque", "aunq", "pero", "sino", "como", "cuando", "pa", "pos",
    // pronouns and interrogatives
    "mí", "ti", "él", "ella", "ello", "nosotros", "vosotros", "ellos", "ellas",
    "qué", "quién", "cómo", "cuándo", "dónde", "porqué", "cual",
    // greetings and time words
    "buenos", "días", "noches", "tardes", "tarde", "luego",
    "hoy", "mañana", "ayer", "semana", "mes", "año", "hora",
    // chat context
    "whatsapp", "grupo", "chat", "casa", "verdad",
];

/// Immutable configuration threaded through parser and aggregator.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Display name -> canonical identity. Unmapped names pass through.
    pub aliases: HashMap<String, String>,

    /// Lower-cased tokens ignored by the word-frequency ranking.
    pub exclusions: HashSet<String>,

    /// Author name of the automated assistant whose messages are dropped.
    pub assistant_identity: String,

    /// Body fragments identifying system events (joins, leaves, renames).
    pub system_templates: Vec<String>,

    /// Exact body of a media-only message.
    pub media_placeholder: String,

    /// How many words to keep per participant (default: 10).
    pub top_words: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            aliases: HashMap::new(),
            exclusions: DEFAULT_EXTRA_EXCLUSIONS
                .iter()
                .map(|w| (*w).to_string())
                .collect(),
            assistant_identity: DEFAULT_ASSISTANT_IDENTITY.to_string(),
            system_templates: DEFAULT_SYSTEM_TEMPLATES
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
            top_words: DEFAULT_TOP_WORDS,
        }
    }
}

impl AnalysisConfig {
    /// Creates a configuration with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from optional resource files.
    ///
    /// The stopword list is added on top of [`DEFAULT_EXTRA_EXCLUSIONS`].
    /// Missing files degrade to empty tables with a warning; files that
    /// exist but cannot be read or parsed are errors.
    pub fn from_files(aliases: Option<&Path>, stopwords: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = aliases {
            config.aliases = load_aliases(path)?;
        }
        if let Some(path) = stopwords {
            config.exclusions.extend(load_exclusions(path)?);
        }
        Ok(config)
    }

    /// Replaces the alias table.
    #[must_use]
    pub fn with_aliases(mut self, aliases: HashMap<String, String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Adds a single alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Replaces the exclusion set. Tokens are lower-cased.
    #[must_use]
    pub fn with_exclusions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions = words.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        self
    }

    /// Adds tokens to the exclusion set. Tokens are lower-cased.
    #[must_use]
    pub fn with_extra_exclusions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Sets the assistant identity whose messages are dropped.
    #[must_use]
    pub fn with_assistant_identity(mut self, name: impl Into<String>) -> Self {
        self.assistant_identity = name.into();
        self
    }

    /// Replaces the system event templates.
    #[must_use]
    pub fn with_system_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_templates = templates.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the media placeholder body.
    #[must_use]
    pub fn with_media_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.media_placeholder = placeholder.into();
        self
    }

    /// Sets how many words the frequency ranking keeps.
    #[must_use]
    pub fn with_top_words(mut self, k: usize) -> Self {
        self.top_words = k;
        self
    }

    /// Maps a display name to its canonical identity.
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Returns `true` if a lower-cased token must not be counted.
    pub fn is_excluded(&self, token: &str) -> bool {
        self.exclusions.contains(token)
    }
}

/// Loads an alias table from a JSON object file.
///
/// A missing file yields an empty table and a warning.
pub fn load_aliases(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        warn!(path = %path.display(), "alias table not found, names are used as-is");
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)?;
    let aliases: HashMap<String, String> = serde_json::from_str(&content)
        .map_err(|e| ChatstatsError::invalid_resource(path, e.to_string()))?;

    debug!(path = %path.display(), entries = aliases.len(), "loaded alias table");
    Ok(aliases)
}

/// Loads an exclusion list: one token per line, `#` starts a comment line.
///
/// A missing file yields an empty set and a warning.
pub fn load_exclusions(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        warn!(path = %path.display(), "exclusion list not found, no stopwords applied");
        return Ok(HashSet::new());
    }

    let content = fs::read_to_string(path)?;
    let words: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect();

    debug!(path = %path.display(), entries = words.len(), "loaded exclusion list");
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert!(config.aliases.is_empty());
        assert_eq!(config.assistant_identity, "Meta AI");
        assert_eq!(config.media_placeholder, "<Multimedia omitido>");
        assert_eq!(config.top_words, 10);
        assert_eq!(config.system_templates.len(), 8);
        assert!(config.is_excluded("jajaja"));
        assert!(!config.is_excluded("pizza"));
    }

    #[test]
    fn test_builder_chain() {
        let config = AnalysisConfig::new()
            .with_alias("Anaaa", "Ana")
            .with_exclusions(["Pizza"])
            .with_extra_exclusions(["PLAYA"])
            .with_assistant_identity("Bot")
            .with_media_placeholder("<Media omitted>")
            .with_top_words(3);

        assert_eq!(config.resolve_alias("Anaaa"), "Ana");
        assert!(config.is_excluded("pizza"));
        assert!(config.is_excluded("playa"));
        assert!(!config.is_excluded("jajaja"));
        assert_eq!(config.assistant_identity, "Bot");
        assert_eq!(config.top_words, 3);
    }

    #[test]
    fn test_alias_is_case_sensitive() {
        let config = AnalysisConfig::new().with_alias("Miri", "Miriam");
        assert_eq!(config.resolve_alias("miri"), "miri");
        assert_eq!(config.resolve_alias("Miri"), "Miriam");
    }

    #[test]
    fn test_load_aliases() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"Galletita Ginger": "Pablo", "Davidinchi": "David"}}"#).unwrap();

        let aliases = load_aliases(file.path()).unwrap();
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases["Davidinchi"], "David");
    }

    #[test]
    fn test_load_aliases_missing_file_is_empty() {
        let aliases = load_aliases(Path::new("/definitely/not/here.json")).unwrap();
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_load_aliases_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        let err = load_aliases(file.path()).unwrap_err();
        assert!(err.is_invalid_resource());
    }

    #[test]
    fn test_load_exclusions() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# spanish stopwords").unwrap();
        writeln!(file, "Y").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  del  ").unwrap();

        let words = load_exclusions(file.path()).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.contains("y"));
        assert!(words.contains("del"));
    }

    #[test]
    fn test_from_files_missing_resources_degrade() {
        let config = AnalysisConfig::from_files(
            Some(Path::new("/nope/aliases.json")),
            Some(Path::new("/nope/stopwords.txt")),
        )
        .unwrap();
        assert!(config.aliases.is_empty());
        assert!(config.is_excluded("jajaja"));
    }
}
