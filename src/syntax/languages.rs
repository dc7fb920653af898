//! Code block language identification
//!
//! Maps fenced-code info strings (case-insensitive aliases) to language IDs
//! and their tree-sitter grammars.

use tree_sitter::Language;

/// Languages the tokenizer can highlight inside fenced code blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LanguageId {
    Yaml,
    Rust,
    Html,
    Css,
    JavaScript,
    TypeScript,
    Tsx,
    Json,
    Toml,
    Python,
    Go,
    Php,
    C,
    Cpp,
    Java,
    Bash,
    Scheme,
    Ini,
    Xml,
}

/// Every registered language, in registry order
pub const ALL_LANGUAGES: &[LanguageId] = &[
    LanguageId::Yaml,
    LanguageId::Rust,
    LanguageId::Html,
    LanguageId::Css,
    LanguageId::JavaScript,
    LanguageId::TypeScript,
    LanguageId::Tsx,
    LanguageId::Json,
    LanguageId::Toml,
    LanguageId::Python,
    LanguageId::Go,
    LanguageId::Php,
    LanguageId::C,
    LanguageId::Cpp,
    LanguageId::Java,
    LanguageId::Bash,
    LanguageId::Scheme,
    LanguageId::Ini,
    LanguageId::Xml,
];

impl LanguageId {
    /// Resolve an info-string alias ("js", "Rust", "c++") to a language
    pub fn from_alias(alias: &str) -> Option<Self> {
        let lang = match alias.trim().to_lowercase().as_str() {
            "yaml" | "yml" => LanguageId::Yaml,
            "rust" | "rs" => LanguageId::Rust,
            "html" | "htm" | "xhtml" => LanguageId::Html,
            "css" => LanguageId::Css,
            "javascript" | "js" | "jsx" | "mjs" | "cjs" | "node" => LanguageId::JavaScript,
            "typescript" | "ts" | "mts" | "cts" => LanguageId::TypeScript,
            "tsx" => LanguageId::Tsx,
            "json" | "jsonc" => LanguageId::Json,
            "toml" => LanguageId::Toml,
            "python" | "py" | "python3" => LanguageId::Python,
            "go" | "golang" => LanguageId::Go,
            "php" => LanguageId::Php,
            "c" | "h" => LanguageId::C,
            "cpp" | "c++" | "cc" | "cxx" | "hpp" | "hh" => LanguageId::Cpp,
            "java" => LanguageId::Java,
            "bash" | "sh" | "shell" | "zsh" => LanguageId::Bash,
            "scheme" | "racket" | "rkt" | "scm" => LanguageId::Scheme,
            "ini" | "cfg" => LanguageId::Ini,
            "xml" | "svg" | "xsd" => LanguageId::Xml,
            _ => return None,
        };
        Some(lang)
    }

    /// Canonical lowercase name, as reported by `supported_languages`
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Yaml => "yaml",
            LanguageId::Rust => "rust",
            LanguageId::Html => "html",
            LanguageId::Css => "css",
            LanguageId::JavaScript => "javascript",
            LanguageId::TypeScript => "typescript",
            LanguageId::Tsx => "tsx",
            LanguageId::Json => "json",
            LanguageId::Toml => "toml",
            LanguageId::Python => "python",
            LanguageId::Go => "go",
            LanguageId::Php => "php",
            LanguageId::C => "c",
            LanguageId::Cpp => "cpp",
            LanguageId::Java => "java",
            LanguageId::Bash => "bash",
            LanguageId::Scheme => "scheme",
            LanguageId::Ini => "ini",
            LanguageId::Xml => "xml",
        }
    }

    /// The tree-sitter grammar for this language
    pub fn grammar(&self) -> Language {
        match self {
            LanguageId::Yaml => tree_sitter_yaml::language(),
            LanguageId::Rust => tree_sitter_rust::LANGUAGE.into(),
            LanguageId::Html => tree_sitter_html::LANGUAGE.into(),
            LanguageId::Css => tree_sitter_css::LANGUAGE.into(),
            LanguageId::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            LanguageId::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            LanguageId::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            LanguageId::Json => tree_sitter_json::LANGUAGE.into(),
            LanguageId::Toml => tree_sitter_toml_ng::LANGUAGE.into(),
            LanguageId::Python => tree_sitter_python::LANGUAGE.into(),
            LanguageId::Go => tree_sitter_go::LANGUAGE.into(),
            LanguageId::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            LanguageId::C => tree_sitter_c::LANGUAGE.into(),
            LanguageId::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            LanguageId::Java => tree_sitter_java::LANGUAGE.into(),
            LanguageId::Bash => tree_sitter_bash::LANGUAGE.into(),
            LanguageId::Scheme => tree_sitter_racket::LANGUAGE.into(),
            LanguageId::Ini => tree_sitter_ini::LANGUAGE.into(),
            LanguageId::Xml => tree_sitter_xml::LANGUAGE_XML.into(),
        }
    }
}
