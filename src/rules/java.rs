//! Java source rules
//!
//! Regex heuristics over recipe classes: required overrides, conventional
//! annotations, naming, and language features newer than the target release.
//! None of this parses Java; it only looks for telltale text.

use regex::Regex;

use crate::core::{Diagnostic, Document, Location, Severity};
use crate::parser;
use crate::validation::{Rule, RuleError};

/// Java release the tooling targets unless configured otherwise
pub const DEFAULT_JAVA_VERSION: u32 = 8;

fn text(doc: &Document) -> Result<&str, RuleError> {
    doc.text().ok_or(RuleError::WrongContent { expected: "text" })
}

/// 1-based line containing byte offset `offset`
fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

/// Recipe class shape: extends `Recipe`, overrides the required methods and
/// follows the usual conventions
#[derive(Debug)]
pub struct RecipeStructure {
    recipe_class: Regex,
    visitor_body: Regex,
    display_name: Regex,
    option: Regex,
}

const REQUIRED_METHODS: [&str; 3] = ["getDisplayName()", "getDescription()", "getVisitor()"];

impl RecipeStructure {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            recipe_class: Regex::new(r"class\s+\w+\s+extends\s+Recipe\b")?,
            visitor_body: Regex::new(
                r"(?s)public\s+TreeVisitor<\?.*?>\s+getVisitor\([^)]*\)\s*\{([^}]+)\}",
            )?,
            display_name: Regex::new(r#"getDisplayName\(\)\s*\{\s*return\s*"([^"]+)""#)?,
            option: Regex::new(r"@Option\([^)]+\)")?,
        })
    }
}

impl Rule for RecipeStructure {
    fn name(&self) -> &'static str {
        "recipe-structure"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let content = text(doc)?;
        let path = doc.display_path();
        let mut diagnostics = Vec::new();

        if !self.recipe_class.is_match(content) {
            diagnostics.push(Diagnostic::error(
                "RECIPE_CLASS",
                Location::path(path.clone()),
                "Recipe class must extend Recipe",
            ));
        }

        for annotation in ["@Value", "@EqualsAndHashCode"] {
            if !content.contains(annotation) {
                let hint = match annotation {
                    "@Value" => "Consider using @Value annotation for immutability",
                    _ => "Consider using @EqualsAndHashCode(callSuper = false)",
                };
                diagnostics.push(Diagnostic::warning(
                    "MISSING_ANNOTATION",
                    Location::path(path.clone()),
                    hint,
                ));
            }
        }

        for method in REQUIRED_METHODS {
            if !content.contains(method) {
                diagnostics.push(Diagnostic::error(
                    "MISSING_METHOD",
                    Location::path(path.clone()),
                    format!("Recipe must override {}", method),
                ));
            }
        }

        if let Some(body) = self.visitor_body.captures(content).and_then(|c| c.get(1)) {
            if !body.as_str().contains("new ") {
                diagnostics.push(Diagnostic::warning(
                    "VISITOR_INSTANCE",
                    Location::line(path.clone(), line_of(content, body.start())),
                    "getVisitor() should return a NEW instance (no caching)",
                ));
            }
        }

        if let Some(name) = self.display_name.captures(content).and_then(|c| c.get(1)) {
            if !name.as_str().ends_with(['.', '!', '?']) {
                diagnostics.push(Diagnostic::warning(
                    "DISPLAY_NAME",
                    Location::line(path.clone(), line_of(content, name.start())),
                    format!("Display name should end with a period: '{}'", name.as_str()),
                ));
            }
        }

        for option in self.option.find_iter(content) {
            if !option.as_str().contains("example") {
                diagnostics.push(Diagnostic::warning(
                    "OPTION_EXAMPLE",
                    Location::line(path.clone(), line_of(content, option.start())),
                    "@Option should include an example parameter",
                ));
            }
        }

        Ok(diagnostics)
    }
}

/// Package, class and file naming
#[derive(Debug)]
pub struct RecipeNaming {
    package: Regex,
    class_name: Regex,
    verb_noun: Regex,
    placeholder_packages: Vec<String>,
}

pub fn default_placeholder_packages() -> Vec<String> {
    vec!["com.yourorg".to_string(), "com.example".to_string()]
}

impl RecipeNaming {
    pub fn new(placeholder_packages: Vec<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            package: Regex::new(r"package\s+([\w.]+);")?,
            class_name: Regex::new(r"class\s+(\w+)\s+extends\s+Recipe\b")?,
            verb_noun: Regex::new(r"^[A-Z][a-z]+[A-Z]")?,
            placeholder_packages,
        })
    }
}

impl Rule for RecipeNaming {
    fn name(&self) -> &'static str {
        "recipe-naming"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let content = text(doc)?;
        let path = doc.display_path();
        let mut diagnostics = Vec::new();

        if let Some(package) = self.package.captures(content).and_then(|c| c.get(1)) {
            let name = package.as_str();
            if self.placeholder_packages.iter().any(|p| name.starts_with(p.as_str())) {
                diagnostics.push(Diagnostic::warning(
                    "PLACEHOLDER",
                    Location::line(path.clone(), line_of(content, package.start())),
                    format!("Update placeholder package name: {}", name),
                ));
            }
        }

        if let Some(class) = self.class_name.captures(content).and_then(|c| c.get(1)) {
            let class_name = class.as_str();
            let line = line_of(content, class.start());

            if !self.verb_noun.is_match(class_name) {
                diagnostics.push(Diagnostic::warning(
                    "NAMING_CONVENTION",
                    Location::line(path.clone(), line),
                    format!(
                        "Recipe class name should follow VerbNoun pattern: {}",
                        class_name
                    ),
                ));
            }

            let expected = format!("{}.java", class_name);
            let actual = doc.file_name().unwrap_or_default();
            if actual != expected {
                diagnostics.push(Diagnostic::error(
                    "FILE_NAME",
                    Location::line(path, line),
                    format!(
                        "File name {} does not match class name {}",
                        actual, expected
                    ),
                ));
            }
        }

        Ok(diagnostics)
    }
}

/// A language feature and the Java release that introduced it
#[derive(Debug, Clone, Copy)]
pub struct LanguageFeature {
    pub since: u32,
    pub pattern: &'static str,
    pub description: &'static str,
}

/// Features newer than Java 8 that show up in recipe code
pub const LANGUAGE_FEATURES: [LanguageFeature; 6] = [
    LanguageFeature {
        since: 10,
        pattern: r"\bvar\s+\w+\s*=",
        description: "local variable type inference (var)",
    },
    LanguageFeature {
        since: 14,
        pattern: r"\bswitch\s*\([^)]+\)\s*\{[^}]*->",
        description: "switch expressions with arrows",
    },
    LanguageFeature {
        since: 15,
        pattern: r#"""""#,
        description: "text blocks (triple quotes)",
    },
    LanguageFeature {
        since: 16,
        pattern: r"\binstanceof\s+\w+\s+\w+\s*[^;{]*(?:\{|;)",
        description: "pattern matching for instanceof",
    },
    LanguageFeature {
        since: 16,
        pattern: r"\brecord\s+\w+\s*\(",
        description: "record types",
    },
    LanguageFeature {
        since: 17,
        pattern: r"\bsealed\s+(?:class|interface)",
        description: "sealed classes",
    },
];

/// Flags syntax unavailable at the target Java release, line by line.
/// Comment lines are skipped.
#[derive(Debug)]
pub struct LanguageLevel {
    target: u32,
    severity: Severity,
    features: Vec<(LanguageFeature, Regex)>,
}

impl LanguageLevel {
    pub fn new(target: u32, severity: Severity) -> Result<Self, regex::Error> {
        let features = LANGUAGE_FEATURES
            .iter()
            .filter(|feature| feature.since > target)
            .map(|feature| Ok((*feature, Regex::new(feature.pattern)?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            target,
            severity,
            features,
        })
    }
}

impl Rule for LanguageLevel {
    fn name(&self) -> &'static str {
        "language-level"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let path = doc.display_path();
        let mut diagnostics = Vec::new();

        for (idx, line) in text(doc)?.lines().enumerate() {
            if parser::is_java_comment(line) {
                continue;
            }

            for (feature, regex) in &self.features {
                if regex.is_match(line) {
                    diagnostics.push(Diagnostic::with_severity(
                        self.severity,
                        "LANGUAGE_LEVEL",
                        Location::line(path.clone(), idx + 1),
                        format!(
                            "Java {}+ feature: {} is not available in Java {}: {}",
                            feature.since,
                            feature.description,
                            self.target,
                            line.trim()
                        ),
                    ));
                }
            }
        }

        Ok(diagnostics)
    }
}
