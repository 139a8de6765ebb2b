//! Declarative YAML recipe rules
//!
//! Top-level keys are found with line-anchored regexes; the YAML itself is
//! never parsed.

use regex::Regex;

use crate::core::{Diagnostic, Document, Location};
use crate::validation::{Rule, RuleError};

const RECIPE_TYPE: &str = "type: specs.openrewrite.org/v1beta/recipe";

fn text(doc: &Document) -> Result<&str, RuleError> {
    doc.text().ok_or(RuleError::WrongContent { expected: "text" })
}

/// Required top-level keys of a recipe document
#[derive(Debug)]
pub struct RecipeFields {
    fields: Vec<(&'static str, Regex)>,
}

impl RecipeFields {
    pub fn new() -> Result<Self, regex::Error> {
        let fields = [
            ("name", r"(?m)^name:\s+[\w.]+"),
            ("displayName", r"(?m)^displayName:"),
            ("description", r"(?m)^description:"),
            ("recipeList", r"(?m)^recipeList:"),
        ]
        .into_iter()
        .map(|(field, pattern)| Ok((field, Regex::new(pattern)?)))
        .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { fields })
    }
}

impl Rule for RecipeFields {
    fn name(&self) -> &'static str {
        "yaml-recipe-fields"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let content = text(doc)?;
        let path = doc.display_path();
        let mut diagnostics = Vec::new();

        if !content.contains(RECIPE_TYPE) {
            diagnostics.push(Diagnostic::error(
                "MISSING_FIELD",
                Location::path(path.clone()),
                format!("YAML recipe must have '{}'", RECIPE_TYPE),
            ));
        }

        for (field, regex) in &self.fields {
            if !regex.is_match(content) {
                diagnostics.push(Diagnostic::error(
                    "MISSING_FIELD",
                    Location::path(path.clone()),
                    format!("YAML recipe must have '{}' field", field),
                ));
            }
        }

        Ok(diagnostics)
    }
}

/// Recipe names are fully qualified and not left as placeholders
#[derive(Debug)]
pub struct RecipeNaming {
    name: Regex,
    qualified: Regex,
}

impl RecipeNaming {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            name: Regex::new(r"(?m)^name:\s+([\w.]+)")?,
            qualified: Regex::new(r"^[\w.]+\.[\w.]+$")?,
        })
    }
}

impl Rule for RecipeNaming {
    fn name(&self) -> &'static str {
        "yaml-recipe-naming"
    }

    fn check(&self, doc: &Document) -> Result<Vec<Diagnostic>, RuleError> {
        let content = text(doc)?;
        let mut diagnostics = Vec::new();

        let Some(name) = self.name.captures(content).and_then(|c| c.get(1)) else {
            return Ok(diagnostics);
        };
        let line = content[..name.start()].matches('\n').count() + 1;
        let location = Location::line(doc.display_path(), line);
        let name = name.as_str();

        if !self.qualified.is_match(name) {
            diagnostics.push(Diagnostic::warning(
                "NAMING_CONVENTION",
                location.clone(),
                format!("Recipe name should be fully qualified: {}", name),
            ));
        }

        let lowered = name.to_lowercase();
        if lowered.contains("yourorg") || lowered.contains("example") {
            diagnostics.push(Diagnostic::warning(
                "PLACEHOLDER",
                location,
                format!("Update placeholder recipe name: {}", name),
            ));
        }

        Ok(diagnostics)
    }
}
