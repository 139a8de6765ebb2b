//! Rule Registry
//!
//! One immutable [`RuleSet`] per document kind, built once from the
//! configuration and shared by every validation run.

use std::collections::HashMap;

use anyhow::{Context, Result};

use super::{compile, java, manifest, markdown, yaml};
use crate::compiler::JavaCompiler;
use crate::config::Config;
use crate::core::{DocumentKind, Severity};
use crate::validation::RuleSet;

/// Rule sets by document kind
#[derive(Debug)]
pub struct RuleRegistry {
    sets: HashMap<DocumentKind, RuleSet>,
}

impl RuleRegistry {
    /// Build every rule set from the merged configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let compiler = config.compile.then(|| {
            JavaCompiler::new(config.javac.clone(), config.compile_timeout)
        });

        let mut registry = Self {
            sets: HashMap::new(),
        };
        registry.add(manifest_rules());
        registry.add(markdown_rules(
            config.markdown.title_case_max_level,
            config.markdown.non_descriptive_link_texts.clone(),
        ));
        registry.add(java_recipe_rules(
            config.java_version,
            config.placeholder_packages.clone(),
            compiler,
        )?);
        registry.add(java_source_rules(config.java_version)?);
        registry.add(yaml_recipe_rules()?);
        Ok(registry)
    }

    /// Add or replace the rule set for its kind
    pub fn add(&mut self, rules: RuleSet) {
        self.sets.insert(rules.kind(), rules);
    }

    /// Rule set for a document kind
    pub fn get(&self, kind: DocumentKind) -> Option<&RuleSet> {
        self.sets.get(&kind)
    }
}

pub fn manifest_rules() -> RuleSet {
    RuleSet::new(DocumentKind::Manifest)
        .with_rule(manifest::Structure)
        .with_rule(manifest::PluginFields)
        .with_rule(manifest::UniqueNames)
        .with_rule(manifest::NamingConvention)
        .with_rule(manifest::SourcePath)
        .with_rule(manifest::ComponentPaths)
}

pub fn markdown_rules(title_case_max_level: usize, non_descriptive: Vec<String>) -> RuleSet {
    RuleSet::new(DocumentKind::Markdown)
        .with_rule(markdown::HeadingHierarchy)
        .with_rule(markdown::TitleCase {
            max_level: title_case_max_level,
        })
        .with_rule(markdown::CodeBlocks)
        .with_rule(markdown::Links { non_descriptive })
        .with_rule(markdown::DocumentStructure)
}

/// Recipe classes: structure, naming, newer-language warnings and an
/// optional compilation check
pub fn java_recipe_rules(
    java_version: u32,
    placeholder_packages: Vec<String>,
    compiler: Option<JavaCompiler>,
) -> Result<RuleSet> {
    let mut rules = RuleSet::new(DocumentKind::JavaRecipe)
        .with_rule(java::RecipeStructure::new().context("Invalid recipe structure pattern")?)
        .with_rule(
            java::RecipeNaming::new(placeholder_packages).context("Invalid naming pattern")?,
        )
        .with_rule(
            java::LanguageLevel::new(java_version, Severity::Warning)
                .context("Invalid language feature pattern")?,
        );

    if let Some(compiler) = compiler {
        rules = rules.with_rule(compile::Compile::new(compiler, java_version));
    }

    Ok(rules)
}

/// Plain sources checked for compatibility only; violations are errors
pub fn java_source_rules(java_version: u32) -> Result<RuleSet> {
    Ok(RuleSet::new(DocumentKind::JavaSource).with_rule(
        java::LanguageLevel::new(java_version, Severity::Error)
            .context("Invalid language feature pattern")?,
    ))
}

pub fn yaml_recipe_rules() -> Result<RuleSet> {
    Ok(RuleSet::new(DocumentKind::YamlRecipe)
        .with_rule(yaml::RecipeFields::new().context("Invalid YAML field pattern")?)
        .with_rule(yaml::RecipeNaming::new().context("Invalid YAML naming pattern")?))
}
