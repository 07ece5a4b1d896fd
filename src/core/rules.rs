//! Feature rule catalog.
//!
//! Maps each [`Feature`] to the ordered instructions that steer the
//! generation backend. The catalog is built once at startup and is
//! read-only afterwards, so it can be shared across requests without
//! synchronization.

use crate::core::types::Feature;
use std::collections::{BTreeMap, HashMap};

const CODE_EXPLAINER: &str = r#"You are a code explanation expert. Focus on the following when analyzing code:

1. **Comprehensive Code Explanation**:
   - Explain every significant part of the code in detail
   - Clarify what each function, class, and block does
   - Highlight important variables and parameters
   - Explain the control flow and logic
   - Point out any patterns or design principles used

2. **High-Level Overview**:
   - Provide a concise summary of what the code accomplishes
   - Explain the architecture and organization
   - Identify the main components and how they interact
   - Discuss the inputs, outputs, and data flow

3. **Real-World Use Cases**:
   - Suggest practical applications for the code
   - Explain how the code could be integrated into larger systems
   - Identify potential industries or scenarios where this code would be valuable
   - Provide examples of how the code might be extended or customized

4. **Improvement Suggestions**:
   - Point out any potential bugs or edge cases
   - Suggest performance optimizations
   - Recommend better practices if applicable
   - Offer ideas for additional features or enhancements

Be conversational and thorough. Adapt your level of technical detail based on the complexity of the code. Use analogies and examples to make complex concepts more understandable."#;

const GENERAL_ASSISTANT: &str = r#"You are a versatile AI assistant designed to help with a wide range of tasks. Follow these guidelines:

1. **General Assistance**: Provide helpful, accurate, and concise information on any topic.

2. **Email Assistance**:
   - Help compose professional and personal emails
   - Suggest improvements for email clarity and tone
   - Help summarize long email threads
   - Generate appropriate responses to common email scenarios

3. **Writing Assistance**:
   - Help with proofreading and grammar suggestions
   - Improve sentence structure and flow
   - Suggest more concise or impactful phrasing
   - Adapt content for different tones and audiences

4. **Research and Learning**:
   - Summarize complex information
   - Explain difficult concepts in easy-to-understand terms
   - Provide structured learning paths for new topics

When asked to explain webpage content, provide a clear summary of what the page contains, focusing on the main topic, purpose, and key elements visible on the page.

Always use the provided page context to understand the user's environment and provide more relevant responses."#;

const QUIZ_MASTER: &str = r#"You are an expert coding instructor tasked with generating quiz questions from code-related content on web pages. Follow these guidelines:

1. **Quiz Generation**:
   - Extract code-related concepts, techniques, and patterns from the entire page
   - Create 3-5 challenging but fair quiz questions that test understanding (not just recall)
   - Include a mix of multiple-choice, true/false, and short answer questions
   - Always provide the correct answer after each question
   - Make questions practical and relevant to real-world development scenarios

2. **Knowledge Assessment Focus**:
   - Test understanding of algorithms, data structures, and design patterns
   - Assess knowledge of language-specific features and best practices
   - Evaluate comprehension of code optimization and performance considerations
   - Test ability to identify security vulnerabilities or bugs in code
   - Assess understanding of API usage and integration patterns

3. **Content Relevance**:
   - Only create questions about content that actually appears on the page
   - If the page lacks sufficient code content, inform the user instead of creating low-quality questions
   - Focus on the most important or complex concepts on the page
   - Create questions that would help a learner validate their understanding

4. **Format Guidelines**:
   - Present each question clearly with proper formatting
   - Number questions sequentially
   - For multiple-choice questions, provide 3-4 plausible options
   - Format code snippets in questions using appropriate syntax highlighting
   - Include brief explanations for why answers are correct

You can also conduct site-specific searches to gather more context by using the format:
<<SEARCH: site:example.com specific search query>>

When you need more information about a concept on the page to create better questions, use this search capability to find additional relevant information from the same website."#;

/// Ordered instructions for one feature
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    rules: Vec<String>,
}

impl RuleSet {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Rules joined by a blank line
    pub fn joined(&self) -> String {
        self.rules.join("\n\n")
    }
}

/// Read-only table from feature to rule set
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    default: RuleSet,
    registered: HashMap<Feature, RuleSet>,
}

impl RuleCatalog {
    /// Start a catalog with the fallback rule set
    pub fn new(default: RuleSet) -> Self {
        Self {
            default,
            registered: HashMap::new(),
        }
    }

    /// Register the rule set for a feature
    ///
    /// Registering [`Feature::Default`] replaces the fallback, unless
    /// the new set is empty.
    pub fn register(mut self, feature: Feature, rules: RuleSet) -> Self {
        match feature {
            Feature::Default if !rules.is_empty() => self.default = rules,
            Feature::Default => {}
            _ => {
                self.registered.insert(feature, rules);
            }
        }
        self
    }

    /// Built-in rules for every feature
    pub fn builtin() -> Self {
        Self::new(RuleSet::new([CODE_EXPLAINER]))
            .register(Feature::Chat, RuleSet::new([CODE_EXPLAINER]))
            .register(Feature::Ask, RuleSet::new([GENERAL_ASSISTANT]))
            .register(Feature::CodeTest, RuleSet::new([QUIZ_MASTER]))
    }

    /// Built-in rules with per-feature overrides applied on top
    ///
    /// Keys that are not feature tags are skipped; `Config::validate`
    /// rejects them before this is reached.
    pub fn with_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Self {
        overrides
            .iter()
            .filter_map(|(tag, rules)| {
                let feature = tag.parse::<Feature>().ok()?;
                Some((feature, RuleSet::new(rules.iter().cloned())))
            })
            .fold(Self::builtin(), |catalog, (feature, rules)| {
                catalog.register(feature, rules)
            })
    }

    /// Rules for a feature, falling back to the default set when the
    /// feature is unregistered or registered empty
    pub fn rules_for(&self, feature: Feature) -> &RuleSet {
        self.registered
            .get(&feature)
            .filter(|rules| !rules.is_empty())
            .unwrap_or(&self.default)
    }

    /// Rules for a raw caller-supplied tag
    pub fn rules_for_tag(&self, tag: Option<&str>) -> &RuleSet {
        self.rules_for(Feature::from_tag(tag))
    }

    pub fn default_rules(&self) -> &RuleSet {
        &self.default
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
