//! Rules command - show the rule set applied per feature

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::Feature;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the rules command
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only show this feature (unknown tags show the default rules)
    pub feature: Option<String>,
}

/// Rules for one feature
#[derive(Debug, Serialize)]
pub struct FeatureRules {
    pub feature: Feature,
    pub rules: Vec<String>,
}

/// Execute the rules command
pub async fn execute(
    args: RulesArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let features: Vec<Feature> = match args.feature.as_deref() {
        Some(tag) => vec![Feature::from_tag(Some(tag))],
        None => Feature::ALL.to_vec(),
    };

    let output: Vec<FeatureRules> = features
        .into_iter()
        .map(|feature| FeatureRules {
            feature,
            rules: services.rules.rules_for(feature).rules().to_vec(),
        })
        .collect();

    match format {
        OutputFormat::Human => {
            for entry in &output {
                print_header(&format!(
                    "{} ({} rule(s))",
                    colors::feature(entry.feature.as_str()),
                    entry.rules.len()
                ));
                for rule in &entry.rules {
                    println!("{rule}");
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
