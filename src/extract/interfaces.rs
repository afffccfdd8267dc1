//! TypeScript interface and object-type extraction.
//!
//! The body match stops at the first `}`, so nested object types are cut
//! short. Properties after the nested closing brace are lost.

use regex::Regex;

use crate::patterns::ContractPatterns;
use crate::types::SourceFile;

use super::{InterfaceDefinition, PropertyDescriptor};

/// Parse `name?: type = default` entries from an interface body.
pub fn parse_properties(body: &str, property: &Regex) -> Vec<PropertyDescriptor> {
    property
        .captures_iter(body)
        .map(|caps| PropertyDescriptor {
            name: caps[1].to_string(),
            ty: caps[3].trim().to_string(),
            optional: caps.get(2).is_some(),
            default_value: caps
                .get(4)
                .map(|d| d.as_str().trim().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

/// Every interface or braced type alias in `file`, in source order.
pub fn extract_interfaces(file: &SourceFile, patterns: &ContractPatterns) -> Vec<InterfaceDefinition> {
    let source_file = file.display_path();

    patterns
        .interface
        .captures_iter(&file.content)
        .map(|caps| {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let extends = caps
                .get(2)
                .map(|e| {
                    e.as_str()
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            InterfaceDefinition {
                name: caps[1].to_string(),
                properties: parse_properties(&caps[3], &patterns.property),
                extends,
                source_file: source_file.clone(),
                line_number: file.line_of(start),
            }
        })
        .collect()
}
