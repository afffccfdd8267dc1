//! Markdown for extracted code definitions.

use crate::extract::{CodeDefinitions, EndpointCall};

pub fn render_definitions(defs: &CodeDefinitions) -> String {
    let mut out = String::from("# Code Extraction Results\n\n");

    out.push_str("## Extracted Interfaces (MANDATORY - DO NOT MODIFY)\n\n");
    out.push_str("> Warning: these interface definitions are extracted from source; any manual edit fails validation\n\n");
    for interface in defs.interfaces.values() {
        out.push_str(&format!(
            "### {} (Source: {}:{})\n",
            interface.name, interface.file_path, interface.line_number
        ));
        out.push_str("```typescript\n");
        out.push_str(&interface.definition);
        out.push_str("\n```\n\n");

        if !interface.properties.is_empty() {
            out.push_str("**Properties:**\n");
            for p in &interface.properties {
                out.push_str(&format!("- `{}`: {}\n", p.name, p.ty));
            }
            out.push('\n');
        }
    }

    out.push_str("## Extracted API Endpoints (MANDATORY - DO NOT MODIFY)\n\n");
    out.push_str("> Warning: these API endpoints are extracted from source; any manual edit fails validation\n\n");
    let mut by_url: Vec<(&str, Vec<&EndpointCall>)> = Vec::new();
    for call in &defs.endpoints {
        match by_url.iter_mut().find(|(url, _)| *url == call.url) {
            Some((_, calls)) => calls.push(call),
            None => by_url.push((call.url.as_str(), vec![call])),
        }
    }
    for (url, calls) in by_url {
        out.push_str(&format!("### {}\n", url));
        for call in calls {
            out.push_str(&format!(
                "- **{}** (Source: {}:{})\n",
                call.method, call.file_path, call.line_number
            ));
        }
        out.push('\n');
    }

    if !defs.components.is_empty() {
        out.push_str("## Extracted Components\n\n");
        for component in defs.components.values() {
            out.push_str(&format!(
                "### {} (Source: {}:{})\n",
                component.name, component.file_path, component.line_number
            ));
            if !component.props.is_empty() {
                out.push_str("**Props:**\n");
                for p in &component.props {
                    out.push_str(&format!("- `{}`: {}\n", p.name, p.ty));
                }
            }
            out.push('\n');
        }
    }
    out
}
