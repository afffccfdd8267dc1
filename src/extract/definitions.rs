//! Code definitions: interfaces with their verbatim text, raw HTTP call
//! sites, and React components with their props interface.

use regex::Regex;
use std::path::Path;

use crate::error::{Error, Result};
use crate::patterns::DefinitionPatterns;
use crate::types::SourceFile;

use super::{DefinedInterface, DefinedProperty, EndpointCall, ReactComponent};

/// True for `.ts` and `.tsx` files, the only ones scanned for interfaces.
pub fn is_typescript(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ts") | Some("tsx")
    )
}

/// `name: type` lines of an interface body, comments removed.
pub fn parse_body(body: &str, patterns: &DefinitionPatterns) -> Vec<DefinedProperty> {
    let without_line_comments = patterns.line_comment.replace_all(body, "");
    let cleaned = patterns
        .block_comment
        .replace_all(&without_line_comments, "");

    cleaned
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| patterns.line_property.captures(line))
        .map(|caps| DefinedProperty {
            name: caps[1].to_string(),
            ty: caps[2].trim().to_string(),
        })
        .collect()
}

pub fn extract_defined_interfaces(file: &SourceFile, patterns: &DefinitionPatterns) -> Vec<DefinedInterface> {
    let file_path = file.display_path();
    patterns
        .interface
        .captures_iter(&file.content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(DefinedInterface {
                name: caps[2].to_string(),
                file_path: file_path.clone(),
                line_number: file.line_of(whole.start()),
                definition: whole.as_str().to_string(),
                properties: parse_body(&caps[3], patterns),
            })
        })
        .collect()
}

/// HTTP verb calls then `fetch` calls, each call site kept.
pub fn extract_endpoint_calls(file: &SourceFile, patterns: &DefinitionPatterns) -> Vec<EndpointCall> {
    let file_path = file.display_path();
    let mut calls = Vec::new();

    for caps in patterns.http_call.captures_iter(&file.content) {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        calls.push(EndpointCall {
            method: caps[1].to_uppercase(),
            url: caps[2].to_string(),
            file_path: file_path.clone(),
            line_number: file.line_of(start),
        });
    }
    for caps in patterns.fetch.captures_iter(&file.content) {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        calls.push(EndpointCall {
            method: "GET".to_string(),
            url: caps[1].to_string(),
            file_path: file_path.clone(),
            line_number: file.line_of(start),
        });
    }
    calls
}

fn props_pattern(component: &str) -> Result<Regex> {
    let pattern = format!(r"interface\s+{}Props\s*\{{([^}}]*)\}}", regex::escape(component));
    Regex::new(&pattern).map_err(|source| Error::InvalidPattern { pattern, source })
}

/// Function and class components, in that order.
pub fn extract_react_components(file: &SourceFile, patterns: &DefinitionPatterns) -> Result<Vec<ReactComponent>> {
    let file_path = file.display_path();
    let mut components = Vec::new();

    for regex in [&patterns.function_component, &patterns.class_component] {
        for caps in regex.captures_iter(&file.content) {
            let name = &caps[1];
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let props = props_pattern(name)?
                .captures(&file.content)
                .map(|p| parse_body(&p[1], patterns))
                .unwrap_or_default();

            components.push(ReactComponent {
                name: name.to_string(),
                file_path: file_path.clone(),
                line_number: file.line_of(start),
                props,
            });
        }
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternLibrary;

    fn patterns() -> DefinitionPatterns {
        PatternLibrary::builtin().unwrap().definitions
    }

    #[test]
    fn test_interface_with_comments() {
        let content = "// models\nexport interface User {\n  id: number; // primary key\n  /* display */ name: string;\n  email?: string;\n}\n";
        let found = extract_defined_interfaces(&SourceFile::new("user.ts", content), &patterns());
        assert_eq!(found.len(), 1);
        let user = &found[0];
        assert_eq!(user.name, "User");
        assert_eq!(user.line_number, 2);
        assert!(user.definition.starts_with("export interface User {"));
        assert!(user.definition.ends_with('}'));
        let names: Vec<_> = user.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "email"]);
        assert_eq!(user.properties[0].ty, "number");
    }

    #[test]
    fn test_endpoint_calls_not_deduplicated() {
        let content = "api.get('/api/users');\nthis.http.POST(\"/api/users\", body);\nfetch(`/api/users`);\napi.get('/api/users');\n";
        let calls = extract_endpoint_calls(&SourceFile::new("api.ts", content), &patterns());
        let summary: Vec<_> = calls
            .iter()
            .map(|c| (c.method.as_str(), c.line_number))
            .collect();
        assert_eq!(summary, vec![("GET", 1), ("POST", 2), ("GET", 4), ("GET", 3)]);
        assert!(calls.iter().all(|c| c.url == "/api/users"));
    }

    #[test]
    fn test_react_components() {
        let content = r#"interface UserCardProps {
  user: User;
  onSelect: (id: number) => void;
}

export const UserCard: React.FC<UserCardProps> = ({ user }) => null;

class Legacy extends React.Component {
  render() { return null; }
}
"#;
        let found = extract_react_components(&SourceFile::new("card.tsx", content), &patterns()).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "UserCard");
        assert_eq!(found[0].line_number, 6);
        assert_eq!(found[0].props.len(), 2);
        assert_eq!(found[0].props[1].ty, "(id: number) => void");
        assert_eq!(found[1].name, "Legacy");
        assert!(found[1].props.is_empty());
    }

    #[test]
    fn test_is_typescript() {
        assert!(is_typescript(Path::new("a/b.ts")));
        assert!(is_typescript(Path::new("b.tsx")));
        assert!(!is_typescript(Path::new("b.js")));
    }
}
