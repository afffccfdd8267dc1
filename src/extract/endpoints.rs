//! API endpoint extraction.
//!
//! Backend endpoints are outbound HTTP calls against a literal URL. Frontend
//! endpoints are `Identifier.method(` calls on services, repositories and
//! API clients.

use regex::Regex;
use std::collections::HashSet;

use crate::classify::{endpoint_category, EndpointCategory};
use crate::error::{Error, Result};
use crate::patterns::{infer_http_method, is_api_path, ContractPatterns};
use crate::types::SourceFile;

use super::{ApiEndpoint, ApiType, FRONTEND_METHOD, UNKNOWN_METHOD};

fn method_call_pattern(identifier: &str) -> Result<Regex> {
    let pattern = format!(r"{}\.(\w+)\(", regex::escape(identifier));
    Regex::new(&pattern).map_err(|source| Error::InvalidPattern { pattern, source })
}

/// Outbound HTTP calls in `file`, in pattern then source order.
pub fn extract_backend(file: &SourceFile, patterns: &ContractPatterns) -> Vec<ApiEndpoint> {
    let source_file = file.display_path();
    let mut found = Vec::new();

    for regex in &patterns.backend_calls {
        for caps in regex.captures_iter(&file.content) {
            let path = &caps[1];
            if !is_api_path(patterns, path) {
                continue;
            }
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let method = infer_http_method(file.line_containing(start))
                .unwrap_or_else(|| UNKNOWN_METHOD.to_string());

            found.push(ApiEndpoint {
                method,
                path: path.to_string(),
                description: String::new(),
                source_file: source_file.clone(),
                line_number: file.line_of(start),
                api_type: ApiType::Backend,
                category: EndpointCategory::Http,
            });
        }
    }

    found
}

/// Service, repository and API-client method calls in `file`.
pub fn extract_frontend(file: &SourceFile, patterns: &ContractPatterns) -> Result<Vec<ApiEndpoint>> {
    let source_file = file.display_path();
    let mut seen_identifiers = HashSet::new();
    let mut found = Vec::new();

    for regex in &patterns.service_identifiers {
        for caps in regex.captures_iter(&file.content) {
            let identifier = caps[1].to_string();
            if !seen_identifiers.insert(identifier.clone()) {
                continue;
            }

            let calls = method_call_pattern(&identifier)?;
            for call in calls.captures_iter(&file.content) {
                let start = call.get(0).map(|m| m.start()).unwrap_or(0);
                found.push(ApiEndpoint {
                    method: FRONTEND_METHOD.to_string(),
                    path: format!("{}.{}", identifier, &call[1]),
                    description: "frontend service method call".to_string(),
                    source_file: source_file.clone(),
                    line_number: file.line_of(start),
                    api_type: ApiType::Frontend,
                    category: endpoint_category(&identifier),
                });
            }
        }
    }

    Ok(found)
}

/// Backend then frontend endpoints of one file, before deduplication.
pub fn extract_endpoints(file: &SourceFile, patterns: &ContractPatterns) -> Result<Vec<ApiEndpoint>> {
    let mut endpoints = extract_backend(file, patterns);
    endpoints.extend(extract_frontend(file, patterns)?);
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::EndpointRegistry;
    use crate::patterns::PatternLibrary;

    fn registry(content: &str) -> EndpointRegistry {
        let lib = PatternLibrary::builtin().unwrap();
        let file = SourceFile::new("src/app/user.service.ts", content);
        let mut reg = EndpointRegistry::new();
        for e in extract_endpoints(&file, &lib.contracts).unwrap() {
            reg.add(e);
        }
        reg
    }

    #[test]
    fn test_fetch_and_get_merge() {
        let reg = registry("fetch(\"/api/users\");\nthis.http.get(\"/api/users\");\n");
        let backend: Vec<_> = reg.of_type(ApiType::Backend).collect();
        assert_eq!(backend.len(), 1);
        assert_eq!(backend[0].method, "GET");
        assert_eq!(backend[0].methods().filter(|m| *m == "GET").count(), 1);
    }

    #[test]
    fn test_non_api_literals_skipped() {
        let reg = registry("this.http.get('assets/config.json');\nfetch('https://api.example.com/v1/items');\n");
        let backend: Vec<_> = reg.of_type(ApiType::Backend).collect();
        assert_eq!(backend.len(), 1);
        assert_eq!(backend[0].path, "https://api.example.com/v1/items");
        assert_eq!(backend[0].method, UNKNOWN_METHOD);
        assert_eq!(backend[0].line_number, 2);
    }

    #[test]
    fn test_generic_call() {
        let reg = registry("return this.http.post<User>('/api/users', body);");
        let e = reg.of_type(ApiType::Backend).next().unwrap();
        assert_eq!(e.method, "POST");
        assert_eq!(e.path, "/api/users");
    }

    #[test]
    fn test_frontend_service_calls() {
        let content = "constructor(private userService: UserService, private OrderRepository: OrderRepository) {}\nload() {\n  this.userService.getAll();\n  this.userService.getAll();\n  OrderRepository.find(1);\n}\n";
        let reg = registry(content);
        let frontend: Vec<_> = reg.of_type(ApiType::Frontend).collect();
        let paths: Vec<_> = frontend.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["OrderRepository.find", "userService.getAll"]);
        assert!(frontend.iter().all(|e| e.method == FRONTEND_METHOD));
        assert_eq!(frontend[0].category, EndpointCategory::Repository);
        assert_eq!(frontend[1].category, EndpointCategory::Service);
        assert_eq!(frontend[1].line_number, 3);
    }
}
