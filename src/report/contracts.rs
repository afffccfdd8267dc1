//! Markdown reports for contract extraction.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::classify::EndpointCategory;
use crate::extract::{
    ApiEndpoint, ApiType, ComponentProps, ContractExtraction, ExtractionMetadata,
    InterfaceDefinition,
};
use crate::types::file_name;

lazy_static! {
    /// Scheme and host of an absolute URL.
    static ref URL_ORIGIN: Regex = Regex::new(r"^https?://[^/]+").unwrap();
}

/// Report flavours of the `extract` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportMode {
    Combined,
    DataModels,
    Apis,
    BackendApis,
    FrontendApis,
}

const BACKEND_METHOD_ORDER: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH"];

const CATEGORY_ORDER: &[(EndpointCategory, &str, &str)] = &[
    (EndpointCategory::Service, "Service methods", "service layer"),
    (EndpointCategory::Repository, "Repository methods", "repository layer"),
    (EndpointCategory::Unknown, "Unclassified methods", "unclassified"),
];

fn base_name(path: &str) -> String {
    file_name(std::path::Path::new(path))
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

/// Render the report for `mode`.
pub fn render(data: &ContractExtraction, mode: ReportMode) -> String {
    match mode {
        ReportMode::Combined => render_combined(data),
        ReportMode::DataModels => render_data_models(data),
        ReportMode::Apis => render_apis(data),
        ReportMode::BackendApis => render_backend_apis(data),
        ReportMode::FrontendApis => render_frontend_apis(data),
    }
}

fn render_header(out: &mut String, title: &str, meta: &ExtractionMetadata, counts: &[(&str, usize)]) {
    out.push_str(&format!("# {}\n\n", title));
    out.push_str(&format!("**Source path**: {}  \n", meta.source_path));
    out.push_str(&format!("**Extraction date**: {}  \n", meta.extraction_date));
    out.push_str(&format!("**Total files**: {}", meta.total_files));
    for (label, count) in counts {
        out.push_str(&format!("  \n**{}**: {}", label, count));
    }
    out.push_str("\n\n---\n\n");
}

fn render_endpoint_table(out: &mut String, endpoints: &[ApiEndpoint]) {
    out.push_str("| Method | Path | Source file | Line |\n");
    out.push_str("|--------|------|-------------|------|\n");
    for e in endpoints {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            e.method,
            e.path,
            base_name(&e.source_file),
            e.line_number
        ));
    }
}

fn render_interface(out: &mut String, interface: &InterfaceDefinition) {
    out.push_str(&format!("### {}\n\n", interface.name));
    out.push_str(&format!(
        "**Source file**: {}:{}\n\n",
        base_name(&interface.source_file),
        interface.line_number
    ));
    if !interface.extends.is_empty() {
        out.push_str(&format!("**Extends**: {}\n\n", interface.extends.join(", ")));
    }
    out.push_str("| Property | Type | Optional | Default |\n");
    out.push_str("|----------|------|----------|---------|\n");
    for p in &interface.properties {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            p.name,
            p.ty,
            yes_no(p.optional),
            or_dash(&p.default_value)
        ));
    }
    out.push('\n');
}

fn render_component(out: &mut String, component: &ComponentProps) {
    if component.inputs.is_empty() && component.outputs.is_empty() {
        return;
    }
    out.push_str(&format!("### {}\n\n", component.component_name));
    out.push_str(&format!(
        "**Source file**: {}:{}\n\n",
        base_name(&component.source_file),
        component.line_number
    ));

    if !component.inputs.is_empty() {
        out.push_str("#### Inputs\n\n");
        out.push_str("| Property | Type | Optional |\n");
        out.push_str("|----------|------|----------|\n");
        for p in &component.inputs {
            out.push_str(&format!("| {} | {} | {} |\n", p.name, p.ty, yes_no(p.optional)));
        }
        out.push('\n');
    }
    if !component.outputs.is_empty() {
        out.push_str("#### Outputs\n\n");
        out.push_str("| Property | Type |\n");
        out.push_str("|----------|------|\n");
        for p in &component.outputs {
            out.push_str(&format!("| {} | {} |\n", p.name, p.ty));
        }
        out.push('\n');
    }
}

fn render_checklist(out: &mut String, title: &str, items: &[(&str, &str)]) {
    out.push_str(&format!("### ✅ {}\n\n", title));
    for (name, text) in items {
        out.push_str(&format!("- [ ] **{}**: {}\n", name, text));
    }
}

pub fn render_combined(data: &ContractExtraction) -> String {
    let meta = &data.metadata;
    let mut out = String::new();
    render_header(
        &mut out,
        "API Contract Extraction Report",
        meta,
        &[
            ("API endpoints", meta.total_endpoints),
            ("Interfaces", meta.total_interfaces),
            ("Component props", meta.total_components),
        ],
    );

    out.push_str("## 1. API Endpoints (HTTP contracts)\n\n");
    render_endpoint_table(&mut out, &data.api_endpoints);

    out.push_str("\n---\n\n## 2. Data Models (TypeScript interface contracts)\n\n");
    for interface in data.interfaces.values() {
        render_interface(&mut out, interface);
    }

    out.push_str("---\n\n## 3. Component Props (Angular component contracts)\n\n");
    for component in data.component_props.values() {
        render_component(&mut out, component);
    }

    out.push_str("---\n\n## 4. Refactoring Compliance\n\n");
    render_checklist(
        &mut out,
        "Drop-in replacement requirements",
        &[
            ("API contract completeness", "every API endpoint is extracted and the new frontend calls the same endpoints"),
            ("Data model consistency", "every TypeScript interface is extracted and data structures match exactly"),
            ("Component prop compatibility", "Angular component props are extracted and implemented by the React components"),
            ("Source traceability", "every contract cites its source file location"),
            ("No custom definitions", "the new frontend defines no interfaces or data models of its own"),
            ("Full behaviour preservation", "functional behaviour is unchanged; only UI/UX may improve"),
        ],
    );

    out.push_str("\n### ⚠️ Reminders\n\n");
    out.push_str("1. **Direct replacement**: the new frontend uses the extracted API contracts directly, with no adapter layer\n");
    out.push_str("2. **Real data**: no fake data; every call goes to the real backend API\n");
    out.push_str("3. **Interface stability**: HTTP methods and URL paths stay identical\n");
    out.push_str("4. **Prop mapping**: Angular @Input/@Output map onto React component props\n");
    out
}

pub fn render_data_models(data: &ContractExtraction) -> String {
    let meta = &data.metadata;
    let mut out = String::new();
    render_header(
        &mut out,
        "Data Model Extraction Report",
        meta,
        &[
            ("Interfaces", meta.total_interfaces),
            ("Component props", meta.total_components),
        ],
    );

    out.push_str("## 1. TypeScript Interface Contracts\n\n### Overview\n\n");
    out.push_str("| Interface | Properties | Extends | Source file | Line |\n");
    out.push_str("|-----------|------------|---------|-------------|------|\n");
    for interface in data.interfaces.values() {
        let extends = interface.extends.join(", ");
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            interface.name,
            interface.properties.len(),
            or_dash(&extends),
            base_name(&interface.source_file),
            interface.line_number
        ));
    }

    out.push_str("\n---\n\n## 2. Interface Details\n\n");
    for interface in data.interfaces.values() {
        render_interface(&mut out, interface);
    }

    if !data.component_props.is_empty() {
        out.push_str("---\n\n## 3. Component Prop Contracts\n\n");
        for component in data.component_props.values() {
            render_component(&mut out, component);
        }
    }

    out.push_str("---\n\n## 4. Refactoring Compliance\n\n");
    render_checklist(
        &mut out,
        "Data model requirements",
        &[
            ("Interface completeness", "every TypeScript interface is extracted and the new data structures match"),
            ("Type consistency", "property types stay identical; no edits or custom definitions"),
            ("Component prop compatibility", "Angular component props are extracted and implemented by the React components"),
            ("Source traceability", "every interface cites its source file location"),
            ("No custom definitions", "the new frontend defines no interfaces or data models of its own"),
            ("Full data preservation", "data models are kept exactly; only UI/UX may improve"),
        ],
    );
    out
}

pub fn render_apis(data: &ContractExtraction) -> String {
    let meta = &data.metadata;
    let mut out = String::new();
    render_header(
        &mut out,
        "API Contract Report",
        meta,
        &[("API endpoints", meta.total_endpoints)],
    );

    out.push_str("## 1. HTTP Endpoint Contracts\n\n");
    render_endpoint_table(&mut out, &data.api_endpoints);

    out.push_str("\n---\n\n## 2. Endpoints by Method\n\n");
    let mut groups: Vec<(&str, Vec<&ApiEndpoint>)> = Vec::new();
    for e in &data.api_endpoints {
        match groups.iter_mut().find(|(m, _)| *m == e.method) {
            Some((_, list)) => list.push(e),
            None => groups.push((e.method.as_str(), vec![e])),
        }
    }
    for (method, endpoints) in groups {
        out.push_str(&format!("### {} endpoints\n\n", method.to_uppercase()));
        for e in endpoints {
            out.push_str(&format!(
                "- `{}` ({}:{})\n",
                e.path,
                base_name(&e.source_file),
                e.line_number
            ));
        }
        out.push('\n');
    }

    out.push_str("---\n\n## 3. API Refactoring Compliance\n\n");
    render_checklist(
        &mut out,
        "API contract requirements",
        &[
            ("API completeness", "every HTTP endpoint is extracted and the new frontend calls the same endpoints"),
            ("Method consistency", "HTTP methods stay identical"),
            ("Path stability", "URL paths stay stable so the replacement is transparent"),
            ("Source traceability", "every endpoint cites its source file location"),
            ("No adapter layer", "the new frontend calls the same APIs directly"),
            ("Full behaviour preservation", "API call behaviour is unchanged; only UI/UX may improve"),
        ],
    );
    out
}

fn render_stats_table(out: &mut String, meta: &ExtractionMetadata) {
    out.push_str("| Metric | Count |\n");
    out.push_str("|--------|-------|\n");
    out.push_str(&format!("| API endpoints | {} |\n", meta.total_endpoints));
    out.push_str(&format!("| Interfaces | {} |\n", meta.total_interfaces));
    out.push_str(&format!("| Component props | {} |\n", meta.total_components));
    out.push_str(&format!("| Source files | {} |\n", meta.total_files));
}

/// `/segment` of an API path, ignoring scheme and host. `None` for single-segment paths.
pub fn path_prefix(path: &str) -> Option<String> {
    let path = URL_ORIGIN.replace(path, "");
    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() > 2 {
        Some(format!("/{}", parts[1]))
    } else {
        None
    }
}

/// Counts in descending order, ties by first appearance.
fn counted<T: Clone + Eq + std::hash::Hash>(items: impl Iterator<Item = T>) -> Vec<(T, usize)> {
    let mut order: Vec<(T, usize)> = Vec::new();
    let mut index: HashMap<T, usize> = HashMap::new();
    for item in items {
        match index.get(&item).copied() {
            Some(i) => order[i].1 += 1,
            None => {
                index.insert(item.clone(), order.len());
                order.push((item, 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

pub fn render_backend_apis(data: &ContractExtraction) -> String {
    let backend = data.endpoints_of(ApiType::Backend);
    let mut out = String::new();

    out.push_str("# Backend REST API Contracts\n\n");
    out.push_str(&format!("**Extracted at**: {}  \n", data.metadata.extraction_date));
    out.push_str(&format!("**API endpoints**: {}\n\n", backend.len()));
    out.push_str("## 📊 Extraction Statistics\n\n");
    render_stats_table(&mut out, &data.metadata);
    out.push_str("\n## 🔗 Backend API Endpoints\n\nOutbound HTTP calls to the backend:\n");

    let mut sorted = backend.clone();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let section = |out: &mut String, title: &str, list: Vec<&&ApiEndpoint>| {
        if list.is_empty() {
            return;
        }
        out.push_str(&format!("\n### {}\n\n", title));
        for e in list {
            out.push_str(&format!("- **{}**\n", e.path));
            if !e.description.is_empty() {
                out.push_str(&format!("  - Description: {}\n", e.description));
            }
            out.push_str(&format!("  - Location: {}:{}\n\n", e.source_file, e.line_number));
        }
    };

    for method in BACKEND_METHOD_ORDER {
        let list: Vec<&&ApiEndpoint> = sorted.iter().filter(|e| e.has_method(method)).collect();
        section(&mut out, &format!("{} method", method), list);
    }
    let other: Vec<&&ApiEndpoint> = sorted
        .iter()
        .filter(|e| !BACKEND_METHOD_ORDER.iter().any(|m| e.has_method(m)))
        .collect();
    section(&mut out, "Other methods", other);

    let prefixes = counted(backend.iter().filter_map(|e| path_prefix(&e.path)));
    if !prefixes.is_empty() {
        out.push_str("### 📈 API Path Analysis\n\n#### Path prefixes\n");
        for (prefix, count) in prefixes {
            out.push_str(&format!("- **{}**: {} endpoints\n", prefix, count));
        }
    }
    out
}

pub fn render_frontend_apis(data: &ContractExtraction) -> String {
    let frontend = data.endpoints_of(ApiType::Frontend);
    let mut out = String::new();

    out.push_str("# Frontend TypeScript API Contracts\n\n");
    out.push_str(&format!("**Extracted at**: {}  \n", data.metadata.extraction_date));
    out.push_str(&format!("**API service methods**: {}\n\n", frontend.len()));
    out.push_str("## 📊 Extraction Statistics\n\n");
    render_stats_table(&mut out, &data.metadata);
    out.push_str("\n## 🔧 Frontend API Services\n\nService and repository methods called by the frontend:\n");

    let mut by_file: Vec<(String, Vec<&ApiEndpoint>)> = Vec::new();
    for e in &frontend {
        let name = base_name(&e.source_file);
        match by_file.iter_mut().find(|(f, _)| *f == name) {
            Some((_, list)) => list.push(e),
            None => by_file.push((name, vec![e])),
        }
    }

    for (file, endpoints) in &by_file {
        out.push_str(&format!("\n### {}\n\n", file));
        for (category, title, _) in CATEGORY_ORDER {
            let mut list: Vec<&&ApiEndpoint> = endpoints.iter().filter(|e| e.category == *category).collect();
            if list.is_empty() {
                continue;
            }
            list.sort_by(|a, b| a.path.cmp(&b.path));
            out.push_str(&format!("#### {}\n", title));
            for e in list {
                out.push_str(&format!("- **{}()**\n", e.path));
                if !e.description.is_empty() {
                    out.push_str(&format!("  - Description: {}\n", e.description));
                }
                out.push_str(&format!("  - Location: line {}\n\n", e.line_number));
            }
        }
    }

    let categories = counted(frontend.iter().map(|e| e.category));
    if !categories.is_empty() {
        out.push_str("### 📊 Service Types\n\n");
        for (category, count) in categories {
            let label = CATEGORY_ORDER
                .iter()
                .find(|(c, _, _)| *c == category)
                .map(|(_, _, label)| *label)
                .unwrap_or(category.as_str());
            out.push_str(&format!("- **{}**: {} methods\n", label, count));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{OrderedMap, PropertyDescriptor, FRONTEND_METHOD};

    fn endpoint(path: &str, method: &str, api_type: ApiType, category: EndpointCategory) -> ApiEndpoint {
        ApiEndpoint {
            method: method.to_string(),
            path: path.to_string(),
            description: String::new(),
            source_file: "src/app/user.service.ts".to_string(),
            line_number: 4,
            api_type,
            category,
        }
    }

    fn sample() -> ContractExtraction {
        let mut interfaces = OrderedMap::new();
        interfaces.insert(
            "User",
            InterfaceDefinition {
                name: "User".to_string(),
                properties: vec![PropertyDescriptor {
                    name: "id".to_string(),
                    ty: "number".to_string(),
                    optional: false,
                    default_value: String::new(),
                }],
                extends: vec!["Base".to_string()],
                source_file: "src/models/user.ts".to_string(),
                line_number: 2,
            },
        );
        ContractExtraction {
            api_endpoints: vec![
                endpoint("/api/users", "GET,POST", ApiType::Backend, EndpointCategory::Http),
                endpoint("https://api.example.com/v1/orders", "unknown", ApiType::Backend, EndpointCategory::Http),
                endpoint("/api/orders/1", "DELETE", ApiType::Backend, EndpointCategory::Http),
                endpoint("userService.load", FRONTEND_METHOD, ApiType::Frontend, EndpointCategory::Service),
                endpoint("OrderRepository.find", FRONTEND_METHOD, ApiType::Frontend, EndpointCategory::Repository),
            ],
            interfaces,
            component_props: OrderedMap::new(),
            metadata: ExtractionMetadata {
                source_path: "src".to_string(),
                extraction_date: "2024-01-01T00:00:00+00:00".to_string(),
                total_files: 3,
                total_endpoints: 5,
                total_interfaces: 1,
                total_components: 0,
            },
        }
    }

    #[test]
    fn test_combined_sections() {
        let report = render(&sample(), ReportMode::Combined);
        assert!(report.starts_with("# API Contract Extraction Report"));
        assert!(report.contains("| GET,POST | /api/users | user.service.ts | 4 |"));
        assert!(report.contains("**Extends**: Base"));
        assert!(report.contains("| id | number | no | - |"));
        assert_eq!(report.matches("- [ ] ").count(), 6);
    }

    #[test]
    fn test_data_models_overview() {
        let report = render(&sample(), ReportMode::DataModels);
        assert!(report.contains("| User | 1 | Base | user.ts | 2 |"));
        assert!(!report.contains("## 3. Component Prop Contracts"));
    }

    #[test]
    fn test_backend_grouping() {
        let report = render(&sample(), ReportMode::BackendApis);
        let get = report.find("### GET method").unwrap();
        let post = report.find("### POST method").unwrap();
        let delete = report.find("### DELETE method").unwrap();
        let other = report.find("### Other methods").unwrap();
        assert!(get < post && post < delete && delete < other);
        assert!(!report.contains("userService.load"));
        assert!(report.contains("- **/api**: 2 endpoints"));
        assert!(report.contains("- **/v1**: 1 endpoints"));
    }

    #[test]
    fn test_frontend_listing() {
        let report = render(&sample(), ReportMode::FrontendApis);
        assert!(report.contains("### user.service.ts"));
        assert!(report.contains("- **userService.load()**"));
        assert!(report.contains("- **OrderRepository.find()**"));
        assert!(report.contains("- **service layer**: 1 methods"));
        assert!(!report.contains("FRONTEND()"));
    }

    #[test]
    fn test_path_prefix() {
        assert_eq!(path_prefix("/api/users"), Some("/api".to_string()));
        assert_eq!(path_prefix("https://host/v2/items"), Some("/v2".to_string()));
        assert_eq!(path_prefix("/health"), None);
    }
}
