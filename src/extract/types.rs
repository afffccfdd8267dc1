//! Records produced by the extractors.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::classify::{Category, ElementKind, EndpointCategory, Importance};

/// Marker stored as the method of frontend endpoints.
pub const FRONTEND_METHOD: &str = "FRONTEND";
/// Method of a backend call whose verb could not be inferred.
pub const UNKNOWN_METHOD: &str = "unknown";

/// Named records in first-insertion order.
///
/// Inserting an existing name replaces the record but keeps its position.
/// Serializes as a JSON object in that order.
#[derive(Debug, Clone)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> OrderedMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        match self.index.get(&name).copied() {
            Some(i) => self.entries[i].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Whether an endpoint is an outbound HTTP call or an in-process service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    Backend,
    Frontend,
}

impl ApiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::Backend => "backend",
            ApiType::Frontend => "frontend",
        }
    }
}

/// An API call site.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ApiEndpoint {
    /// Comma-joined HTTP methods, `unknown`, or `FRONTEND`
    pub method: String,
    /// URL literal or `Identifier.method`
    pub path: String,
    #[serde(default)]
    pub description: String,
    pub source_file: String,
    pub line_number: usize,
    pub api_type: ApiType,
    pub category: EndpointCategory,
}

impl ApiEndpoint {
    /// Methods as individual tokens.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.method.split(',').map(str::trim).filter(|m| !m.is_empty())
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods().any(|m| m == method)
    }
}

/// Endpoints in first-seen order, unique per (path, api_type).
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<ApiEndpoint>,
    index: HashMap<(String, ApiType), usize>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an endpoint, merging into an existing record with the same identity.
    ///
    /// Backend records accumulate methods. A known method replaces `unknown`.
    /// Frontend records keep the first occurrence.
    pub fn add(&mut self, endpoint: ApiEndpoint) {
        let key = (endpoint.path.clone(), endpoint.api_type);
        let Some(i) = self.index.get(&key).copied() else {
            self.index.insert(key, self.endpoints.len());
            self.endpoints.push(endpoint);
            return;
        };

        if endpoint.api_type == ApiType::Frontend {
            return;
        }
        let existing = &mut self.endpoints[i];
        let method = endpoint.method.as_str();
        if method == UNKNOWN_METHOD || existing.has_method(method) {
            return;
        }
        // `unknown` is dropped, never joined: `fetch` then `get` gives `GET`, not `unknown,GET`.
        if existing.method == UNKNOWN_METHOD {
            existing.method = method.to_string();
        } else {
            existing.method = format!("{},{}", existing.method, method);
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApiEndpoint> {
        self.endpoints.iter()
    }

    pub fn of_type(&self, api_type: ApiType) -> impl Iterator<Item = &ApiEndpoint> {
        self.endpoints.iter().filter(move |e| e.api_type == api_type)
    }

    pub fn into_vec(self) -> Vec<ApiEndpoint> {
        self.endpoints
    }
}

/// One property of an interface or component.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub optional: bool,
    #[serde(default)]
    pub default_value: String,
}

/// A TypeScript interface or object type alias.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct InterfaceDefinition {
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
    pub extends: Vec<String>,
    pub source_file: String,
    pub line_number: usize,
}

/// Inputs and outputs of a decorated component class.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ComponentProps {
    pub component_name: String,
    pub inputs: Vec<PropertyDescriptor>,
    pub outputs: Vec<PropertyDescriptor>,
    pub source_file: String,
    pub line_number: usize,
}

/// Facts captured when an extraction ran.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub source_path: String,
    pub extraction_date: String,
    pub total_files: usize,
    pub total_endpoints: usize,
    pub total_interfaces: usize,
    pub total_components: usize,
}

/// Everything the contract extractor found.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ContractExtraction {
    pub api_endpoints: Vec<ApiEndpoint>,
    pub interfaces: OrderedMap<InterfaceDefinition>,
    pub component_props: OrderedMap<ComponentProps>,
    pub metadata: ExtractionMetadata,
}

impl ContractExtraction {
    pub fn endpoints_of(&self, api_type: ApiType) -> Vec<&ApiEndpoint> {
        self.api_endpoints
            .iter()
            .filter(|e| e.api_type == api_type)
            .collect()
    }
}

/// A UI element the user can interact with.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct InteractiveElement {
    pub element_type: ElementKind,
    pub element_name: String,
    /// `file:line`
    pub location: String,
    pub component_name: String,
    pub event_handlers: Vec<String>,
    pub data_flow: Vec<String>,
    pub user_action: String,
    pub system_response: String,
    pub importance: Importance,
    pub category: Category,
}

/// Discovery results grouped for review.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ElementAnalysis {
    pub analysis_timestamp: String,
    pub source_path: String,
    pub total_interactive_elements: usize,
    pub elements_by_category: BTreeMap<String, Vec<InteractiveElement>>,
    pub elements_by_importance: BTreeMap<String, Vec<InteractiveElement>>,
    pub components_analysis: BTreeMap<String, Vec<InteractiveElement>>,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Output of the `discover` command.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DiscoveryOutput {
    pub interactive_elements: Vec<InteractiveElement>,
    pub analysis_report: ElementAnalysis,
}

/// A `name: type` pair read from an interface body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct DefinedProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// An interface with its verbatim source text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct DefinedInterface {
    pub name: String,
    pub file_path: String,
    pub line_number: usize,
    pub definition: String,
    pub properties: Vec<DefinedProperty>,
}

/// A raw HTTP call site; never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct EndpointCall {
    pub method: String,
    pub url: String,
    pub file_path: String,
    pub line_number: usize,
}

/// A React component and the properties of its `<Name>Props` interface.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ReactComponent {
    pub name: String,
    pub file_path: String,
    pub line_number: usize,
    pub props: Vec<DefinedProperty>,
}

/// Everything the code-definition extractor found.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CodeDefinitions {
    pub interfaces: OrderedMap<DefinedInterface>,
    pub endpoints: Vec<EndpointCall>,
    pub components: OrderedMap<ReactComponent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(path: &str, method: &str) -> ApiEndpoint {
        ApiEndpoint {
            method: method.to_string(),
            path: path.to_string(),
            description: String::new(),
            source_file: "a.ts".to_string(),
            line_number: 1,
            api_type: ApiType::Backend,
            category: EndpointCategory::Http,
        }
    }

    #[test]
    fn test_ordered_map_keeps_first_position() {
        let mut map = OrderedMap::new();
        map.insert("User", 1);
        map.insert("Order", 2);
        map.insert("User", 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("User"), Some(&3));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["User", "Order"]);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"User":3,"Order":2}"#);
    }

    #[test]
    fn test_registry_merges_backend_methods() {
        let mut reg = EndpointRegistry::new();
        reg.add(backend("/api/users", "GET"));
        reg.add(backend("/api/users", "GET"));
        reg.add(backend("/api/users", "POST"));
        reg.add(backend("/api/users", UNKNOWN_METHOD));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.iter().next().unwrap().method, "GET,POST");
    }

    #[test]
    fn test_registry_known_method_replaces_unknown() {
        let mut reg = EndpointRegistry::new();
        reg.add(backend("/api/users", UNKNOWN_METHOD));
        reg.add(backend("/api/users", "DELETE"));
        assert_eq!(reg.iter().next().unwrap().method, "DELETE");
    }

    #[test]
    fn test_registry_method_tokens_not_substrings() {
        let mut reg = EndpointRegistry::new();
        reg.add(backend("/api/x", "OPTIONS"));
        reg.add(backend("/api/x", "PUT"));
        assert_eq!(reg.iter().next().unwrap().method, "OPTIONS,PUT");
    }

    #[test]
    fn test_registry_frontend_first_wins() {
        let mut reg = EndpointRegistry::new();
        let mut first = backend("UserService.load", FRONTEND_METHOD);
        first.api_type = ApiType::Frontend;
        first.line_number = 3;
        let mut second = first.clone();
        second.line_number = 9;
        reg.add(first);
        reg.add(second);
        // Same path, different type: separate identity.
        reg.add(backend("UserService.load", "GET"));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.of_type(ApiType::Frontend).next().unwrap().line_number, 3);
    }
}
