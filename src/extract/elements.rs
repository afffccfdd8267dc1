//! Interactive element discovery.
//!
//! A component file contributes two kinds of elements: template elements
//! (buttons, links, menus, media, form inputs) found line by line in its
//! template, and code elements (event handlers, service calls, navigation)
//! found line by line in the file itself. Each detector is independent, so
//! one line can yield several elements.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::classify::{
    category, code_importance, code_system_response, code_user_action, template_importance,
    template_system_response, template_user_action, Category, ElementKind, Importance,
};
use crate::patterns::ElementPatterns;
use crate::types::SourceFile;
use crate::walker::read_source;

use super::{ElementAnalysis, InteractiveElement};

/// Template text and where its first line sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub text: String,
    /// File the template lines are reported against
    pub path: String,
    /// Line number of the template's first line in `path`
    pub first_line: usize,
    /// True when the template came from a `templateUrl` file
    pub external: bool,
}

/// Selector, else `*Component` class name, else the file stem.
pub fn component_name(file: &SourceFile, patterns: &ElementPatterns) -> String {
    if let Some(caps) = patterns.selector.captures(&file.content) {
        return caps[1].to_string();
    }
    if let Some(caps) = patterns.component_class.captures(&file.content) {
        return caps[1].to_string();
    }

    let name = file.file_name();
    for suffix in [".component.ts", ".component.js"] {
        if let Some(stem) = name.strip_suffix(suffix) {
            return stem.to_string();
        }
    }
    file.path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or(name)
}

fn template_candidates(file: &SourceFile, root: &Path, url: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = file.path.parent() {
        candidates.push(dir.join(url));
    }
    candidates.push(root.join(url));
    candidates
}

/// The component's template: the `templateUrl` file when it resolves, else
/// an inline `template:` literal.
pub fn resolve_template(file: &SourceFile, root: &Path, patterns: &ElementPatterns) -> Option<Template> {
    if let Some(caps) = patterns.template_url.captures(&file.content) {
        let url = &caps[1];
        let found = template_candidates(file, root, url)
            .into_iter()
            .find(|p| p.is_file());
        match found.map(|p| read_source(&p)) {
            Some(Ok(template)) => {
                return Some(Template {
                    path: template.display_path(),
                    text: template.content,
                    first_line: 1,
                    external: true,
                })
            }
            Some(Err(e)) => tracing::warn!("template of {}: {}", file.display_path(), e),
            None => tracing::debug!(
                file = %file.path.display(),
                template = url,
                "templateUrl does not resolve"
            ),
        }
    }

    let caps = patterns.inline_template.captures(&file.content)?;
    let body = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
    Some(Template {
        text: body.as_str().to_string(),
        path: file.display_path(),
        first_line: file.line_of(body.start()),
        external: false,
    })
}

fn template_element(
    kind: ElementKind,
    line: &str,
    path: &str,
    line_number: usize,
    component: &str,
    patterns: &ElementPatterns,
) -> InteractiveElement {
    let element_name = patterns
        .element_name
        .captures(line)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| format!("{}_{}", kind, line_number));

    InteractiveElement {
        element_type: kind,
        element_name,
        location: format!("{}:{}", path, line_number),
        component_name: component.to_string(),
        event_handlers: Vec::new(),
        data_flow: Vec::new(),
        user_action: template_user_action(kind, line),
        system_response: template_system_response(kind).to_string(),
        importance: template_importance(line),
        category: category(kind),
    }
}

fn code_element(
    kind: ElementKind,
    line: &str,
    path: &str,
    line_number: usize,
    component: &str,
    patterns: &ElementPatterns,
) -> InteractiveElement {
    let element_name = patterns
        .call_name
        .captures(line)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| format!("{}_{}", kind, line_number));

    InteractiveElement {
        element_type: kind,
        element_name,
        location: format!("{}:{}", path, line_number),
        component_name: component.to_string(),
        event_handlers: Vec::new(),
        data_flow: Vec::new(),
        user_action: code_user_action(line).to_string(),
        system_response: code_system_response(line).to_string(),
        importance: code_importance(kind),
        category: category(kind),
    }
}

/// Template elements, one per matching detector per line.
pub fn scan_template(template: &Template, component: &str, patterns: &ElementPatterns) -> Vec<InteractiveElement> {
    let detectors = [
        (ElementKind::Button, &patterns.buttons),
        (ElementKind::NavigationLink, &patterns.navigation_links),
        (ElementKind::MenuItem, &patterns.menus),
        (ElementKind::MediaControl, &patterns.media),
        (ElementKind::FormInput, &patterns.form_inputs),
    ];

    let mut elements = Vec::new();
    for (i, line) in template.text.lines().enumerate() {
        let line_number = template.first_line + i;
        for (kind, regex) in &detectors {
            if regex.is_match(line) {
                elements.push(template_element(*kind, line, &template.path, line_number, component, patterns));
            }
        }
    }
    elements
}

/// Code elements, one per matching detector per line.
pub fn scan_code(file: &SourceFile, component: &str, patterns: &ElementPatterns) -> Vec<InteractiveElement> {
    let detectors = [
        (ElementKind::EventHandler, &patterns.event_handler_line),
        (ElementKind::ServiceCall, &patterns.service_call_line),
        (ElementKind::Navigation, &patterns.navigation_line),
    ];
    let path = file.display_path();

    let mut elements = Vec::new();
    for (i, line) in file.content.lines().enumerate() {
        for (kind, regex) in &detectors {
            if regex.is_match(line) {
                elements.push(code_element(*kind, line, &path, i + 1, component, patterns));
            }
        }
    }
    elements
}

fn first_group(caps: &regex::Captures<'_>) -> Option<String> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str().to_string())
}

fn collect_groups(regexes: &[regex::Regex], texts: &[&str]) -> Vec<String> {
    let mut found = Vec::new();
    for regex in regexes {
        for text in texts {
            found.extend(regex.captures_iter(text).filter_map(|c| first_group(&c)));
        }
    }
    found
}

/// Event bindings across the given texts, in pattern order.
pub fn event_handlers(texts: &[&str], patterns: &ElementPatterns) -> Vec<String> {
    collect_groups(&patterns.event_bindings, texts)
}

/// Subscribe/assign/emit/next targets across the given texts, in pattern order.
pub fn data_flow(texts: &[&str], patterns: &ElementPatterns) -> Vec<String> {
    collect_groups(&patterns.data_flow, texts)
}

/// Every interactive element of one component file.
///
/// Handlers and data flow are file-level facts and are copied onto each
/// element of the file.
pub fn discover_in_file(file: &SourceFile, root: &Path, patterns: &ElementPatterns) -> Vec<InteractiveElement> {
    let component = component_name(file, patterns);
    let template = resolve_template(file, root, patterns);

    let mut elements = Vec::new();
    if let Some(template) = &template {
        elements.extend(scan_template(template, &component, patterns));
    }
    elements.extend(scan_code(file, &component, patterns));
    if elements.is_empty() {
        return elements;
    }

    let mut texts = vec![file.content.as_str()];
    if let Some(template) = template.as_ref().filter(|t| t.external) {
        texts.push(template.text.as_str());
    }
    let handlers = event_handlers(&texts, patterns);
    let flow = data_flow(&texts, patterns);
    for element in &mut elements {
        element.event_handlers = handlers.clone();
        element.data_flow = flow.clone();
    }

    tracing::debug!(file = %file.path.display(), component = %component, elements = elements.len(), "discovered");
    elements
}

/// The most frequent key, ties going to the first seen.
fn most_common<'a>(keys: impl Iterator<Item = &'a str>) -> Option<(&'a str, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        let count = counts.entry(key).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for key in order {
        let count = counts[key];
        if best.map_or(true, |(_, b)| count > b) {
            best = Some((key, count));
        }
    }
    best
}

fn key_findings(elements: &[InteractiveElement]) -> Vec<String> {
    let count = |tier: Importance| elements.iter().filter(|e| e.importance == tier).count();
    let mut findings = vec![format!(
        "found {} critical (P0), {} important (P1) and {} ordinary (P2) interactive elements",
        count(Importance::P0),
        count(Importance::P1),
        count(Importance::P2)
    )];

    if let Some((component, n)) = most_common(elements.iter().map(|e| e.component_name.as_str())) {
        findings.push(format!(
            "the most complex component is {} with {} interactive elements",
            component, n
        ));
    }
    if let Some((cat, n)) = most_common(elements.iter().map(|e| e.category.as_str())) {
        findings.push(format!(
            "the dominant interaction type is {} at {:.1}%",
            cat,
            n as f64 * 100.0 / elements.len() as f64
        ));
    }
    findings
}

fn recommendations(elements: &[InteractiveElement]) -> Vec<String> {
    let has = |cat: Category| elements.iter().any(|e| e.category == cat);
    let mut out = Vec::new();

    if has(Category::MediaControl) {
        out.push("media controls need continuity checks across play, pause and switch interactions".to_string());
    }
    if has(Category::DataManipulation) {
        out.push("form interactions need their data flow and error handling verified".to_string());
    }
    let navigation = elements
        .iter()
        .filter(|e| e.category == Category::Navigation)
        .count();
    if navigation > 5 {
        out.push("navigation logic is complex; analyse route state management closely".to_string());
    }
    out
}

/// Group discovered elements for review.
pub fn analyze(elements: &[InteractiveElement], source_path: &str, timestamp: &str) -> ElementAnalysis {
    let mut by_category: BTreeMap<String, Vec<InteractiveElement>> = BTreeMap::new();
    let mut by_importance: BTreeMap<String, Vec<InteractiveElement>> = BTreeMap::new();
    let mut by_component: BTreeMap<String, Vec<InteractiveElement>> = BTreeMap::new();

    for element in elements {
        by_category
            .entry(element.category.to_string())
            .or_default()
            .push(element.clone());
        by_importance
            .entry(element.importance.to_string())
            .or_default()
            .push(element.clone());
        by_component
            .entry(element.component_name.clone())
            .or_default()
            .push(element.clone());
    }

    ElementAnalysis {
        analysis_timestamp: timestamp.to_string(),
        source_path: source_path.to_string(),
        total_interactive_elements: elements.len(),
        elements_by_category: by_category,
        elements_by_importance: by_importance,
        components_analysis: by_component,
        key_findings: key_findings(elements),
        recommendations: recommendations(elements),
    }
}
