//! Enumerated classifiers for extracted records.
//!
//! Each mapping is a plain `match` so the defaults are visible in one place.

use serde::{Deserialize, Serialize};

/// Kind of interactive element found in a template or component code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    // Template kinds
    Button,
    NavigationLink,
    MenuItem,
    MediaControl,
    FormInput,
    // Code kinds
    EventHandler,
    ServiceCall,
    Navigation,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::NavigationLink => "navigation_link",
            ElementKind::MenuItem => "menu_item",
            ElementKind::MediaControl => "media_control",
            ElementKind::FormInput => "form_input",
            ElementKind::EventHandler => "event_handler",
            ElementKind::ServiceCall => "service_call",
            ElementKind::Navigation => "navigation",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic criticality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Importance {
    P0,
    P1,
    P2,
}

impl Importance {
    pub const ALL: [Importance; 3] = [Importance::P0, Importance::P1, Importance::P2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::P0 => "P0",
            Importance::P1 => "P1",
            Importance::P2 => "P2",
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DataManipulation,
    MediaControl,
    Navigation,
    UiInteraction,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DataManipulation => "data_manipulation",
            Category::MediaControl => "media_control",
            Category::Navigation => "navigation",
            Category::UiInteraction => "ui_interaction",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of code an endpoint call goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointCategory {
    Http,
    Service,
    Repository,
    Unknown,
}

impl EndpointCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointCategory::Http => "http",
            EndpointCategory::Service => "service",
            EndpointCategory::Repository => "repository",
            EndpointCategory::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EndpointCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const P0_KEYWORDS: &[&str] = &["submit", "save", "delete", "navigate", "login", "logout"];
const P1_KEYWORDS: &[&str] = &["change", "update", "edit", "search"];

pub fn category(kind: ElementKind) -> Category {
    match kind {
        ElementKind::Button | ElementKind::MenuItem | ElementKind::EventHandler => {
            Category::UiInteraction
        }
        ElementKind::NavigationLink | ElementKind::Navigation => Category::Navigation,
        ElementKind::MediaControl => Category::MediaControl,
        ElementKind::FormInput | ElementKind::ServiceCall => Category::DataManipulation,
    }
}

/// Importance of a template element from keywords on its line.
pub fn template_importance(line: &str) -> Importance {
    let lower = line.to_lowercase();
    if P0_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Importance::P0
    } else if P1_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Importance::P1
    } else {
        Importance::P2
    }
}

/// Importance of a code element from its kind alone.
pub fn code_importance(kind: ElementKind) -> Importance {
    match kind {
        ElementKind::Navigation | ElementKind::ServiceCall => Importance::P0,
        ElementKind::EventHandler => Importance::P1,
        _ => Importance::P2,
    }
}

/// What the user does with a template element.
pub fn template_user_action(kind: ElementKind, line: &str) -> String {
    let mut action = match kind {
        ElementKind::Button => "user clicks a button",
        ElementKind::NavigationLink => "user follows a navigation link",
        ElementKind::MenuItem => "user selects a menu item",
        ElementKind::MediaControl => "user operates a media control",
        ElementKind::FormInput => "user enters form data",
        _ => "user interacts with the element",
    }
    .to_string();

    let lower = line.to_lowercase();
    if lower.contains("more") || line.contains("更多") {
        action.push_str(" (more menu)");
    }
    if lower.contains("switch") || line.contains("切换") {
        action.push_str(" (toggle)");
    }
    if lower.contains("play") || line.contains("播放") {
        action.push_str(" (play control)");
    }
    if lower.contains("pause") || line.contains("暂停") {
        action.push_str(" (pause control)");
    }
    action
}

/// How the system reacts to a template element.
pub fn template_system_response(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Button => "runs the bound event handler",
        ElementKind::NavigationLink => "navigates to another page or route",
        ElementKind::MenuItem => "opens the menu or runs the menu action",
        ElementKind::MediaControl => "changes media playback state",
        ElementKind::FormInput => "updates form state",
        _ => "runs the corresponding system response",
    }
}

/// What the user does to reach a code element, from its line.
pub fn code_user_action(line: &str) -> &'static str {
    let lower = line.to_lowercase();
    if lower.contains("navigate") {
        "user triggers page navigation"
    } else if lower.contains("click") {
        "user click triggers an event"
    } else if lower.contains("change") {
        "user changes data state"
    } else {
        "user interaction runs code"
    }
}

/// How the system reacts to a code element, from its line.
pub fn code_system_response(line: &str) -> &'static str {
    let lower = line.to_lowercase();
    if lower.contains("service") {
        "calls a backend service API"
    } else if lower.contains("router") {
        "performs route navigation"
    } else if lower.contains("emit") {
        "emits an event notification"
    } else {
        "runs business logic"
    }
}

/// Category of a frontend endpoint from its identifier suffix.
pub fn endpoint_category(identifier: &str) -> EndpointCategory {
    if identifier.ends_with("Repository") {
        EndpointCategory::Repository
    } else if identifier.ends_with("Service") || identifier.ends_with("Api") {
        EndpointCategory::Service
    } else {
        EndpointCategory::Unknown
    }
}
