//! The pattern library.
//!
//! Every regular expression the extractors, scanners and validators use is
//! compiled once here and handed around by reference. Builtin tables are
//! plain string constants; project-specific patterns from the config are
//! appended after them.

use regex::Regex;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::reality::ViolationKind;

/// HTTP verbs recognised on call sites, in inference order.
pub const HTTP_METHODS: &[&str] = &["get", "post", "put", "delete", "patch", "head", "options"];

const INTERFACE: &str =
    r"(?:export\s+)?(?:interface|type)\s+(\w+)(?:\s+extends\s+([^{]+))?\s*\{([^}]*)\}";
const PROPERTY: &str = r"(\w+)(\?)?:\s*([^;=\n]+)(?:\s*=\s*([^;\n]+))?";

const BACKEND_CALLS: &[&str] = &[
    r#"\.(?:get|post|put|delete|patch|head|options)(?:<[^()]*>)?\(['"`]([^'"`]+)['"`]"#,
    r#"request\(['"`]([^'"`]+)['"`]"#,
    r#"fetch\(['"`]([^'"`]+)['"`]"#,
];
const API_PATH: &str = r"^(?:/|https?://)";

const SERVICE_IDENTIFIERS: &[&str] = &[
    r"([A-Z][a-zA-Z]*Service)\.",
    r"([A-Z][a-zA-Z]*Repository)\.",
    r"([A-Z][a-zA-Z]*Api)\.",
    r"([a-zA-Z]*Service)\.",
    r"([a-zA-Z]*Repository)\.",
];

const COMPONENT_DECORATOR: &str =
    r#"@Component\s*\(\s*\{[^}]*selector\s*:\s*['"`]([^'"`]+)['"`][^}]*\}"#;
const EXPORT_CLASS: &str = r"export\s+class\s+(\w+)";
const INPUT_DECORATOR: &str = r"@Input\(\)\s*(\w+)";
const OUTPUT_DECORATOR: &str = r"@Output\(\)\s*(\w+)";

// Template detectors, matched case-insensitively per template line.
const BUTTONS: &str = r"<button[^>]*>|<mat-button[^>]*>|\.button|Button| MatButtonModule";
const NAVIGATION_LINKS: &str = r"<a[^>]*routerLink|<a[^>]*\(click\)";
const MENUS: &str = r"<mat-menu|dropdown|context-menu|\.menu|Menu";
const MEDIA: &str = r"<video[^>]*>|<audio[^>]*>|media|player";
const FORM_INPUTS: &str = r"<input[^>]*|<select[^>]*|<textarea[^>]*";

// Code detectors, matched per code line.
const EVENT_HANDLER_LINE: &str =
    r"\((click|change|submit|input|keydown)\)|@(click|change|submit|input|keydown)";
const SERVICE_CALL_LINE: &str =
    r"\.subscribe\(|\.toPromise\(\)|\.get\(|\.post\(|\.put\(|\.delete\(";
const NAVIGATION_LINE: &str = r"router\.navigate";

const ELEMENT_NAME: &str = r#"(?:id|name|#|ref)\s*=\s*["']([^"']+)["']"#;
const CALL_NAME: &str = r"(\w+)\s*\(";

const SELECTOR: &str = r#"@Component\([^)]*selector\s*:\s*["']([^"']+)["']"#;
const COMPONENT_CLASS: &str = r"class\s+(\w+Component)";
const TEMPLATE_URL: &str = r#"templateUrl\s*:\s*["']([^"']+)["']"#;
const INLINE_TEMPLATE: &str = r#"\btemplate\s*:\s*(?:`([^`]*)`|'([^']*)'|"([^"]*)")"#;

const EVENT_BINDINGS: &[&str] = &[
    r#"\((click)\)\s*=\s*"[^"]*""#,
    r#"@(click)\s*=\s*"[^"]*""#,
    r#"addEventListener\(['"](click)['"]"#,
    r#"onClick\s*=\s*['"]([^'"]*)['"]"#,
    r"onClick\s*=\s*\{\s*([^}]*?)\s*\}",
];

const DATA_FLOW: &[&str] = &[
    r"(\w+)\.subscribe\(",
    r"this\.(\w+)\s*=",
    r"(\w+)\.emit\(",
    r"(\w+)\.next\(",
];

const MOCK_MARKERS: &[(&str, ViolationKind)] = &[
    (r"mockData|fakeData|dummyData", ViolationKind::MockData),
    (r"mockResolvedValue|mockReturnValue", ViolationKind::FakeApi),
    (r"const\s+mock\s*=\s*\[", ViolationKind::MockData),
    (r"let\s+mock\s*=\s*\[", ViolationKind::MockData),
    (r"hardcoded|hard-coded", ViolationKind::HardcodedValues),
];

const PLACEHOLDER_MARKERS: &[&str] = &[
    r"TODO|FIXME",
    r"placeholder|占位符",
    r"not implemented|未实现",
    r"//\s*实现",
];

const REAL_DATA_MARKERS: &[&str] = &[
    r"await\s+fetch\(",
    r"axios\.(get|post|put|delete)",
    r"http\.(get|post|put|delete)",
    r"api\.|/api/",
    r"useQuery\(",
    r"useMutation\(",
];

const BUSINESS_LOGIC: &[&str] = &[
    r"if\s*\(",
    r"switch\s*\(",
    r"for\s*\(",
    r"while\s*\(",
    r"do\s*\{",
    r"function\s+\w+\s*\(",
    r"const\s+\w+\s*=\s*\(",
    r"class\s+\w+",
    r"try\s*\{",
    r"catch\s*\(",
];

// The validator counts any `mock =` assignment, not only array literals.
const VALIDATION_MOCK_MARKERS: &[&str] = &[
    r"mockData|fakeData|dummyData",
    r"mockResolvedValue|mockReturnValue",
    r"const\s+mock\s*=",
    r"let\s+mock\s*=",
    r"hardcoded|hard-coded",
];

const DECLARATIONS: &[&str] = &[
    r"interface\s+\w+",
    r"type\s+\w+",
    r"class\s+\w+",
    r"function\s+\w+",
    r"const\s+\w+\s*=",
];

// Any interface declaration, including `extends` and generic headers.
const INTERFACE_DECLARATION: &str = r"\binterface\s+\w+";

/// (pattern, suffix that cancels a match)
const ASSUMPTIONS: &[(&str, Option<&str>)] = &[
    (r"基于假设|假设的|assumed|hypothetical", None),
    (r"可能包含|大概|approximately", None),
    (r"待验证|需要验证|to be validated", None),
    (r"基于文档", None),
    (r"based on documentation", Some("source")),
];

const DEF_INTERFACE: &str = r"(export\s+)?interface\s+(\w+)\s*\{([^}]*)\}";
const DEF_HTTP_CALL: &str = r#"(?i)\b(get|post|put|delete|patch)\s*\(\s*['"`]([^'"`]+)['"`]"#;
const DEF_FETCH: &str = r#"\bfetch\s*\(\s*['"`]([^'"`]+)['"`]"#;
const DEF_FUNCTION_COMPONENT: &str =
    r"(?m)(?:export\s+)?(?:const|function)\s+(\w+)[^\n]*?(?:React\.)?(?:FC|FunctionComponent)\b";
const DEF_CLASS_COMPONENT: &str =
    r"class\s+(\w+)\s+extends\s+(?:React\.)?(?:Component|PureComponent)\b";
const DEF_LINE_COMMENT: &str = r"(?m)//.*$";
const DEF_BLOCK_COMMENT: &str = r"(?s)/\*.*?\*/";
const DEF_LINE_PROPERTY: &str = r"^(\w+)\??\s*:\s*([^;]+)";

/// A mock-data marker tagged with the violation it reports.
#[derive(Debug, Clone)]
pub struct KindPattern {
    pub regex: Regex,
    pub kind: ViolationKind,
}

/// Assumption-language marker for design documents.
#[derive(Debug, Clone)]
pub struct AssumptionPattern {
    pub regex: Regex,
    /// Text that, directly after a match, means the match is not an assumption.
    pub forbidden_suffix: Option<&'static str>,
    pub source: &'static str,
}

impl AssumptionPattern {
    /// True when `text` contains this marker.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.find_iter(text).any(|m| match self.forbidden_suffix {
            Some(suffix) => {
                let next: String = text[m.end()..].chars().take(suffix.chars().count()).collect();
                !next.eq_ignore_ascii_case(suffix)
            }
            None => true,
        })
    }
}

/// API contract patterns: interfaces, HTTP call sites, services, components.
#[derive(Debug, Clone)]
pub struct ContractPatterns {
    pub interface: Regex,
    pub property: Regex,
    pub backend_calls: Vec<Regex>,
    pub api_path: Regex,
    pub service_identifiers: Vec<Regex>,
    pub component_decorator: Regex,
    pub export_class: Regex,
    pub input_decorator: Regex,
    pub output_decorator: Regex,
}

/// Interactive element patterns for templates and component code.
#[derive(Debug, Clone)]
pub struct ElementPatterns {
    pub buttons: Regex,
    pub navigation_links: Regex,
    pub menus: Regex,
    pub media: Regex,
    pub form_inputs: Regex,
    pub event_handler_line: Regex,
    pub service_call_line: Regex,
    pub navigation_line: Regex,
    pub element_name: Regex,
    pub call_name: Regex,
    pub selector: Regex,
    pub component_class: Regex,
    pub template_url: Regex,
    pub inline_template: Regex,
    pub event_bindings: Vec<Regex>,
    pub data_flow: Vec<Regex>,
}

/// Reality scan markers.
#[derive(Debug, Clone)]
pub struct RealityPatterns {
    pub mock: Vec<KindPattern>,
    pub placeholder: Vec<Regex>,
    pub real_data: Vec<Regex>,
    pub business_logic: Vec<Regex>,
}

/// Project validation markers.
#[derive(Debug, Clone)]
pub struct ValidationPatterns {
    pub mock: Vec<Regex>,
    pub real_data: Vec<Regex>,
    pub placeholder: Vec<Regex>,
    pub real_logic: Vec<Regex>,
    pub declarations: Vec<Regex>,
    pub interface_declaration: Regex,
    pub assumptions: Vec<AssumptionPattern>,
}

/// Code-definition extraction patterns.
#[derive(Debug, Clone)]
pub struct DefinitionPatterns {
    pub interface: Regex,
    pub http_call: Regex,
    pub fetch: Regex,
    pub function_component: Regex,
    pub class_component: Regex,
    pub line_comment: Regex,
    pub block_comment: Regex,
    pub line_property: Regex,
}

/// All compiled patterns, built once per run.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    pub contracts: ContractPatterns,
    pub elements: ElementPatterns,
    pub reality: RealityPatterns,
    pub validation: ValidationPatterns,
    pub definitions: DefinitionPatterns,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_ci(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){}", pattern)).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile(p)).collect()
}

fn compile_all_ci(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile_ci(p)).collect()
}

impl PatternLibrary {
    /// Compile the builtin tables plus the extra patterns from `config`.
    ///
    /// Marker patterns (mock, placeholder, real data, business logic) and
    /// their config extensions match case-insensitively.
    pub fn new(config: &Config) -> Result<Self> {
        let extra_mock = config
            .patterns
            .mock
            .iter()
            .map(|p| {
                Ok(KindPattern {
                    regex: compile_ci(&p.pattern)?,
                    kind: p.kind.unwrap_or(ViolationKind::MockData),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let extra_placeholder = config
            .patterns
            .placeholder
            .iter()
            .map(|p| compile_ci(&p.pattern))
            .collect::<Result<Vec<_>>>()?;
        let extra_real_data = config
            .patterns
            .real_data
            .iter()
            .map(|p| compile_ci(&p.pattern))
            .collect::<Result<Vec<_>>>()?;

        let contracts = ContractPatterns {
            interface: compile(INTERFACE)?,
            property: compile(PROPERTY)?,
            backend_calls: compile_all(BACKEND_CALLS)?,
            api_path: compile(API_PATH)?,
            service_identifiers: compile_all(SERVICE_IDENTIFIERS)?,
            component_decorator: compile(COMPONENT_DECORATOR)?,
            export_class: compile(EXPORT_CLASS)?,
            input_decorator: compile(INPUT_DECORATOR)?,
            output_decorator: compile(OUTPUT_DECORATOR)?,
        };

        let elements = ElementPatterns {
            buttons: compile_ci(BUTTONS)?,
            navigation_links: compile_ci(NAVIGATION_LINKS)?,
            menus: compile_ci(MENUS)?,
            media: compile_ci(MEDIA)?,
            form_inputs: compile_ci(FORM_INPUTS)?,
            event_handler_line: compile(EVENT_HANDLER_LINE)?,
            service_call_line: compile(SERVICE_CALL_LINE)?,
            navigation_line: compile(NAVIGATION_LINE)?,
            element_name: compile(ELEMENT_NAME)?,
            call_name: compile(CALL_NAME)?,
            selector: compile(SELECTOR)?,
            component_class: compile(COMPONENT_CLASS)?,
            template_url: compile(TEMPLATE_URL)?,
            inline_template: compile(INLINE_TEMPLATE)?,
            event_bindings: compile_all(EVENT_BINDINGS)?,
            data_flow: compile_all(DATA_FLOW)?,
        };

        let mut mock = MOCK_MARKERS
            .iter()
            .map(|(p, kind)| {
                Ok(KindPattern {
                    regex: compile_ci(p)?,
                    kind: *kind,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        mock.extend(extra_mock.iter().cloned());

        let mut placeholder = compile_all_ci(PLACEHOLDER_MARKERS)?;
        placeholder.extend(extra_placeholder.iter().cloned());

        let mut real_data = compile_all_ci(REAL_DATA_MARKERS)?;
        real_data.extend(extra_real_data.iter().cloned());

        let reality = RealityPatterns {
            mock,
            placeholder,
            real_data: real_data.clone(),
            business_logic: compile_all_ci(BUSINESS_LOGIC)?,
        };

        let mut validation_mock = compile_all_ci(VALIDATION_MOCK_MARKERS)?;
        validation_mock.extend(extra_mock.into_iter().map(|p| p.regex));

        // Only TODO/FIXME, placeholder and "not implemented" count here.
        let mut validation_placeholder = compile_all_ci(&PLACEHOLDER_MARKERS[..3])?;
        validation_placeholder.extend(extra_placeholder);

        let validation = ValidationPatterns {
            mock: validation_mock,
            real_data,
            placeholder: validation_placeholder,
            real_logic: compile_all_ci(&BUSINESS_LOGIC[..8])?,
            declarations: compile_all_ci(DECLARATIONS)?,
            interface_declaration: compile(INTERFACE_DECLARATION)?,
            assumptions: ASSUMPTIONS
                .iter()
                .map(|(p, suffix)| {
                    Ok(AssumptionPattern {
                        regex: compile_ci(p)?,
                        forbidden_suffix: *suffix,
                        source: *p,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        };

        let definitions = DefinitionPatterns {
            interface: compile(DEF_INTERFACE)?,
            http_call: compile(DEF_HTTP_CALL)?,
            fetch: compile(DEF_FETCH)?,
            function_component: compile(DEF_FUNCTION_COMPONENT)?,
            class_component: compile(DEF_CLASS_COMPONENT)?,
            line_comment: compile(DEF_LINE_COMMENT)?,
            block_comment: compile(DEF_BLOCK_COMMENT)?,
            line_property: compile(DEF_LINE_PROPERTY)?,
        };

        Ok(Self {
            contracts,
            elements,
            reality,
            validation,
            definitions,
        })
    }

    /// The builtin tables without project extensions.
    pub fn builtin() -> Result<Self> {
        Self::new(&Config::default())
    }
}

/// True when `path` looks like an API path or absolute URL.
pub fn is_api_path(patterns: &ContractPatterns, path: &str) -> bool {
    !path.is_empty() && patterns.api_path.is_match(path)
}

/// Infer the HTTP method from a `.verb(` token on the call's line.
///
/// Returns `None` when the line has no recognised verb.
pub fn infer_http_method(line: &str) -> Option<String> {
    HTTP_METHODS
        .iter()
        .find(|m| line.contains(&format!(".{}(", m)) || line.contains(&format!(".{}<", m)))
        .map(|m| m.to_uppercase())
}
