//! Component input/output extraction from `@Component` decorated classes.

use regex::Regex;

use crate::error::{Error, Result};
use crate::patterns::ContractPatterns;
use crate::types::SourceFile;

use super::{ComponentProps, PropertyDescriptor};

fn compile(pattern: String) -> Result<Regex> {
    Regex::new(&pattern).map_err(|source| Error::InvalidPattern { pattern, source })
}

fn input_type(section: &str, name: &str) -> Result<String> {
    let re = compile(format!(r"{}\s*:\s*([^;\n]+)", regex::escape(name)))?;
    Ok(re
        .captures(section)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| "any".to_string()))
}

fn output_type(section: &str, name: &str) -> Result<String> {
    let re = compile(format!(
        r"{}\s*=\s*new\s+EventEmitter\s*<(.+?)>\s*\(",
        regex::escape(name)
    ))?;
    Ok(match re.captures(section) {
        Some(c) => format!("EventEmitter<{}>", c[1].trim()),
        None => "EventEmitter<any>".to_string(),
    })
}

/// Decorated component classes in `file` that declare inputs or outputs.
///
/// The search window for `@Input()`/`@Output()` runs from the decorator to
/// the end of the file, so a component also collects the inputs and outputs
/// of any later component in the same file.
pub fn extract_components(file: &SourceFile, patterns: &ContractPatterns) -> Result<Vec<ComponentProps>> {
    let source_file = file.display_path();
    let mut found = Vec::new();

    for decorator in patterns.component_decorator.find_iter(&file.content) {
        let Some(class) = patterns
            .export_class
            .captures(&file.content[decorator.end()..])
        else {
            continue;
        };
        let section = &file.content[decorator.start()..];

        let mut inputs = Vec::new();
        for caps in patterns.input_decorator.captures_iter(section) {
            let name = &caps[1];
            inputs.push(PropertyDescriptor {
                name: name.to_string(),
                ty: input_type(section, name)?,
                optional: true,
                default_value: String::new(),
            });
        }

        let mut outputs = Vec::new();
        for caps in patterns.output_decorator.captures_iter(section) {
            let name = &caps[1];
            outputs.push(PropertyDescriptor {
                name: name.to_string(),
                ty: output_type(section, name)?,
                optional: false,
                default_value: String::new(),
            });
        }

        if inputs.is_empty() && outputs.is_empty() {
            continue;
        }
        found.push(ComponentProps {
            component_name: class[1].to_string(),
            inputs,
            outputs,
            source_file: source_file.clone(),
            line_number: file.line_of(decorator.start()),
        });
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternLibrary;

    fn extract(content: &str) -> Vec<ComponentProps> {
        let lib = PatternLibrary::builtin().unwrap();
        extract_components(&SourceFile::new("user-card.component.ts", content), &lib.contracts).unwrap()
    }

    #[test]
    fn test_inputs_and_outputs() {
        let content = r#"import { Component } from '@angular/core';

@Component({
  selector: 'app-user-card',
  templateUrl: './user-card.component.html'
})
export class UserCardComponent {
  @Input() user: User;
  @Input() compact = false;
  @Output() selected = new EventEmitter<User>();
  @Output() closed = new EventEmitter();
}
"#;
        let found = extract(content);
        assert_eq!(found.len(), 1);
        let c = &found[0];
        assert_eq!(c.component_name, "UserCardComponent");
        assert_eq!(c.line_number, 3);

        assert_eq!(c.inputs.len(), 2);
        assert_eq!(c.inputs[0].name, "user");
        assert_eq!(c.inputs[0].ty, "User");
        assert!(c.inputs[0].optional);
        assert_eq!(c.inputs[1].ty, "any");

        assert_eq!(c.outputs.len(), 2);
        assert_eq!(c.outputs[0].ty, "EventEmitter<User>");
        assert_eq!(c.outputs[1].ty, "EventEmitter<any>");
    }

    #[test]
    fn test_component_without_bindings_skipped() {
        let content = "@Component({ selector: 'app-empty' })\nexport class EmptyComponent {}\n";
        assert!(extract(content).is_empty());
    }

    #[test]
    fn test_decorator_without_class_skipped() {
        assert!(extract("@Component({ selector: 'app-x' })\n@Input() a: string;\n").is_empty());
    }
}
