//! Project-level extraction.
//!
//! Files are read and scanned in parallel, then merged in sorted file order
//! so identity rules (endpoint merge, last-write-wins interfaces) see the
//! same sequence a single-threaded run would.

use chrono::Utc;
use rayon::prelude::*;
use std::path::Path;

use crate::error::Result;
use crate::patterns::{ContractPatterns, DefinitionPatterns, ElementPatterns};
use crate::types::SourceFile;
use crate::walker::Walker;

use super::components::extract_components;
use super::definitions::{
    extract_defined_interfaces, extract_endpoint_calls, extract_react_components, is_typescript,
};
use super::elements::{analyze, discover_in_file};
use super::endpoints::extract_endpoints;
use super::interfaces::extract_interfaces;
use super::{
    ApiEndpoint, CodeDefinitions, ComponentProps, ContractExtraction, DefinedInterface,
    DiscoveryOutput, EndpointCall, EndpointRegistry, ExtractionMetadata, InterfaceDefinition,
    OrderedMap, ReactComponent,
};

struct FileContracts {
    interfaces: Vec<InterfaceDefinition>,
    endpoints: Vec<ApiEndpoint>,
    components: Vec<ComponentProps>,
}

fn contracts_of(file: &SourceFile, patterns: &ContractPatterns) -> Result<FileContracts> {
    Ok(FileContracts {
        interfaces: extract_interfaces(file, patterns),
        endpoints: extract_endpoints(file, patterns)?,
        components: extract_components(file, patterns)?,
    })
}

/// Extract interfaces, endpoints and component props from every source file under `root`.
pub fn extract_contracts(root: &Path, walker: &Walker, patterns: &ContractPatterns) -> Result<ContractExtraction> {
    let files = walker.collect(root)?;
    let sources = walker.read_readable(&files);

    let per_file = sources
        .par_iter()
        .map(|file| contracts_of(file, patterns))
        .collect::<Result<Vec<_>>>()?;

    let mut interfaces = OrderedMap::new();
    let mut registry = EndpointRegistry::new();
    let mut components = OrderedMap::new();
    for (file, found) in sources.iter().zip(per_file) {
        tracing::debug!(
            file = %file.path.display(),
            interfaces = found.interfaces.len(),
            endpoints = found.endpoints.len(),
            components = found.components.len(),
            "extracted"
        );
        for interface in found.interfaces {
            interfaces.insert(interface.name.clone(), interface);
        }
        for endpoint in found.endpoints {
            registry.add(endpoint);
        }
        for component in found.components {
            components.insert(component.component_name.clone(), component);
        }
    }

    let metadata = ExtractionMetadata {
        source_path: root.to_string_lossy().to_string(),
        extraction_date: Utc::now().to_rfc3339(),
        total_files: files.len(),
        total_endpoints: registry.len(),
        total_interfaces: interfaces.len(),
        total_components: components.len(),
    };
    tracing::info!(
        files = metadata.total_files,
        endpoints = metadata.total_endpoints,
        interfaces = metadata.total_interfaces,
        components = metadata.total_components,
        "contract extraction finished"
    );

    Ok(ContractExtraction {
        api_endpoints: registry.into_vec(),
        interfaces,
        component_props: components,
        metadata,
    })
}

/// Discover interactive elements in every source file under `root`.
pub fn discover_elements(root: &Path, walker: &Walker, patterns: &ElementPatterns) -> Result<DiscoveryOutput> {
    let files = walker.collect(root)?;
    let sources = walker.read_readable(&files);

    let elements: Vec<_> = sources
        .par_iter()
        .map(|file| discover_in_file(file, root, patterns))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();

    tracing::info!(files = files.len(), elements = elements.len(), "discovery finished");
    let analysis_report = analyze(&elements, &root.to_string_lossy(), &Utc::now().to_rfc3339());
    Ok(DiscoveryOutput {
        interactive_elements: elements,
        analysis_report,
    })
}

struct FileDefinitions {
    interfaces: Vec<DefinedInterface>,
    endpoints: Vec<EndpointCall>,
    components: Vec<ReactComponent>,
}

fn definitions_of(file: &SourceFile, patterns: &DefinitionPatterns) -> Result<FileDefinitions> {
    let interfaces = if is_typescript(&file.path) {
        extract_defined_interfaces(file, patterns)
    } else {
        Vec::new()
    };
    Ok(FileDefinitions {
        interfaces,
        endpoints: extract_endpoint_calls(file, patterns),
        components: extract_react_components(file, patterns)?,
    })
}

/// Extract code definitions from every source file under `root`.
pub fn extract_definitions(root: &Path, walker: &Walker, patterns: &DefinitionPatterns) -> Result<CodeDefinitions> {
    let files = walker.collect(root)?;
    let sources = walker.read_readable(&files);

    let per_file = sources
        .par_iter()
        .map(|file| definitions_of(file, patterns))
        .collect::<Result<Vec<_>>>()?;

    let mut definitions = CodeDefinitions::default();
    for found in per_file {
        for interface in found.interfaces {
            definitions.interfaces.insert(interface.name.clone(), interface);
        }
        definitions.endpoints.extend(found.endpoints);
        for component in found.components {
            definitions.components.insert(component.name.clone(), component);
        }
    }

    tracing::info!(
        files = files.len(),
        interfaces = definitions.interfaces.len(),
        endpoints = definitions.endpoints.len(),
        components = definitions.components.len(),
        "definition extraction finished"
    );
    Ok(definitions)
}
