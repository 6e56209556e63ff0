//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use strata_domain::{AttributeValue, QueryResult};
use strata_registry::ConfigurationSummary;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an extraction result.
    pub fn format_result(&self, result: &QueryResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_result_json(result),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(result
                .entities
                .iter()
                .map(|e| e.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_result_json(&self, result: &QueryResult) -> Result<String> {
        let entities: Vec<serde_json::Value> = result
            .entities
            .iter()
            .map(|e| {
                let extra: serde_json::Map<String, serde_json::Value> = e
                    .extra
                    .iter()
                    .map(|(key, value)| (key.clone(), attribute_json(value)))
                    .collect();
                serde_json::json!({
                    "id": e.id,
                    "type_id": e.type_id,
                    "label": e.label,
                    "position": e.position,
                    "layer_key": e.layer_key,
                    "subtitle": e.subtitle,
                    "color": e.color,
                    "extra": extra,
                })
            })
            .collect();

        let relationships: Vec<serde_json::Value> = result
            .relationships
            .iter()
            .map(|r| {
                serde_json::json!({
                    "subject_id": r.subject_id,
                    "predicate_iri": r.predicate_iri,
                    "object_id": r.object_id,
                    "layer_key": r.layer_key,
                })
            })
            .collect();

        let layers: serde_json::Map<String, serde_json::Value> = result
            .layers
            .iter()
            .map(|(key, layer)| {
                (
                    key.clone(),
                    serde_json::json!({
                        "display_name": layer.display_name,
                        "color": layer.color,
                        "height": layer.height,
                    }),
                )
            })
            .collect();

        let links: Vec<serde_json::Value> = result
            .cross_layer_links
            .iter()
            .map(|l| serde_json::json!({ "source_id": l.source_id, "target_id": l.target_id }))
            .collect();

        let diagnostics: Vec<String> = result.diagnostics.iter().map(ToString::to_string).collect();

        let doc = serde_json::json!({
            "configuration_used": result.configuration_used,
            "entities": entities,
            "relationships": relationships,
            "layers": layers,
            "cross_layer_links": links,
            "diagnostics": diagnostics,
        });
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    fn format_result_table(&self, result: &QueryResult) -> String {
        let mut sections = Vec::new();

        if result.entities.is_empty() {
            sections.push(self.colorize("No entities extracted.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Type", "Label", "Position", "Layer"]);
            for entity in &result.entities {
                let [x, y, z] = entity.position;
                builder.push_record([
                    entity.id.clone(),
                    entity.type_id.clone(),
                    entity.label.clone(),
                    format!("({}, {}, {})", x, y, z),
                    entity.layer_key.clone(),
                ]);
            }
            sections.push(table(builder));
        }

        if !result.relationships.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Subject", "Predicate", "Object", "Layer"]);
            for r in &result.relationships {
                builder.push_record([
                    r.subject_id.as_str(),
                    r.predicate_iri.as_str(),
                    r.object_id.as_str(),
                    r.layer_key.as_str(),
                ]);
            }
            sections.push(table(builder));
        }

        if !result.layers.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Layer", "Name", "Color", "Height"]);
            for layer in result.layers.values() {
                builder.push_record([
                    layer.key.clone(),
                    layer.display_name.clone(),
                    format!("#{:06x}", layer.color),
                    layer.height.to_string(),
                ]);
            }
            sections.push(table(builder));
        }

        if !result.cross_layer_links.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Source", "Target"]);
            for link in &result.cross_layer_links {
                builder.push_record([link.source_id.as_str(), link.target_id.as_str()]);
            }
            sections.push(table(builder));
        }

        for diagnostic in &result.diagnostics {
            sections.push(self.warning(&diagnostic.to_string()));
        }

        sections.push(self.info(&format!(
            "{} ({})",
            result.summary(),
            result.configuration_used
        )));
        sections.join("\n")
    }

    /// Format configuration summaries.
    pub fn format_summaries(&self, summaries: &[ConfigurationSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = summaries
                    .iter()
                    .map(|s| {
                        let targets: Vec<&str> =
                            s.target_attributes.iter().map(|t| t.as_str()).collect();
                        serde_json::json!({
                            "id": s.id,
                            "name": s.name,
                            "entity_types": s.entity_type_ids,
                            "target_attributes": targets,
                            "relationships": s.relationship_labels,
                            "namespace_prefixes": s.namespace_prefixes,
                            "active": s.active,
                            "builtin": s.builtin,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Quiet => Ok(summaries
                .iter()
                .map(|s| s.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["", "ID", "Name", "Entity Types", "Relationships", "Prefixes"]);
                for s in summaries {
                    builder.push_record([
                        if s.active { "*" } else { "" }.to_string(),
                        s.id.clone(),
                        s.name.clone(),
                        s.entity_type_ids.join(", "),
                        s.relationship_labels.join(", "),
                        s.namespace_prefixes.join(", "),
                    ]);
                }
                Ok(table(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn attribute_json(value: &AttributeValue) -> serde_json::Value {
    match value {
        AttributeValue::Text(text) => serde_json::Value::from(text.as_str()),
        AttributeValue::Number(n) => serde_json::json!(n),
        AttributeValue::Vector3(v) => serde_json::json!(v),
    }
}
