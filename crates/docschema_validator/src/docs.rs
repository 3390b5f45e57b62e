//! Documentation generator.
//!
//! Renders a validator tree as plain text, Markdown tables or JSON without
//! running any validation. Every piece of text comes from the validators'
//! own `describe`, `type_label` and `doc_table`, so the documentation follows
//! whatever the validators enforce.

use docschema_core::{DocTable, Validator};
use regex::Regex;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::LazyLock;

static OBJECT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Object(s?) \(([\w\s]*)\)").expect("object label pattern compiles")
});

/// Pluralizes a type label for use after "Array of".
///
/// Only the head noun of each alternative changes: "Object (Node)" becomes
/// "Objects (Node)", "String or null" becomes "Strings or nulls" and a nested
/// "Array of Strings" becomes "Arrays of Strings".
pub fn pluralize_label(label: &str) -> String {
    label
        .split(" or ")
        .map(pluralize_alternative)
        .collect::<Vec<_>>()
        .join(" or ")
}

fn pluralize_alternative(label: &str) -> String {
    if let Some(rest) = label.strip_prefix("Array of ") {
        return format!("Arrays of {}", rest);
    }

    match label.find(" (") {
        Some(idx) if label.ends_with(')') => {
            format!("{}{}", pluralize_word(&label[..idx]), &label[idx..])
        }
        _ => pluralize_word(label),
    }
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if ["s", "x", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last().map(|c| c.to_ascii_lowercase());
        if before.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", word)
}

/// In-page anchor for a schema title.
pub fn anchor(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Turns "Object (Name)" mentions into in-page Markdown links.
pub fn link_objects(label: &str) -> String {
    OBJECT_LABEL
        .replace_all(label, |caps: &regex::Captures<'_>| {
            format!("Object{} ([{}](#{}))", &caps[1], &caps[2], anchor(&caps[2]))
        })
        .into_owned()
}

/// Collects the tables of every object schema reachable from `root`.
///
/// Tables appear in depth-first declaration order; a schema reused in several
/// places is listed once.
pub fn collect_tables(root: &dyn Validator) -> Vec<DocTable> {
    let mut seen = HashSet::new();
    let mut tables = Vec::new();
    visit(root, &mut seen, &mut tables);
    tables
}

fn visit(validator: &dyn Validator, seen: &mut HashSet<String>, tables: &mut Vec<DocTable>) {
    if let Some(table) = validator.doc_table() {
        if !seen.insert(table.title.clone()) {
            return;
        }
        tables.push(table);
    }
    for child in validator.children() {
        visit(child, seen, tables);
    }
}

/// Renders one table as Markdown.
pub fn render_table(table: &DocTable) -> String {
    let mut s = format!("### {}\n\n", table.title);
    if let Some(description) = &table.description {
        s.push_str(description);
        s.push_str("\n\n");
    }

    s.push_str("| Name | Description | Type | Required | Requirements |\n");
    s.push_str("|---|---|---|---|---|\n");
    for row in &table.rows {
        let required = if row.requirement.is_required() { "X" } else { "" };
        s.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.name,
            row.description,
            link_objects(&row.type_label),
            required,
            row.requirements.join("<br>"),
        ));
    }
    s
}

/// Renders `root` and every nested object schema as Markdown.
pub fn render_markdown(root: &dyn Validator) -> String {
    let mut sections = Vec::new();
    if root.doc_table().is_none() {
        let label = root.type_label().unwrap_or_else(|| "Value".to_string());
        sections.push(format!(
            "**Type:** {}\n\n{}\n",
            link_objects(&label),
            root.describe()
        ));
    }
    sections.extend(collect_tables(root).iter().map(render_table));
    sections.join("\n")
}

/// Renders `root` as plain text.
pub fn render_text(root: &dyn Validator) -> String {
    match root.type_label() {
        Some(label) => format!("{}\n{}", label, root.describe()),
        None => root.describe(),
    }
}

/// Renders `root` as structured JSON documentation.
pub fn render_json(root: &dyn Validator) -> Value {
    json!({
        "type": root.type_label(),
        "description": root.describe(),
        "objects": collect_tables(root),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{array, or};
    use crate::primitives::{float, null, string};
    use crate::{FieldBuilder, ObjectSchemaBuilder};
    use std::sync::Arc;

    #[test]
    fn test_pluralize_labels() {
        assert_eq!(pluralize_label("Object (Node)"), "Objects (Node)");
        assert_eq!(pluralize_label("Number (float)"), "Numbers (float)");
        assert_eq!(pluralize_label("String"), "Strings");
        assert_eq!(pluralize_label("String or null"), "Strings or nulls");
        assert_eq!(pluralize_label("Array of Strings"), "Arrays of Strings");
        assert_eq!(
            pluralize_label("Array of Strings or null"),
            "Arrays of Strings or nulls"
        );
        assert_eq!(pluralize_label("Box"), "Boxes");
        assert_eq!(pluralize_label("Entry"), "Entries");
        assert_eq!(pluralize_label("Day"), "Days");
    }

    #[test]
    fn test_link_objects() {
        assert_eq!(
            link_objects("Array of Objects (Arc details)"),
            "Array of Objects ([Arc details](#arc-details))"
        );
        assert_eq!(link_objects("String"), "String");
    }

    fn sample() -> Arc<dyn Validator> {
        let node = Arc::new(
            ObjectSchemaBuilder::new("Node")
                .field(FieldBuilder::new("lat").optional().description("Latitude").validator(float()))
                .build()
                .unwrap(),
        );
        Arc::new(
            ObjectSchemaBuilder::new("Path")
                .description("A path")
                .field(
                    FieldBuilder::new("from")
                        .required()
                        .description("Start")
                        .validator(node.clone()),
                )
                .field(
                    FieldBuilder::new("stops")
                        .optional()
                        .description("Stops")
                        .validator(array(vec![node])),
                )
                .field(
                    FieldBuilder::new("label")
                        .required()
                        .description("Label")
                        .validator(or(vec![string(), null()])),
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_collect_tables_deduplicates() {
        let tables = collect_tables(sample().as_ref());
        let titles: Vec<_> = tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Path", "Node"]);
    }

    #[test]
    fn test_render_markdown() {
        let md = render_markdown(sample().as_ref());
        assert!(md.contains("### Path"));
        assert!(md.contains("| from | Start | Object ([Node](#node)) | X |  |"));
        assert!(md.contains("| stops | Stops | Array of Objects ([Node](#node)) |  |  |"));
        assert!(md.contains("| label | Label | String or null | X |  |"));
        assert!(md.contains("### Node"));
    }

    #[test]
    fn test_render_markdown_for_non_object_root() {
        let md = render_markdown(array(vec![string()]).as_ref());
        assert!(md.starts_with("**Type:** Array of Strings"));
    }

    #[test]
    fn test_render_json() {
        let doc = render_json(sample().as_ref());
        assert_eq!(doc["type"], "Object (Path)");
        assert_eq!(doc["objects"][0]["rows"][2]["type"], "String or null");
    }

    #[test]
    fn test_render_text_starts_with_label() {
        let text = render_text(sample().as_ref());
        assert!(text.starts_with("Object (Path)\n"));
        assert!(text.contains("from: (required) Start"));
    }
}
