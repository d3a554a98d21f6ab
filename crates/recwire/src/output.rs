use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use recwire_codec::PlannedField;
use recwire_records::RecordKind;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct KindOutput<'a> {
    name: &'a str,
    domain: &'a str,
    stack_len: u32,
}

#[derive(Serialize)]
struct FieldOutput<'a> {
    name: &'a str,
    ty: &'a str,
    offset: u32,
    width: u32,
    kind: &'a str,
    depth: usize,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    record: &'a str,
    stack_len: u32,
    fields: Vec<FieldOutput<'a>>,
}

/// Summary of one `encode` invocation.
#[derive(Serialize)]
pub struct EncodedOutput<'a> {
    pub record: &'a str,
    pub size: usize,
    pub reserved: u32,
    pub framed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
}

pub fn print_kinds(kinds: &[RecordKind], format: OutputFormat) {
    let rows: Vec<KindOutput<'_>> = kinds
        .iter()
        .map(|kind| KindOutput {
            name: kind.name,
            domain: kind.domain,
            stack_len: kind.stack_len,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows, false),
        OutputFormat::Pretty => {
            for row in &rows {
                println!(
                    "{} (domain={}, stack_len={})",
                    row.name, row.domain, row.stack_len
                );
            }
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["RECORD", "DOMAIN", "STACK"]);
            for row in &rows {
                table.add_row(vec![
                    row.name.to_string(),
                    row.domain.to_string(),
                    row.stack_len.to_string(),
                ]);
            }
            println!("{table}");
        }
    }
}

pub fn print_plan(kind: &RecordKind, fields: &[PlannedField], format: OutputFormat) {
    let out = PlanOutput {
        record: kind.name,
        stack_len: kind.stack_len,
        fields: fields
            .iter()
            .map(|field| FieldOutput {
                name: &field.name,
                ty: field.ty,
                offset: field.offset,
                width: field.width,
                kind: field.kind.as_str(),
                depth: field.depth,
            })
            .collect(),
    };

    match format {
        OutputFormat::Json => print_json(&out, false),
        OutputFormat::Pretty => {
            println!("{} stack_len={}", out.record, out.stack_len);
            for field in &out.fields {
                println!(
                    "{:indent$}{} @{} +{} {} ({})",
                    "",
                    field.name,
                    field.offset,
                    field.width,
                    field.ty,
                    field.kind,
                    indent = 2 + field.depth * 2
                );
            }
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "TYPE", "OFFSET", "WIDTH", "KIND"]);
            for field in &out.fields {
                table.add_row(vec![
                    field.name.to_string(),
                    field.ty.to_string(),
                    field.offset.to_string(),
                    field.width.to_string(),
                    field.kind.to_string(),
                ]);
            }
            println!("{table}");
        }
    }
}

pub fn print_encoded(out: &EncodedOutput<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out, false),
        OutputFormat::Pretty => {
            println!(
                "record={} size={} reserved={} framed={}",
                out.record, out.size, out.reserved, out.framed
            );
            if let Some(hex) = &out.hex {
                println!("{hex}");
            }
            if let Some(path) = &out.out {
                println!("written to {path}");
            }
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["RECORD", "SIZE", "RESERVED", "FRAMED", "OUTPUT"]);
            table.add_row(vec![
                out.record.to_string(),
                out.size.to_string(),
                out.reserved.to_string(),
                out.framed.to_string(),
                out.hex
                    .clone()
                    .or_else(|| out.out.clone())
                    .unwrap_or_default(),
            ]);
            println!("{table}");
        }
    }
}

pub fn print_decoded(record: &str, value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(value, false),
        OutputFormat::Pretty => print_json(value, true),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            flatten(record, value, &mut table);
            println!("{table}");
        }
    }
}

fn flatten(path: &str, value: &Value, table: &mut Table) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&format!("{path}.{key}"), child, table);
            }
        }
        Value::String(text) => {
            table.add_row(vec![path.to_string(), text.clone()]);
        }
        other => {
            table.add_row(vec![path.to_string(), other.to_string()]);
        }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", rendered.unwrap_or_else(|_| "{}".to_string()));
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flatten_nests_with_dots() {
        let mut table = Table::new();
        flatten(
            "bid",
            &json!({ "amount": { "amount_minor": 5, "currency": 840 }, "placed_at": 1 }),
            &mut table,
        );
        assert_eq!(table.row_iter().count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("bid.amount.amount_minor"));
        assert!(rendered.contains("bid.placed_at"));
    }

    #[test]
    fn encoded_output_omits_absent_fields() {
        let out = EncodedOutput {
            record: "money",
            size: 10,
            reserved: 0,
            framed: false,
            hex: Some("00".into()),
            out: None,
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["hex"], "00");
        assert!(json.get("out").is_none());
    }
}
