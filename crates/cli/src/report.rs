use anyhow::{Context, Result};
use eventdoc_extractor::EventRecord;
use serde::Serialize;
use std::path::Path;

const COLUMNS: [&str; 5] = ["EventName", "EventId", "EventLevel", "Description", "Resolution"];
const EXTENDED_COLUMNS: [&str; 6] = ["Keywords", "Task", "Opcode", "Channel", "Message", "Version"];

#[derive(Serialize)]
struct Row<'a> {
    name: &'a str,
    id: &'a str,
    level: &'a str,
    description: &'a str,
    resolution: &'a str,
}

#[derive(Serialize)]
struct ExtendedRow<'a> {
    name: &'a str,
    id: &'a str,
    level: &'a str,
    description: &'a str,
    resolution: &'a str,
    keywords: Option<&'a str>,
    task: Option<&'a str>,
    opcode: Option<&'a str>,
    channel: Option<&'a str>,
    message: Option<&'a str>,
    version: Option<&'a str>,
}

/// Write one CSV row per record; the header row is written even when there
/// are no records
pub fn write_csv(path: &Path, records: &[EventRecord], extended: bool) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    write_records(&mut writer, records, extended)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn write_records<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    records: &[EventRecord],
    extended: bool,
) -> Result<()> {
    if extended {
        writer.write_record(COLUMNS.iter().chain(EXTENDED_COLUMNS.iter()))?;
    } else {
        writer.write_record(COLUMNS)?;
    }

    for record in records {
        if extended {
            let tags = &record.tags;
            writer.serialize(ExtendedRow {
                name: &record.name,
                id: &record.id,
                level: &record.level,
                description: &record.description,
                resolution: &record.resolution,
                keywords: tags.keywords.as_deref(),
                task: tags.task.as_deref(),
                opcode: tags.opcode.as_deref(),
                channel: tags.channel.as_deref(),
                message: tags.message.as_deref(),
                version: tags.version.as_deref(),
            })?;
        } else {
            writer.serialize(Row {
                name: &record.name,
                id: &record.id,
                level: &record.level,
                description: &record.description,
                resolution: &record.resolution,
            })?;
        }
    }
    Ok(())
}
