//! Source map v3 documents
//!
//! The generated program ships with a standard source map naming the query file it came from.
//! `mappings` holds one group per generated line, separated by `;`. Each segment within a
//! group is comma separated and holds base64 VLQ deltas:
//!
//! 1. generated column, relative to the previous segment on the same line
//! 2. source index, relative to the previous mapped segment
//! 3. original line, relative to the previous mapped segment
//! 4. original column, relative to the previous mapped segment
//! 5. optional names index, relative to the previous named segment
//!
//! Segments with only the first field close the previous mapping without pointing anywhere.
//! Generated maps never use names; decoding reads past the fifth field and drops it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fragment::Mapping;
use super::vlq::{self, VlqError};
use crate::sqlfluent::ast::range::Position;

pub const SOURCE_MAP_VERSION: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceMapError {
    #[error("malformed mappings: {0}")]
    Vlq(#[from] VlqError),
    #[error("segment with {0} fields, expected 1, 4 or 5")]
    SegmentLength(usize),
    #[error("mapping points before the start of the file")]
    NegativePosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    pub file: String,
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Build the map for a generated `file` compiled from the single source `source_name`
    pub fn new(
        file: impl Into<String>,
        source_name: impl Into<String>,
        source_content: Option<&str>,
        mappings: &[Mapping],
    ) -> Self {
        Self {
            version: SOURCE_MAP_VERSION,
            file: file.into(),
            sources: vec![source_name.into()],
            sources_content: source_content.map(|content| vec![content.to_string()]),
            names: Vec::new(),
            mappings: encode_mappings(mappings),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn decoded_mappings(&self) -> Result<Vec<Mapping>, SourceMapError> {
        decode_mappings(&self.mappings)
    }
}

pub fn encode_mappings(mappings: &[Mapping]) -> String {
    let mut out = String::new();
    let mut line = 0;
    let mut previous_column = 0i64;
    let mut previous_original = Position::default();
    let mut first_on_line = true;

    for mapping in mappings {
        while line < mapping.generated.line {
            out.push(';');
            line += 1;
            previous_column = 0;
            first_on_line = true;
        }
        if !first_on_line {
            out.push(',');
        }
        first_on_line = false;

        let column = mapping.generated.column as i64;
        vlq::encode(column - previous_column, &mut out);
        previous_column = column;

        if let Some(original) = mapping.original {
            // Single source, the source index never moves
            vlq::encode(0, &mut out);
            vlq::encode(original.line as i64 - previous_original.line as i64, &mut out);
            vlq::encode(
                original.column as i64 - previous_original.column as i64,
                &mut out,
            );
            previous_original = original;
        }
    }

    out
}

fn to_index(value: i64) -> Result<usize, SourceMapError> {
    usize::try_from(value).map_err(|_| SourceMapError::NegativePosition)
}

pub fn decode_mappings(mappings: &str) -> Result<Vec<Mapping>, SourceMapError> {
    let mut decoded = Vec::new();
    let mut original_line = 0i64;
    let mut original_column = 0i64;

    for (line, group) in mappings.split(';').enumerate() {
        let mut column = 0i64;
        for segment in group.split(',').filter(|segment| !segment.is_empty()) {
            let mut chars = segment.chars().peekable();
            let mut fields = Vec::with_capacity(4);
            while chars.peek().is_some() {
                fields.push(vlq::decode(&mut chars)?);
            }

            column += fields[0];
            let original = match fields.len() {
                1 => None,
                4 | 5 => {
                    original_line += fields[2];
                    original_column += fields[3];
                    Some(Position::new(
                        to_index(original_line)?,
                        to_index(original_column)?,
                    ))
                }
                other => return Err(SourceMapError::SegmentLength(other)),
            };

            decoded.push(Mapping {
                generated: Position::new(line, to_index(column)?),
                original,
            });
        }
    }

    Ok(decoded)
}
