//! Writing clustered shoots as JSON or JSON Lines.
//!
//! JSON emits the whole shoot sequence as one array, the shape the gallery
//! page consumes. JSONL emits one shoot per line for streaming consumers.

use serde::Serialize;
use std::io::{self, Write};

use crate::types::PhotoShoot;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A single JSON array
    #[default]
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Serializes shoot sequences to a writer.
pub struct ShootWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    shoots_written: usize,
    images_written: usize,
}

impl<W: Write> ShootWriter<W> {
    /// Create a new shoot writer.
    ///
    /// `pretty` only affects the JSON format; JSONL lines are always compact.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            shoots_written: 0,
            images_written: 0,
        }
    }

    /// Write a full shoot sequence.
    pub fn write_shoots(&mut self, shoots: &[PhotoShoot<'_>]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                self.write_value(shoots, self.pretty)?;
            }
            OutputFormat::JsonLines => {
                for shoot in shoots {
                    self.write_value(shoot, false)?;
                }
            }
        }
        self.shoots_written += shoots.len();
        self.images_written += shoots.iter().map(PhotoShoot::len).sum::<usize>();
        Ok(())
    }

    fn write_value<T: Serialize + ?Sized>(&mut self, value: &T, pretty: bool) -> io::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut self.writer, value).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, value).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }

    /// Number of shoots written so far.
    pub fn shoots_written(&self) -> usize {
        self.shoots_written
    }

    /// Number of images written so far, across all shoots.
    pub fn images_written(&self) -> usize {
        self.images_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
