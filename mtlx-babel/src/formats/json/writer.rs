//! JSON text output with configurable indentation and separators
//!
//! serde_json's own formatters are either compact or pretty with fixed separators. This one
//! lets both separators and the indent width vary:
//!
//! - with an indent, every item starts on a new line, indented one step per nesting level, and
//!   the item separator ends the previous line;
//! - without one, everything stays on a single line;
//! - empty objects and arrays are always written as `{}` / `[]`.

use super::options::JsonWriteOptions;
use crate::error::FormatError;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

pub struct SeparatorFormatter<'a> {
    indent: Option<Vec<u8>>,
    item_separator: &'a [u8],
    key_separator: &'a [u8],
    current_indent: usize,
    has_value: bool,
}

impl<'a> SeparatorFormatter<'a> {
    pub fn new(options: &'a JsonWriteOptions) -> Self {
        SeparatorFormatter {
            indent: options.indent.map(|width| vec![b' '; width]),
            item_separator: options.separators.item.as_bytes(),
            key_separator: options.separators.key.as_bytes(),
            current_indent: 0,
            has_value: false,
        }
    }

    fn newline_indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(indent) = &self.indent {
            writer.write_all(b"\n")?;
            for _ in 0..self.current_indent {
                writer.write_all(indent)?;
            }
        }
        Ok(())
    }

    fn begin_item<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if !first {
            writer.write_all(self.item_separator)?;
        }
        self.newline_indent(writer)
    }

    fn open<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(bracket)
    }

    fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.current_indent -= 1;
        if self.has_value {
            self.newline_indent(writer)?;
        }
        writer.write_all(bracket)
    }
}

impl Formatter for SeparatorFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.begin_item(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.begin_item(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.key_separator)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

/// Serialize a JSON value to text following the indentation and separators in `options`.
pub fn to_string(value: &Value, options: &JsonWriteOptions) -> Result<String, FormatError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, SeparatorFormatter::new(options));
    value
        .serialize(&mut serializer)
        .map_err(|err| FormatError::SerializationError(err.to_string()))?;
    String::from_utf8(buffer).map_err(|err| FormatError::SerializationError(err.to_string()))
}
