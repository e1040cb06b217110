use std::io::{BufWriter, Write};

use crate::data_model::Example;
use crate::error::Result;
use crate::pipeline::writers::BaseWriter;

/// Writes one JSON object per example, newline separated.
pub struct JsonLinesWriter<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        JsonLinesWriter {
            out: BufWriter::new(out),
        }
    }
}

impl<W: Write> BaseWriter for JsonLinesWriter<W> {
    fn write_batch(&mut self, examples: &[Example]) -> Result<()> {
        for example in examples {
            serde_json::to_writer(&mut self.out, example)?;
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
