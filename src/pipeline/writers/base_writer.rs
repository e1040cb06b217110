use crate::data_model::Example;
use crate::error::Result;

/// Trait for writing batches of generated examples to an output sink (e.g. file).
pub trait BaseWriter {
    /// Write a batch of examples to the sink.
    fn write_batch(&mut self, examples: &[Example]) -> Result<()>;

    /// Finalize and close the output writer.
    fn close(self) -> Result<()>;
}
