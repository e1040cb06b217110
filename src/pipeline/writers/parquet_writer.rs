use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Builder, RecordBatch, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::config::builder::Configuration;
use crate::data_model::{Example, FeatureType};
use crate::error::{DatasetError, Result};
use crate::pipeline::writers::BaseWriter;

/// Arrow schema mirroring the configuration's features, in the same order.
pub fn create_schema(config: Configuration) -> SchemaRef {
    let fields: Vec<Field> = config
        .features()
        .fields()
        .iter()
        .map(|spec| {
            let data_type = match spec.dtype {
                FeatureType::String => DataType::Utf8,
                FeatureType::Int64 => DataType::Int64,
            };
            Field::new(spec.name, data_type, false)
        })
        .collect();
    Arc::new(Schema::new(fields))
}

/// Writes examples of a single configuration to a Parquet file.
pub struct ParquetWriter {
    config: Configuration,
    schema: SchemaRef,
    writer: Option<ArrowWriter<File>>,
}

impl ParquetWriter {
    pub fn new<P: AsRef<Path>>(path: P, config: Configuration) -> Result<Self> {
        let schema = create_schema(config);
        let file = File::create(path)?;
        let props = WriterProperties::builder().build();
        let writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        Ok(ParquetWriter {
            config,
            schema,
            writer: Some(writer),
        })
    }
}

impl BaseWriter for ParquetWriter {
    fn write_batch(&mut self, examples: &[Example]) -> Result<()> {
        if examples.is_empty() {
            return Ok(());
        }

        let mut id_builder = Int64Builder::with_capacity(examples.len());
        let mut document_id_builder = StringBuilder::new();
        let mut text_1_builder = StringBuilder::new();
        let mut text_2_builder = StringBuilder::new();
        let mut label_builder = StringBuilder::new();

        for example in examples {
            if example.configuration() != self.config {
                return Err(DatasetError::ConfigError(format!(
                    "Cannot write a '{}' example to a '{}' Parquet file",
                    example.configuration(),
                    self.config
                )));
            }
            if let Some(id) = example.id() {
                let id = i64::try_from(id).map_err(|_| {
                    DatasetError::ConfigError(format!("Example id {} does not fit in Int64", id))
                })?;
                id_builder.append_value(id);
            }
            document_id_builder.append_value(example.document_id());
            text_1_builder.append_value(example.text_1());
            text_2_builder.append_value(example.text_2());
            label_builder.append_value(example.label());
        }

        let mut columns: Vec<ArrayRef> = Vec::with_capacity(self.schema.fields().len());
        if self.config == Configuration::Bigbio {
            columns.push(Arc::new(id_builder.finish()));
        }
        columns.push(Arc::new(document_id_builder.finish()));
        columns.push(Arc::new(text_1_builder.finish()));
        columns.push(Arc::new(text_2_builder.finish()));
        columns.push(Arc::new(label_builder.finish()));

        let batch = RecordBatch::try_new(self.schema.clone(), columns)?;

        if let Some(writer) = self.writer.as_mut() {
            writer.write(&batch)?;
        }

        Ok(())
    }

    fn close(mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.close()?;
        }
        Ok(())
    }
}
