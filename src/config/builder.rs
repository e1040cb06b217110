use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::data_model::{DatasetInfo, FeatureType, Features, FieldSpec};
use crate::error::{DatasetError, Result};

pub const DATASET_NAME: &str = "mqp";

pub const CITATION: &str = r#"@article{DBLP:journals/biodb/LiSJSWLDMWL16,
  author    = {Krallinger, M., Rabal, O., Lourenço, A.},
  title     = {Effective Transfer Learning for Identifying Similar Questions: Matching User Questions to COVID-19 FAQs},
  journal   = {KDD '20: Proceedings of the 26th ACM SIGKDD International Conference on Knowledge Discovery & Data Mining},
  volume    = {3458–3465},
  year      = {2020},
  url       = {https://github.com/curai/medical-question-pair-dataset},
  doi       = {},
  biburl    = {},
  bibsource = {}
}
"#;

pub const DESCRIPTION: &str = r#"Medical Question Pairs dataset by McCreery et al (2020) contains pairs of medical questions and paraphrased versions of 
the question prepared by medical professional. Paraphrased versions were labelled as similar (syntactically dissimilar 
but contextually similar ) or dissimilar (syntactically may look similar but contextually dissimilar). Labels 1: similar, 0: dissimilar
"#;

pub const HOMEPAGE: &str = "https://biocreative.bioinformatics.udel.edu/tasks/biocreative-vi/track-5/";

pub const LICENSE: &str = "";

pub const SOURCE_URL: &str =
    "https://raw.githubusercontent.com/curai/medical-question-pair-dataset/master/mqp.csv";
pub const BIGBIO_URL: &str =
    "https://raw.githubusercontent.com/curai/medical-question-pair-dataset/master/mqp.csv";

pub const SOURCE_VERSION: &str = "";
pub const BIGBIO_VERSION: &str = "1.0.0";

pub const DEFAULT_CONFIG_NAME: &str = "source";

/// Which output schema (and resource) a dataset instance produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    #[default]
    Source,
    Bigbio,
}

impl Configuration {
    pub const ALL: [Configuration; 2] = [Configuration::Source, Configuration::Bigbio];

    pub fn name(&self) -> &'static str {
        match self {
            Configuration::Source => "source",
            Configuration::Bigbio => "bigbio",
        }
    }

    /// Built-in locator of the CSV backing this configuration.
    pub fn default_locator(&self) -> &'static str {
        match self {
            Configuration::Source => SOURCE_URL,
            Configuration::Bigbio => BIGBIO_URL,
        }
    }

    pub fn builder_config(&self) -> &'static BuilderConfig {
        match self {
            Configuration::Source => &BUILDER_CONFIGS[0],
            Configuration::Bigbio => &BUILDER_CONFIGS[1],
        }
    }

    /// Ordered output fields for this configuration.
    pub fn features(&self) -> Features {
        let pair_fields = [
            FieldSpec::new("document_id", FeatureType::String),
            FieldSpec::new("text_1", FeatureType::String),
            FieldSpec::new("text_2", FeatureType::String),
            FieldSpec::new("label", FeatureType::String),
        ];
        match self {
            Configuration::Source => Features::new(pair_fields.to_vec()),
            Configuration::Bigbio => {
                let mut fields = vec![FieldSpec::new("id", FeatureType::Int64)];
                fields.extend(pair_fields);
                Features::new(fields)
            }
        }
    }

    pub fn info(&self) -> DatasetInfo {
        let builder = self.builder_config();
        DatasetInfo {
            config_name: builder.name,
            version: builder.version,
            description: DESCRIPTION,
            homepage: HOMEPAGE,
            license: LICENSE,
            citation: CITATION,
            features: self.features(),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Configuration {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "source" => Ok(Configuration::Source),
            "bigbio" => Ok(Configuration::Bigbio),
            other => Err(DatasetError::UnknownConfiguration(other.to_string())),
        }
    }
}

/// Name, version and description of a built-in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderConfig {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

pub static BUILDER_CONFIGS: [BuilderConfig; 2] = [
    BuilderConfig {
        name: "source",
        version: SOURCE_VERSION,
        description: "Source schema",
    },
    BuilderConfig {
        name: "bigbio",
        version: BIGBIO_VERSION,
        description: "BigScience Biomedical schema",
    },
];
