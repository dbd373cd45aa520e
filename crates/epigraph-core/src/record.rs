//! Typed records for each entity kind ingested into the graph.
//!
//! Each record mirrors one CSV row. Optional fields are `Option` so that an
//! absent column (or empty cell) never turns into a vertex property; the
//! graph store rejects explicit nulls for missing values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar property value as stored on a graph vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

/// Vertex properties keyed by property name.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

fn insert(map: &mut PropertyMap, key: &str, value: impl Into<PropertyValue>) {
    map.insert(key.to_string(), value.into());
}

fn insert_opt<V: Into<PropertyValue>>(map: &mut PropertyMap, key: &str, value: Option<V>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

/// One CpG methylation site row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpgRecord {
    #[serde(rename = "CpG")]
    pub name: String,
    #[serde(rename = "Internal ID")]
    pub internal_id: String,
    #[serde(rename = "Occurrences", default, deserialize_with = "csv::invalid_option")]
    pub occurrences: Option<i64>,
    #[serde(rename = "Direction", default)]
    pub direction: Option<String>,
    #[serde(rename = "M-Value Baseline", default, deserialize_with = "csv::invalid_option")]
    pub m_value_baseline: Option<f64>,
    #[serde(rename = "Beta Baseline", default, deserialize_with = "csv::invalid_option")]
    pub beta_baseline: Option<f64>,
}

impl CpgRecord {
    pub const LABEL: &'static str = "cpg";
    pub const NAME: &'static str = "name";
    pub const INTERNAL_ID: &'static str = "internal ID";
    pub const OCCURRENCES: &'static str = "occurrences";
    pub const DIRECTION: &'static str = "direction";
    pub const M_VALUE: &'static str = "m-value baseline";
    pub const BETA: &'static str = "beta baseline";

    /// Vertex properties for this row. Absent optional values are omitted.
    pub fn properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        insert(&mut map, Self::NAME, self.name.clone());
        insert(&mut map, Self::INTERNAL_ID, self.internal_id.clone());
        insert_opt(&mut map, Self::OCCURRENCES, self.occurrences);
        insert_opt(&mut map, Self::DIRECTION, self.direction.clone());
        insert_opt(&mut map, Self::M_VALUE, self.m_value_baseline);
        insert_opt(&mut map, Self::BETA, self.beta_baseline);
        map
    }
}

/// One health factor row. Factors are deduplicated by name at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorRecord {
    #[serde(rename = "Association")]
    pub name: String,
    #[serde(rename = "Type")]
    pub factor_type: String,
}

impl FactorRecord {
    pub const LABEL: &'static str = "factor";
    pub const NAME: &'static str = "name";
    pub const TYPE: &'static str = "type";

    pub fn properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        insert(&mut map, Self::NAME, self.name.clone());
        insert(&mut map, Self::TYPE, self.factor_type.clone());
        map
    }
}

/// One microbe row, keyed by taxon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicrobeRecord {
    #[serde(rename = "Taxon")]
    pub taxon: String,
    #[serde(rename = "Rank")]
    pub rank: String,
    #[serde(rename = "Occurrences", default, deserialize_with = "csv::invalid_option")]
    pub occurrences: Option<i64>,
    #[serde(rename = "Direction", default)]
    pub direction: Option<String>,
    #[serde(rename = "Mean Abundance", default, deserialize_with = "csv::invalid_option")]
    pub mean_abundance: Option<f64>,
    #[serde(rename = "Correlation Coefficient", default, deserialize_with = "csv::invalid_option")]
    pub correlation_coefficient: Option<f64>,
    #[serde(rename = "p Value", default, deserialize_with = "csv::invalid_option")]
    pub p_value: Option<f64>,
    #[serde(rename = "q Value", default, deserialize_with = "csv::invalid_option")]
    pub q_value: Option<f64>,
}

impl MicrobeRecord {
    pub const LABEL: &'static str = "microbe";
    pub const TAXON: &'static str = "taxon";
    pub const RANK: &'static str = "rank";
    pub const OCCURRENCES: &'static str = "occurrences";
    pub const DIRECTION: &'static str = "direction";
    pub const MEAN_ABUNDANCE: &'static str = "mean abundance";
    pub const CORRELATION_COEFFICIENT: &'static str = "correlation coefficient";
    pub const P_VALUE: &'static str = "p value";
    pub const Q_VALUE: &'static str = "q value";

    pub fn properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        insert(&mut map, Self::TAXON, self.taxon.clone());
        insert(&mut map, Self::RANK, self.rank.clone());
        insert_opt(&mut map, Self::OCCURRENCES, self.occurrences);
        insert_opt(&mut map, Self::DIRECTION, self.direction.clone());
        insert_opt(&mut map, Self::MEAN_ABUNDANCE, self.mean_abundance);
        insert_opt(&mut map, Self::CORRELATION_COEFFICIENT, self.correlation_coefficient);
        insert_opt(&mut map, Self::P_VALUE, self.p_value);
        insert_opt(&mut map, Self::Q_VALUE, self.q_value);
        map
    }
}

/// One disease row from the disease ontology export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    #[serde(rename = "label")]
    pub name: String,
    #[serde(rename = "id")]
    pub ontology_id: String,
}

impl DiseaseRecord {
    pub const LABEL: &'static str = "disease";
    pub const NAME: &'static str = "name";
    pub const ONTOLOGY_ID: &'static str = "disease ontology id";

    pub fn properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        insert(&mut map, Self::NAME, self.name.clone());
        insert(&mut map, Self::ONTOLOGY_ID, self.ontology_id.clone());
        map
    }
}

/// One literature article row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "DOI")]
    pub doi: String,
    #[serde(rename = "Abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(rename = "Summary", default)]
    pub summary: Option<String>,
}

impl ArticleRecord {
    pub const LABEL: &'static str = "article";
    pub const DOI: &'static str = "doi";
    pub const ABSTRACT: &'static str = "abstract";
    pub const SUMMARY: &'static str = "summary";
    /// Transient property carrying the upload row index; deleted from the
    /// graph once the id mapping has been read back.
    pub const SQL_ID: &'static str = "_sql_id";

    pub fn properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        insert(&mut map, Self::DOI, self.doi.clone());
        insert_opt(&mut map, Self::ABSTRACT, self.abstract_text.clone());
        insert_opt(&mut map, Self::SUMMARY, self.summary.clone());
        map
    }
}

/// One microbe-to-disease association row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicrobeDiseaseLink {
    #[serde(rename = "Taxon")]
    pub taxon: String,
    #[serde(rename = "DOID")]
    pub doid: String,
}

impl MicrobeDiseaseLink {
    pub const EDGE_LABEL: &'static str = "associated with";
}
