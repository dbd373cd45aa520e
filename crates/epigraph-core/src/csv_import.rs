//! CSV upload parsing.
//!
//! Turns uploaded CSV bytes into typed records. Header names follow the
//! published templates (`CpG`, `Internal ID`, `Occurrences`, ...). Optional
//! columns may be absent entirely or left empty per row; both parse to `None`.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::EpigraphResult;
use crate::record::{
    ArticleRecord, CpgRecord, DiseaseRecord, FactorRecord, MicrobeDiseaseLink, MicrobeRecord,
};

/// Parse CSV bytes into a list of records of one entity kind.
pub fn parse_records<T: DeserializeOwned>(bytes: &[u8]) -> EpigraphResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let records = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;

    debug!(rows = records.len(), "Parsed CSV upload");
    Ok(records)
}

pub fn parse_cpgs(bytes: &[u8]) -> EpigraphResult<Vec<CpgRecord>> {
    parse_records(bytes)
}

pub fn parse_factors(bytes: &[u8]) -> EpigraphResult<Vec<FactorRecord>> {
    parse_records(bytes)
}

pub fn parse_microbes(bytes: &[u8]) -> EpigraphResult<Vec<MicrobeRecord>> {
    parse_records(bytes)
}

pub fn parse_diseases(bytes: &[u8]) -> EpigraphResult<Vec<DiseaseRecord>> {
    parse_records(bytes)
}

pub fn parse_articles(bytes: &[u8]) -> EpigraphResult<Vec<ArticleRecord>> {
    parse_records(bytes)
}

pub fn parse_microbe_disease_links(bytes: &[u8]) -> EpigraphResult<Vec<MicrobeDiseaseLink>> {
    parse_records(bytes)
}
