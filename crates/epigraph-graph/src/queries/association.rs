//! Factor association queries.
//!
//! Two aggregate queries over the cpg/factor subgraph: CpGs associated with
//! ALL selected factors (set intersection over per-factor neighbor sets) and
//! CpGs associated with ANY of them (one existential-filter traversal).
//! Both produce `ProcessedRow`s for report assembly. Result row order is
//! not guaranteed.

use std::collections::HashSet;

use tracing::debug;

use epigraph_core::record::{CpgRecord, FactorRecord};
use epigraph_core::report::{processed_row, ProcessedRow};
use epigraph_core::{EpigraphError, EpigraphResult, PropertyMap, PropertyValue};

use crate::store::{Direction, GraphStore};

/// (name, internal ID) of one CpG observed next to a factor.
type CpgRef = (String, String);

/// CpGs associated with every factor in `factors` (AND semantics).
///
/// A factor name with no matching vertex contributes an empty set, so any
/// unknown factor empties the result. An empty `factors` list is rejected:
/// the intersection over zero sets is undefined.
pub async fn cpgs_with_all_factors<S: GraphStore>(
    store: &S,
    factors: &[String],
) -> EpigraphResult<Vec<ProcessedRow>> {
    if factors.is_empty() {
        return Err(EpigraphError::EmptyFactorSet);
    }

    let mut per_factor: Vec<HashSet<CpgRef>> = Vec::with_capacity(factors.len());
    for factor in factors {
        let value = PropertyValue::Text(factor.clone());
        let neighbors = store
            .neighbors(
                FactorRecord::LABEL,
                FactorRecord::NAME,
                &value,
                Direction::Both,
                Some(CpgRecord::LABEL),
            )
            .await?;

        let refs: HashSet<CpgRef> = neighbors.iter().filter_map(cpg_ref).collect();
        debug!(factor = %factor, cpgs = refs.len(), "Collected CpGs for factor");
        per_factor.push(refs);
    }

    // Intersect CpG names across all requested factors.
    let mut common_names: HashSet<String> =
        per_factor[0].iter().map(|(name, _)| name.clone()).collect();
    for refs in &per_factor[1..] {
        let names: HashSet<&String> = refs.iter().map(|(name, _)| name).collect();
        common_names.retain(|name| names.contains(name));
    }
    debug!(common = common_names.len(), "Intersected CpG name sets");

    // Re-expand names to (name, internal ID) pairs.
    let common: HashSet<CpgRef> = per_factor
        .iter()
        .flatten()
        .filter(|(name, _)| common_names.contains(name))
        .cloned()
        .collect();

    process_cpgs(store, &common).await
}

/// CpGs associated with at least one factor in `factors` (OR semantics).
///
/// Unknown factor names simply contribute nothing. The Association column
/// reports the first connected factor found in the requested set, even when
/// a CpG matches several of them.
pub async fn cpgs_with_any_factor<S: GraphStore>(
    store: &S,
    factors: &[String],
) -> EpigraphResult<Vec<ProcessedRow>> {
    let matched = store
        .vertices_with_neighbor(
            CpgRecord::LABEL,
            Direction::Out,
            FactorRecord::LABEL,
            FactorRecord::NAME,
            factors,
        )
        .await?;
    debug!(cpgs = matched.len(), "CpGs matching any selected factor");

    let mut rows = Vec::with_capacity(matched.len());
    for properties in matched {
        let Some(internal_id) = properties.get(CpgRecord::INTERNAL_ID).cloned() else {
            continue;
        };

        let association = store
            .neighbors(
                CpgRecord::LABEL,
                CpgRecord::INTERNAL_ID,
                &internal_id,
                Direction::Out,
                Some(FactorRecord::LABEL),
            )
            .await?
            .iter()
            .filter_map(|n| n.get(FactorRecord::NAME).map(|v| v.to_string()))
            .find(|name| factors.contains(name));

        rows.push(report_row(&properties, association));
    }
    Ok(rows)
}

/// Re-fetch each surviving CpG's property map and first connected factor
/// name, and shape the report rows. Shared tail of the AND path.
async fn process_cpgs<S: GraphStore>(
    store: &S,
    cpgs: &HashSet<CpgRef>,
) -> EpigraphResult<Vec<ProcessedRow>> {
    let mut rows = Vec::with_capacity(cpgs.len());
    for (_, internal_id) in cpgs {
        let value = PropertyValue::Text(internal_id.clone());
        let properties = store
            .vertices_by_property(CpgRecord::LABEL, CpgRecord::INTERNAL_ID, &value)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        let association = store
            .neighbors(
                CpgRecord::LABEL,
                CpgRecord::INTERNAL_ID,
                &value,
                Direction::Out,
                Some(FactorRecord::LABEL),
            )
            .await?
            .iter()
            .filter_map(|n| n.get(FactorRecord::NAME).map(|v| v.to_string()))
            .next();

        rows.push(report_row(&properties, association));
    }
    Ok(rows)
}

fn cpg_ref(properties: &PropertyMap) -> Option<CpgRef> {
    let name = properties.get(CpgRecord::NAME)?;
    let internal_id = properties.get(CpgRecord::INTERNAL_ID)?;
    Some((name.to_string(), internal_id.to_string()))
}

fn report_row(properties: &PropertyMap, association: Option<String>) -> ProcessedRow {
    let cell = |key: &str| properties.get(key).map(|v| v.to_string());
    processed_row([
        ("CpG ID", cell(CpgRecord::NAME)),
        ("Association", association),
        ("Occurrences", cell(CpgRecord::OCCURRENCES)),
        ("Direction", cell(CpgRecord::DIRECTION)),
        ("Beta Baseline", cell(CpgRecord::BETA)),
        ("M-Value Baseline", cell(CpgRecord::M_VALUE)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{ingest_cpgs, ingest_factors};
    use crate::memstore::MemStore;
    use crate::store::EdgeSpec;

    fn cpg(name: &str, internal_id: &str) -> CpgRecord {
        CpgRecord {
            name: name.to_string(),
            internal_id: internal_id.to_string(),
            occurrences: Some(3),
            direction: Some("hyper".to_string()),
            m_value_baseline: Some(1.1),
            beta_baseline: Some(0.4),
        }
    }

    fn factor(name: &str) -> FactorRecord {
        FactorRecord {
            name: name.to_string(),
            factor_type: "lifestyle".to_string(),
        }
    }

    /// cg001 linked to Smoking and Obesity; cg002 linked to Smoking only.
    async fn seed(store: &MemStore) {
        let cpgs = ingest_cpgs(store, &[cpg("cg001", "CPG:1"), cpg("cg002", "CPG:2")])
            .await
            .unwrap();
        let factors = ingest_factors(store, &[factor("Smoking"), factor("Obesity")])
            .await
            .unwrap();

        let edge = |from: &String, to: &String| EdgeSpec {
            from: from.clone(),
            to: to.clone(),
            label: "associated with".to_string(),
        };
        store
            .create_edges(&[
                edge(&cpgs["CPG:1"], &factors[&0]),
                edge(&cpgs["CPG:1"], &factors[&1]),
                edge(&cpgs["CPG:2"], &factors[&0]),
            ])
            .await
            .unwrap();
    }

    fn cpg_ids(rows: &[ProcessedRow]) -> HashSet<String> {
        rows.iter()
            .filter_map(|r| r["CpG ID"].clone())
            .collect()
    }

    #[tokio::test]
    async fn and_query_returns_the_intersection() {
        let store = MemStore::new();
        seed(&store).await;

        let rows = cpgs_with_all_factors(
            &store,
            &["Smoking".to_string(), "Obesity".to_string()],
        )
        .await
        .unwrap();

        assert_eq!(cpg_ids(&rows), HashSet::from(["cg001".to_string()]));
    }

    #[tokio::test]
    async fn or_query_returns_the_union() {
        let store = MemStore::new();
        seed(&store).await;

        let rows = cpgs_with_any_factor(
            &store,
            &["Smoking".to_string(), "Obesity".to_string()],
        )
        .await
        .unwrap();

        assert_eq!(
            cpg_ids(&rows),
            HashSet::from(["cg001".to_string(), "cg002".to_string()])
        );
    }

    #[tokio::test]
    async fn removing_a_factor_can_only_grow_the_and_result() {
        let store = MemStore::new();
        seed(&store).await;

        let both = cpgs_with_all_factors(
            &store,
            &["Smoking".to_string(), "Obesity".to_string()],
        )
        .await
        .unwrap();
        let smoking_only =
            cpgs_with_all_factors(&store, &["Smoking".to_string()]).await.unwrap();

        assert!(cpg_ids(&both).is_subset(&cpg_ids(&smoking_only)));
        assert_eq!(
            cpg_ids(&smoking_only),
            HashSet::from(["cg001".to_string(), "cg002".to_string()])
        );
    }

    #[tokio::test]
    async fn adding_a_factor_can_only_grow_the_or_result() {
        let store = MemStore::new();
        seed(&store).await;

        let one = cpgs_with_any_factor(&store, &["Obesity".to_string()]).await.unwrap();
        let two = cpgs_with_any_factor(
            &store,
            &["Obesity".to_string(), "Smoking".to_string()],
        )
        .await
        .unwrap();

        assert!(cpg_ids(&one).is_subset(&cpg_ids(&two)));
    }

    #[tokio::test]
    async fn unknown_factor_empties_the_and_result() {
        let store = MemStore::new();
        seed(&store).await;

        let rows = cpgs_with_all_factors(
            &store,
            &["Smoking".to_string(), "NoSuchFactor".to_string()],
        )
        .await
        .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn unknown_factor_contributes_nothing_to_the_or_result() {
        let store = MemStore::new();
        seed(&store).await;

        let rows = cpgs_with_any_factor(
            &store,
            &["NoSuchFactor".to_string(), "Obesity".to_string()],
        )
        .await
        .unwrap();

        assert_eq!(cpg_ids(&rows), HashSet::from(["cg001".to_string()]));
    }

    #[tokio::test]
    async fn empty_factor_set_is_rejected_by_the_and_query() {
        let store = MemStore::new();
        seed(&store).await;

        let err = cpgs_with_all_factors(&store, &[]).await.unwrap_err();
        assert!(matches!(err, EpigraphError::EmptyFactorSet));
    }

    #[tokio::test]
    async fn empty_factor_set_yields_an_empty_or_result() {
        let store = MemStore::new();
        seed(&store).await;

        let rows = cpgs_with_any_factor(&store, &[]).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn rows_carry_the_fixed_report_columns() {
        let store = MemStore::new();
        seed(&store).await;

        let rows = cpgs_with_all_factors(&store, &["Obesity".to_string()]).await.unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row["CpG ID"].as_deref(), Some("cg001"));
        assert_eq!(row["Occurrences"].as_deref(), Some("3"));
        assert_eq!(row["Direction"].as_deref(), Some("hyper"));
        assert_eq!(row["Beta Baseline"].as_deref(), Some("0.4"));
        assert_eq!(row["M-Value Baseline"].as_deref(), Some("1.1"));
        // Association is one of the CpG's connected factors.
        let association = row["Association"].clone().unwrap();
        assert!(["Smoking", "Obesity"].contains(&association.as_str()));
    }

    #[tokio::test]
    async fn cpg_without_optional_properties_yields_empty_cells_not_missing_keys() {
        let store = MemStore::new();
        let bare = CpgRecord {
            name: "cg009".to_string(),
            internal_id: "CPG:9".to_string(),
            occurrences: None,
            direction: None,
            m_value_baseline: None,
            beta_baseline: None,
        };
        let cpgs = ingest_cpgs(&store, &[bare]).await.unwrap();
        let factors = ingest_factors(&store, &[factor("Smoking")]).await.unwrap();
        store
            .create_edges(&[EdgeSpec {
                from: cpgs["CPG:9"].clone(),
                to: factors[&0].clone(),
                label: "associated with".to_string(),
            }])
            .await
            .unwrap();

        let rows = cpgs_with_any_factor(&store, &["Smoking".to_string()]).await.unwrap();
        let row = &rows[0];
        // Keys exist for report assembly; values are absent.
        assert!(row.contains_key("Direction"));
        assert_eq!(row["Direction"], None);
        assert_eq!(row["Occurrences"], None);
    }
}
