//! Graph files: JSON adjacency documents and polars-backed edge tables.

use anyhow::{bail, Context, Result};
use genreg::api::{girth, AdjacencyStore, Params};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

/// Output layout, picked from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `{ "n", "k", "g", "girth", "adjacency": { "0": [..], .. } }`
    Json,
    /// Edge list with columns `u,v`.
    Csv,
    Parquet,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            other => bail!("unsupported output extension {other:?} (json, csv, parquet)"),
        }
    }
}

/// Serializable form of a finished graph: vertex → sorted neighbors.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphDoc {
    pub n: usize,
    pub k: usize,
    pub g: usize,
    pub girth: Option<usize>,
    pub adjacency: BTreeMap<usize, Vec<usize>>,
}

impl GraphDoc {
    pub fn new(params: Params, graph: &AdjacencyStore) -> Self {
        Self {
            n: params.n,
            k: params.k,
            g: params.g,
            girth: girth(graph),
            adjacency: graph.to_neighbor_lists().into_iter().enumerate().collect(),
        }
    }
}

pub fn write_graph(path: &Path, params: Params, graph: &AdjacencyStore) -> Result<Format> {
    let format = Format::from_path(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    match format {
        Format::Json => {
            let doc = GraphDoc::new(params, graph);
            fs::write(path, serde_json::to_vec_pretty(&doc)?)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        Format::Csv | Format::Parquet => {
            let mut df = edge_frame(graph)?;
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            if format == Format::Csv {
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut df)?;
            } else {
                ParquetWriter::new(&mut file).finish(&mut df)?;
            }
        }
    }
    Ok(format)
}

fn edge_frame(graph: &AdjacencyStore) -> PolarsResult<DataFrame> {
    let (us, vs): (Vec<u64>, Vec<u64>) = graph
        .edges()
        .into_iter()
        .map(|(u, v)| (u as u64, v as u64))
        .unzip();
    df!("u" => us, "v" => vs)
}

/// Read a seed edge list (CSV with integer columns `u` and `v`).
pub fn read_edge_csv(path: &Path) -> Result<Vec<(usize, usize)>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .select([
            col("u").cast(DataType::Int64),
            col("v").cast(DataType::Int64),
        ])
        .collect()
        .with_context(|| format!("reading edge list {}", path.display()))?;
    tracing::info!(rows = df.height(), path = %path.display(), "seed_edges");
    let us = df.column("u")?.i64()?;
    let vs = df.column("v")?.i64()?;
    us.into_iter()
        .zip(vs.into_iter())
        .enumerate()
        .map(|(row, pair)| match pair {
            (Some(u), Some(v)) if u >= 0 && v >= 0 => Ok((u as usize, v as usize)),
            _ => bail!("row {row}: endpoints must be non-negative integers"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use genreg::api::construct;
    use tempfile::tempdir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("b.csv")).unwrap(), Format::Csv);
        assert_eq!(
            Format::from_path(Path::new("b.parquet")).unwrap(),
            Format::Parquet
        );
        assert!(Format::from_path(Path::new("b.txt")).is_err());
        assert!(Format::from_path(Path::new("b")).is_err());
    }

    #[test]
    fn json_doc_lists_sorted_neighbors() {
        let c = construct(4, 3, 3).unwrap();
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/k4.json");
        write_graph(&out, Params::new(4, 3, 3), &c.graph).unwrap();
        let doc: GraphDoc = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc.girth, Some(3));
        assert_eq!(doc.adjacency[&0], vec![1, 2, 3]);
        assert_eq!(doc.adjacency.len(), 4);
    }

    #[test]
    fn csv_edge_list_reads_back_as_seed() {
        let p = Params::new(6, 2, 6);
        let c = construct(p.n, p.k, p.g).unwrap();
        let dir = tempdir().unwrap();
        let out = dir.path().join("hexagon.csv");
        assert_eq!(write_graph(&out, p, &c.graph).unwrap(), Format::Csv);
        let edges = read_edge_csv(&out).unwrap();
        assert_eq!(edges, c.graph.edges());
        let reseeded = AdjacencyStore::from_edges(p.n, p.k, &edges).unwrap();
        assert!(reseeded.is_regular());
    }

    #[test]
    fn negative_endpoints_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "u,v\n0,1\n-1,2\n").unwrap();
        let err = read_edge_csv(&path).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
