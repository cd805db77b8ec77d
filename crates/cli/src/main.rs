use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use genreg::api::{
    assess, check_structure, girth, is_k_regular, AdjacencyStore, Params, Search, SearchCfg,
};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

#[derive(Parser)]
#[command(name = "genreg")]
#[command(about = "Build k-regular graphs of girth >= g from cycle passes")]
struct Cmd {
    /// Log search progress and backtracks at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Search for a graph; print it as JSON or write it to --out (json, csv, parquet)
    Construct {
        #[arg(long)]
        n: usize,
        #[arg(long)]
        k: usize,
        #[arg(long)]
        g: usize,
        /// CSV edge list (columns u,v) of edges the result must contain
        #[arg(long)]
        seed_edges: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Re-check regularity, symmetry and girth of the result
        #[arg(long)]
        verify: bool,
        #[arg(long, default_value_t = SearchCfg::default().progress_every)]
        progress_every: u64,
    },
    /// Print the pre-check verdict for (n, k, g)
    Check {
        #[arg(long)]
        n: usize,
        #[arg(long)]
        k: usize,
        #[arg(long)]
        g: usize,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Construct {
            n,
            k,
            g,
            seed_edges,
            out,
            verify,
            progress_every,
        } => construct(
            Params::new(n, k, g),
            seed_edges,
            out,
            verify,
            SearchCfg { progress_every },
        ),
        Action::Check { n, k, g } => check(Params::new(n, k, g)),
        Action::Report => report(),
    }
}

fn construct(
    params: Params,
    seed_edges: Option<PathBuf>,
    out: Option<PathBuf>,
    verify: bool,
    cfg: SearchCfg,
) -> Result<()> {
    let Params { n, k, g } = params;
    tracing::info!(n, k, g, seed = ?seed_edges, out = ?out, "construct");
    let mut search = Search::new(params).cfg(cfg);
    if let Some(path) = &seed_edges {
        let edges = io::read_edge_csv(path)?;
        let seed = AdjacencyStore::from_edges(n, k, &edges)
            .with_context(|| format!("building seed graph from {}", path.display()))?;
        search = search.seed(seed);
    }
    let result = search
        .run()
        .with_context(|| format!("no graph for n={n} k={k} g={g}"))?;

    if verify {
        let graph = &result.graph;
        check_structure(graph).context("result is not a simple symmetric graph")?;
        ensure!(is_k_regular(graph, k), "result is not {k}-regular");
        if let Some(found) = girth(graph) {
            ensure!(found >= g, "result has girth {found} < {g}");
        }
        tracing::info!(girth = ?girth(graph), "verified");
    }

    match out {
        Some(path) => {
            let format = io::write_graph(&path, params, &result.graph)?;
            let payload = provenance::Payload::new(params)
                .with_stats(&result.stats)
                .note(assess(params).to_string())
                .note(format!("format: {format:?}"));
            let sidecar = provenance::write_sidecar(&path, &payload)?;
            tracing::info!(out = %path.display(), sidecar = %sidecar.display(), "written");
        }
        None => {
            let doc = io::GraphDoc::new(params, &result.graph);
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn check(params: Params) -> Result<()> {
    let verdict = assess(params);
    let obj = serde_json::json!({
        "n": params.n,
        "k": params.k,
        "g": params.g,
        "plausible": verdict.is_plausible(),
        "verdict": verdict.to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "genreg_version": genreg::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
