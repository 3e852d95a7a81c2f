use anyhow::{Context, Result};
use tracing::{info, info_span};

use sales_cli::logging::redact_value;
use sales_cli::render::{catalog_table, orphan_table, outcome_line, result_table, stage_table};
use sales_model::PipelineConfig;
use sales_normalize::run_pipeline;
use sales_query::{
    QueryExecutor, QueryKind, ResultSet, SqliteExecutor, adhoc, build, customer_names,
    preview_all, preview_table,
};
use sales_store::{Store, orphan_counts};

use crate::cli::{NormalizeArgs, OutputFormatArg, PreviewArgs, QueryArgs, SqlArgs, StoreArgs};

pub fn run_normalize(args: &NormalizeArgs) -> Result<()> {
    let config =
        PipelineConfig::new(&args.source, &args.store.store).with_rebuild(!args.no_rebuild);
    let summary = run_pipeline(&config)
        .with_context(|| format!("normalize {}", args.source.display()))?;

    match args.format {
        OutputFormatArg::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormatArg::Table => {
            println!("{}", outcome_line(&summary));
            if !summary.stages.is_empty() {
                println!("{}", stage_table(&summary));
            }
        }
    }
    Ok(())
}

pub fn run_query(args: &QueryArgs) -> Result<()> {
    let kind: QueryKind = args.name.parse()?;
    let store = Store::new(&args.store.store);
    let span = info_span!("query_command", query = %kind);
    let _guard = span.enter();
    if let Some(customer) = &args.customer {
        info!(customer = redact_value(customer), "customer-scoped query");
    }

    let query = build(kind, &store, args.customer.as_deref())?;
    if args.show_sql {
        println!("{}", query.sql());
        if !query.params().is_empty() {
            println!("-- params: {:?}", query.params());
        }
        println!();
    }
    let result = SqliteExecutor::new(store)
        .execute(&query)
        .with_context(|| format!("run query {kind}"))?;
    if args.format == OutputFormatArg::Table {
        println!("{}", kind.title());
    }
    print_result(&result, args.format)
}

pub fn run_queries() {
    println!("{}", catalog_table());
}

pub fn run_customers(args: &StoreArgs) -> Result<()> {
    let names = customer_names(&Store::new(&args.store)).context("list customers")?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let executor = SqliteExecutor::new(Store::new(&args.store.store));
    let queries = match args.table {
        Some(table) => vec![preview_table(table, args.limit)],
        None => preview_all(args.limit),
    };
    for query in queries {
        let result = executor
            .execute(&query)
            .with_context(|| format!("preview {}", query.label()))?;
        println!("{}", query.label());
        println!("{}", result_table(&result));
    }
    Ok(())
}

pub fn run_sql(args: &SqlArgs) -> Result<()> {
    let executor = SqliteExecutor::new(Store::new(&args.store.store));
    let result = executor.execute(&adhoc(&args.sql)).context("run sql")?;
    print_result(&result, args.format)
}

/// Prints orphan counts. Returns `false` if any foreign key has orphans.
pub fn run_check(args: &StoreArgs) -> Result<bool> {
    let connection = Store::new(&args.store)
        .open_read_only()
        .context("open store")?;
    let counts = orphan_counts(&connection).context("count orphans")?;
    println!("{}", orphan_table(&counts));
    Ok(counts.iter().all(|count| count.orphans == 0))
}

fn print_result(result: &ResultSet, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormatArg::Table => println!("{}", result_table(result)),
    }
    Ok(())
}
