use anyhow::Result;
use comfy_table::Table;

use shelter_cli::pipeline::run_pipeline;
use shelter_cli::types::{RunConfig, RunResult};
use shelter_transform::taxonomy_listing;

use crate::cli::RunArgs;
use crate::summary::{apply_table_style, header_cell};

pub fn run_taxonomies() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Taxonomy"),
        header_cell("Match"),
        header_cell("Terms"),
        header_cell("Labels"),
    ]);
    apply_table_style(&mut table);
    for summary in taxonomy_listing() {
        table.add_row(vec![
            summary.name.to_string(),
            format!("{:?}", summary.match_kind).to_lowercase(),
            summary.term_count.to_string(),
            summary.labels.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run(args: &RunArgs) -> Result<RunResult> {
    let config = RunConfig {
        intake: args.intake.clone(),
        outcome: args.outcome.clone(),
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };
    run_pipeline(&config)
}
