use anyhow::Result;
use clap::Parser;
use geedaily::aoi::Aoi;
use geedaily::catalog::EarthEngine;
use geedaily::cli::Cli;
use geedaily::collections::CollectionSet;
use geedaily::date_range::DateRange;
use geedaily::export;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let aoi = Aoi::read(&cli.aoi_path)?;
    let collections = CollectionSet::read(&cli.collections)?;
    let range = DateRange::new(cli.start_date, cli.end_date);

    // One authenticated session for the whole run, torn down at exit.
    let catalog = EarthEngine::from_env()?;

    let exported = export::run(
        &catalog,
        &collections,
        range,
        &aoi,
        &cli.out_dir,
        cli.scale,
        cli.crs.as_deref(),
    )
    .await?;

    println!("Completed {} exports to {}", exported, cli.out_dir.display());
    Ok(())
}
