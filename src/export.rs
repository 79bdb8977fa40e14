use crate::aoi::Aoi;
use crate::catalog::{DailyMosaic, ExportRequest, ImageCatalog};
use crate::collections::CollectionSet;
use crate::date_range::DateRange;
use crate::error::ConfigError;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Export one mosaicked, clipped raster per collection per day.
///
/// Days are walked in order and all collections for a day complete before
/// the next day begins, so a partially finished run can be assessed by
/// listing `out_dir`. Every export is awaited to completion before the next
/// starts; the first failure aborts the remaining iterations.
///
/// Returns the number of export calls issued. A call that finds its output
/// file already on disk still counts; the catalog skips the transfer.
pub async fn run(
    catalog: &impl ImageCatalog,
    collections: &CollectionSet,
    range: DateRange,
    aoi: &Aoi,
    out_dir: &Path,
    scale: u32,
    crs: Option<&str>,
) -> Result<u64> {
    // Every manifest entry must check out before any directory is created
    // or any export issued. All-or-nothing, not per-item.
    for (name, id) in collections.iter() {
        if !catalog.validate_collection(id).await? {
            return Err(ConfigError::UnknownCollection {
                name: name.to_string(),
                id: id.as_str().to_string(),
            }
            .into());
        }
    }

    let mut exported = 0_u64;
    for day in range {
        let date_dir = out_dir.join(day.to_string());
        fs::create_dir_all(&date_dir)?;

        for (name, id) in collections.iter() {
            let mosaic = DailyMosaic::compose(id, day, aoi);
            let dest = date_dir.join(format!("{}{}.tif", name, day));

            println!("Exporting {} for {}", name, day);
            catalog.export(&mosaic, &ExportRequest::new(&dest, scale, crs)).await?;
            exported += 1;
        }
    }

    Ok(exported)
}
