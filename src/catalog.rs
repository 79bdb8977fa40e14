use crate::aoi::Aoi;
use crate::collections::CollectionId;
use anyhow::Result;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod earthengine;
pub use earthengine::EarthEngine;

/// Contract consumed from the remote catalog. Filtering, mosaicking,
/// clipping, reprojection, and encoding all happen service-side; this trait
/// only validates identifiers and moves finished rasters to disk.
pub trait ImageCatalog {
    /// Whether the service recognizes the collection identifier.
    async fn validate_collection(self: &Self, id: &CollectionId) -> Result<bool>;

    /// Evaluate the composed image and write the resulting raster to
    /// `request.dest`. Blocks (is awaited) until the service has generated
    /// and transferred the file.
    async fn export(self: &Self, image: &DailyMosaic, request: &ExportRequest<'_>) -> Result<()>;
}

/// Server-side expression for one day of one collection: images captured in
/// `[day, day + 1)` that intersect the AOI, mosaicked with the service's
/// default last-on-top ordering, clipped exactly to the AOI boundary.
///
/// Composing is local and cheap; nothing is evaluated until export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMosaic {
    collection: CollectionId,
    #[serde(rename = "startTime")]
    start: NaiveDate,
    #[serde(rename = "endTime")]
    end: NaiveDate,
    region: serde_json::Value,
    composite: &'static str,
    #[serde(rename = "clipToRegion")]
    clip: bool,
}

impl DailyMosaic {
    pub fn compose(id: &CollectionId, day: NaiveDate, aoi: &Aoi) -> Self {
        // `end` is exclusive on the service side, so a one-day window is
        // [day, day + 1). The add can only fail at the end of representable
        // time; saturating keeps composition infallible.
        let end = day.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
        Self {
            collection: id.clone(),
            start: day,
            end,
            region: aoi.geometry().clone(),
            composite: "mosaic",
            clip: true,
        }
    }

    pub fn collection(self: &Self) -> &CollectionId {
        &self.collection
    }

    pub fn window(self: &Self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }
}

/// Where and how one composed raster should be exported. Constructed per
/// (day, collection) iteration and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest<'a> {
    pub dest: PathBuf,
    /// Linear ground resolution in distance units per pixel.
    pub scale: u32,
    /// Target coordinate reference system; `None` leaves the choice to the
    /// service default.
    pub crs: Option<&'a str>,
}

impl<'a> ExportRequest<'a> {
    pub fn new(dest: impl AsRef<Path>, scale: u32, crs: Option<&'a str>) -> Self {
        Self { dest: dest.as_ref().to_path_buf(), scale, crs }
    }
}
