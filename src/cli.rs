use crate::date_range::parse_date;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Batch-download daily mosaicked, AOI-clipped rasters from a remote image
/// catalog.
///
/// One GeoTIFF per collection per day is written under
/// `<out_dir>/<YYYY-MM-DD>/<name><YYYY-MM-DD>.tif`. Long date ranges produce
/// a proportionally large directory tree; nothing truncates the range.
#[derive(Parser, Debug)]
#[command(name = "geedaily", version, about)]
pub struct Cli {
    /// Collections manifest: json object of short name -> catalog id
    #[arg(long = "collections", default_value = "./collections.json")]
    pub collections: PathBuf,

    /// Output directory
    #[arg(long = "out_dir", default_value = "./")]
    pub out_dir: PathBuf,

    /// First date to download
    #[arg(long = "start_date", value_parser = parse_date, default_value = "2020-12-25")]
    pub start_date: NaiveDate,

    /// Last date to download (inclusive)
    #[arg(long = "end_date", value_parser = parse_date, default_value = "2020-12-30")]
    pub end_date: NaiveDate,

    /// Area-of-interest file: feature collection, first geometry is used
    #[arg(long = "aoi_path", default_value = "./geometry.json")]
    pub aoi_path: PathBuf,

    /// Desired scale in ground units per pixel
    #[arg(long = "scale", default_value_t = 30)]
    pub scale: u32,

    /// Desired coordinate reference system; service default when omitted
    #[arg(long = "crs")]
    pub crs: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["geedaily"]).unwrap();
        assert_eq!(cli.collections, PathBuf::from("./collections.json"));
        assert_eq!(cli.out_dir, PathBuf::from("./"));
        assert_eq!(cli.start_date, date(2020, 12, 25));
        assert_eq!(cli.end_date, date(2020, 12, 30));
        assert_eq!(cli.aoi_path, PathBuf::from("./geometry.json"));
        assert_eq!(cli.scale, 30);
        assert_eq!(cli.crs, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "geedaily",
            "--collections", "/data/ics.json",
            "--out_dir", "/data/out",
            "--start_date", "Jan 1 2021",
            "--end_date", "2021/01/31",
            "--aoi_path", "/data/aoi.json",
            "--scale", "10",
            "--crs", "EPSG:32633",
        ])
        .unwrap();
        assert_eq!(cli.start_date, date(2021, 1, 1));
        assert_eq!(cli.end_date, date(2021, 1, 31));
        assert_eq!(cli.scale, 10);
        assert_eq!(cli.crs.as_deref(), Some("EPSG:32633"));
    }

    #[test]
    fn test_rejects_bad_date() {
        let result = Cli::try_parse_from(["geedaily", "--start_date", "not-a-date"]);
        assert!(result.is_err());
    }
}
