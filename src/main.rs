use anyhow::Result;
use arrow2csv::convert::convert_archive_to_csv;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Stream-framed archive produced by the dataset export.
const SOURCE_PATH: &str = "./Dataset.hf/train/data-00000-of-00001.arrow";
/// Flattened CSV rendition of the archive.
const DEST_PATH: &str = "./DataBase.csv";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) convert the archive ──────────────────────────────────────
    convert_archive_to_csv(SOURCE_PATH, DEST_PATH)?;

    info!("all done");
    Ok(())
}
