use crate::cmd::StatsArgs;
use crate::utils::{print_json, read_document};
use anyhow::{Context, Result};
use bgr_markup::count_stats;
use bgr_types::{StatFamily, TagStats};
use std::collections::BTreeMap;
use std::fs::OpenOptions;

pub async fn run_stats_command(args: StatsArgs) -> Result<()> {
    let mut all_stats = vec![];
    for file in args.files.iter() {
        let text = read_document(file.as_str()).await?;
        all_stats.push((file.as_str(), count_stats(text.as_str())));
    }

    if args.json {
        let map = all_stats
            .iter()
            .map(|(file, stats)| (*file, stats))
            .collect::<BTreeMap<_, _>>();
        print_json(&map)?;
    } else {
        for (file, stats) in all_stats.iter() {
            println!("{file}:");
            for (family, count) in stats.iter().filter(|(_, count)| *count > 0) {
                println!("  {}: {count}", family.label());
            }
            if stats.total() == 0 {
                println!("  no tags");
            }
        }
    }

    if let Some(csv_path) = args.csv {
        write_csv(csv_path.as_str(), all_stats.as_slice())?;
        println!("csv data saved in {csv_path}");
    }

    Ok(())
}

/// Write one row per file, one column per family.
fn write_csv(csv_path: &str, all_stats: &[(&str, TagStats)]) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(csv_path)
        .with_context(|| format!("failed to open csv output file {csv_path}"))?;
    let mut builder = csv::WriterBuilder::new()
        .double_quote(true)
        .from_writer(file);

    let header = std::iter::once("file")
        .chain(StatFamily::ALL.iter().map(|x| x.label()))
        .collect::<Vec<_>>();
    builder
        .write_record(header.as_slice())
        .with_context(|| format!("failed to write csv header to {csv_path}"))?;

    for (file, stats) in all_stats {
        let record = std::iter::once(file.to_string())
            .chain(stats.iter().map(|(_, count)| count.to_string()))
            .collect::<Vec<_>>();
        builder
            .write_record(record.as_slice())
            .with_context(|| format!("failed to write csv record \"{record:?}\" to {csv_path}"))?
    }
    builder
        .flush()
        .with_context(|| format!("failed to flush csv output file {csv_path}"))?;
    Ok(())
}
