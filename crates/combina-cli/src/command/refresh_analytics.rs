use std::path::PathBuf;

use combina_analysis::filter::ALL;

use crate::{
    operation,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RefreshAnalyticsArg {
    /// Stored record collection (JSON array of records)
    records_file: PathBuf,
    /// Members to analyze, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    key_members: Vec<String>,
    /// Filter expression (`all` or `key=value&...`); may be repeated
    #[arg(long = "filter", default_value = ALL)]
    filters: Vec<String>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RefreshAnalyticsArg) -> anyhow::Result<()> {
    let RefreshAnalyticsArg {
        records_file,
        key_members,
        filters,
        output,
    } = arg;

    log::info!("Loading records from {}...", records_file.display());
    let records = util::read_records_file(records_file)?;
    log::info!("Loaded {} records", records.len());

    let report = operation::refresh_analytics(&records, key_members, filters)?;
    Output::save_json(&report, output.as_deref())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[clap(flatten)]
        arg: RefreshAnalyticsArg,
    }

    #[test]
    fn test_defaults_to_all_filter() {
        let cli = Cli::try_parse_from(["t", "records.json", "--key-members", "5,12"]).unwrap();
        assert_eq!(cli.arg.key_members, ["5", "12"]);
        assert_eq!(cli.arg.filters, [ALL]);
    }

    #[test]
    fn test_repeated_filters_keep_order() {
        let cli = Cli::try_parse_from([
            "t",
            "records.json",
            "--key-members",
            "5",
            "--filter",
            "all",
            "--filter",
            "level_key=2-2-1&prime_count=2",
        ])
        .unwrap();
        assert_eq!(cli.arg.filters, ["all", "level_key=2-2-1&prime_count=2"]);
    }

    #[test]
    fn test_key_members_are_required() {
        assert!(Cli::try_parse_from(["t", "records.json"]).is_err());
    }
}
