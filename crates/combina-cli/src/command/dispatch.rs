use std::path::PathBuf;

use crate::{
    dispatch::{Dispatcher, STATUS_OK},
    store::FsBlobStore,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DispatchArg {
    /// Request body file; reads stdin when omitted or `-`
    request_file: Option<PathBuf>,
    /// Root directory of the blob store
    #[arg(long, env = "COMBINA_STORE_DIR", default_value = "store")]
    store_dir: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DispatchArg) -> anyhow::Result<()> {
    let DispatchArg {
        request_file,
        store_dir,
        output,
    } = arg;

    let body = util::read_text_input("request", request_file.as_deref())?;
    log::info!("Using blob store at {}", store_dir.display());
    let mut dispatcher = Dispatcher::new(FsBlobStore::new(store_dir));
    let response = dispatcher.handle_body(&body);
    if response.status == STATUS_OK {
        log::info!("Request succeeded");
    }
    Output::save_json(&response, output.as_deref())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[clap(flatten)]
        arg: DispatchArg,
    }

    #[test]
    fn test_arguments() {
        let cli = Cli::try_parse_from(["t", "request.json", "--store-dir", "/tmp/blobs"]).unwrap();
        assert_eq!(cli.arg.request_file, Some(PathBuf::from("request.json")));
        assert_eq!(cli.arg.store_dir, PathBuf::from("/tmp/blobs"));
        assert!(cli.arg.output.is_none());
    }
}
