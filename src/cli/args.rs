//! Command-line argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::collection::AttributeMap;
use crate::config::{DOCKER_CONFIG_ENV, SOCKET_ENV};
use crate::logging::Verbosity;

#[derive(Parser, Debug)]
#[command(name = "uor-client")]
#[command(about = "Retrieve and publish collection content through a UOR collection manager")]
#[command(version)]
pub struct Args {
    #[arg(
        long = "verbose",
        short = 'v',
        global = true,
        help = "Enable debug output"
    )]
    pub verbose: bool,

    #[arg(
        long = "quiet",
        short = 'q',
        global = true,
        conflicts_with = "verbose",
        help = "Only report warnings and errors"
    )]
    pub quiet: bool,

    /// Location of the collection manager's Unix domain socket, without a unix:// prefix
    #[arg(long = "socket", env = SOCKET_ENV, global = true, value_name = "PATH")]
    pub socket: Option<String>,

    /// Directory containing the Docker config.json to read registry credentials from
    #[arg(long = "docker-config", env = DOCKER_CONFIG_ENV, global = true, value_name = "DIR")]
    pub docker_config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pull content from a collection into a workspace
    Pull {
        /// Registry path of the source collection (e.g. localhost:5000/image:latest)
        reference: String,
        /// Output directory to store collection content in
        workspace: PathBuf,
        /// JSON object of key/value pairs used to filter content, e.g. '{"images": true}'
        #[arg(long = "attributes", value_name = "JSON", value_parser = AttributeMap::from_json)]
        attributes: Option<AttributeMap>,
    },
    /// Push content from a workspace to a collection
    Push {
        /// Input directory containing collection content
        workspace: PathBuf,
        /// Registry path of the destination collection (e.g. localhost:5000/image:latest)
        reference: String,
        /// JSON file mapping file patterns to attributes, replacing the built-in table
        #[arg(long = "collection-config", value_name = "FILE")]
        collection_config: Option<PathBuf>,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
