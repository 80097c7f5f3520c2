#![warn(clippy::all)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gw2chatlinks::config::{read_configuration, Configuration, OutputFormat};
use gw2chatlinks::{decode_chat_link, encode_chat_link, ChatLink};
use std::fs::File;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

#[derive(Parser)]
#[clap(version = "0.0.1", about = "Decodes and encodes chat links")]
struct Opts {
    #[clap(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decodes the given chat links.
    Decode {
        #[clap(name = "LINK", required = true)]
        links: Vec<String>,
    },
    /// Encodes the chat link described in the given YAML file.
    Encode {
        #[clap(name = "FILE", parse(from_os_str))]
        file: PathBuf,
    },
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("Error while executing program: {:#}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let fmt_layer = Layer::default().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::from_default_env();
    let subscriber = Registry::default().with(filter_layer).with(fmt_layer);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Can't set up logging: {}", e);
    }
}

fn run() -> Result<()> {
    let opts: Opts = Opts::parse();
    let config = match &opts.config {
        Some(path) => read_configuration(path)
            .with_context(|| format!("Can't read configuration file {}", path.display()))?,
        None => Configuration::default(),
    };

    match opts.command {
        Command::Decode { links } => {
            info!("Decoding {} chat links", links.len());
            for link in links {
                let decoded = decode_chat_link(&link).with_context(|| format!("Can't decode chat link {}", link))?;
                print_link(&config, &link, &decoded)?;
            }
        }
        Command::Encode { file } => {
            let f = File::open(&file).with_context(|| format!("Can't open file {}", file.display()))?;
            let link: ChatLink = serde_yaml::from_reader(f)
                .with_context(|| format!("Can't parse chat link from {}", file.display()))?;
            debug!("Encoding {:?}", link);
            println!("{}", encode_chat_link(&link).context("Can't encode chat link")?);
        }
    }
    Ok(())
}

fn print_link(config: &Configuration, text: &str, link: &ChatLink) -> Result<()> {
    match config.output.format {
        OutputFormat::Debug => println!("{} => {:?}", text, link),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(link)?),
    }
    if config.output.hex_dump {
        match link.to_bytes() {
            Ok(data) => println!("payload: {}", hex::encode(data)),
            Err(e) => debug!("Can't dump payload of {}: {}", text, e),
        }
    }
    Ok(())
}
