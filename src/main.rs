use antifraud::{
    classifier::Classifier,
    data::{open_sink, open_source, GraphIndex},
    task::{process_stream, MalformedPolicy, StreamConfig},
};
use clap::{
    crate_authors, crate_description, crate_name, crate_version, App, AppSettings, Arg,
    ArgMatches, SubCommand,
};
use derive_more::Display;
use log::info;
use std::{
    error::Error,
    fs::File,
    io::{BufReader, BufWriter},
    time::Instant,
};

#[derive(Debug, Display, PartialEq)]
enum Err {
    InvalidArgument(String),
}

impl std::error::Error for Err {}

fn load_index(matches: &ArgMatches) -> Result<GraphIndex, Box<dyn Error>> {
    let time_now = Instant::now();
    let batch = open_source(matches.value_of("BATCH").unwrap())?;
    let index = GraphIndex::from_reader(BufReader::new(batch))?;
    info!(
        "index built in {}ms: {}",
        (Instant::now() - time_now).as_millis(),
        index.info()
    );
    Ok(index)
}

fn create_output(path: &str) -> antifraud::Result<BufWriter<File>> {
    Ok(BufWriter::new(open_sink(path)?))
}

fn parse_usize(matches: &ArgMatches, name: &str) -> Result<Option<usize>, Err> {
    matches
        .value_of(name)
        .map(|x| {
            x.parse::<usize>()
                .map_err(|_| Err::InvalidArgument(format!("--{}: {}", name, x)))
        })
        .transpose()
}

fn handle_run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    if let Some(jobs) = parse_usize(matches, "jobs")? {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()?;
    }
    let mut config = StreamConfig::new();
    if let Some(chunk_size) = parse_usize(matches, "chunk-size")? {
        config = config.chunk_size(chunk_size);
    }
    if matches.is_present("skip-malformed") {
        config = config.malformed(MalformedPolicy::Skip);
    }
    let index = load_index(matches)?;
    let stream = open_source(matches.value_of("STREAM").unwrap())?;
    let mut sinks = [
        create_output(matches.value_of("OUTPUT1").unwrap())?,
        create_output(matches.value_of("OUTPUT2").unwrap())?,
        create_output(matches.value_of("OUTPUT3").unwrap())?,
    ];
    process_stream(&index, BufReader::new(stream), &mut sinks, config)?;
    Ok(())
}

fn handle_info(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    println!("{}", load_index(matches)?.info());
    Ok(())
}

fn handle_query(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let index = load_index(matches)?;
    let (id1, id2) = (
        matches.value_of("ID1").unwrap(),
        matches.value_of("ID2").unwrap(),
    );
    for trust in Classifier::new(&index).classify(id1, id2).trust().iter() {
        println!("{}", trust);
    }
    Ok(())
}

fn batch_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("BATCH")
        .required(true)
        .help("Batch payments used to build the graph")
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("run")
                .about("Screens a payment stream into three verdict files")
                .arg(batch_arg())
                .arg(Arg::with_name("STREAM").required(true))
                .arg(Arg::with_name("OUTPUT1").required(true))
                .arg(Arg::with_name("OUTPUT2").required(true))
                .arg(Arg::with_name("OUTPUT3").required(true))
                .arg(
                    Arg::with_name("skip-malformed")
                        .long("skip-malformed")
                        .help("Drop stream rows without two ids instead of aborting"),
                )
                .arg(
                    Arg::with_name("chunk-size")
                        .long("chunk-size")
                        .takes_value(true)
                        .help("Payments classified per parallel batch"),
                )
                .arg(
                    Arg::with_name("jobs")
                        .short("j")
                        .long("jobs")
                        .takes_value(true)
                        .help("Worker threads"),
                ),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Prints statistics of the batch graph")
                .arg(batch_arg()),
        )
        .subcommand(
            SubCommand::with_name("query")
                .about("Prints the three verdicts for one pair of ids")
                .arg(batch_arg())
                .arg(Arg::with_name("ID1").required(true))
                .arg(Arg::with_name("ID2").required(true)),
        )
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("run") {
        handle_run(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("info") {
        handle_info(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("query") {
        handle_query(matches)?;
    }
    Ok(())
}
