use clap::{Parser, Subcommand};
use lpdb::{
    config::SimulationConfig,
    hmm::{HiddenMarkovModel, Viterbi},
    simulator::run_simulation,
};
use log::info;
use ndarray::array;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate false acceptance/rejection rates of the plate catalogue
    Simulate {
        /// JSON file with the simulation configuration.
        /// If not specified, 8 symbols, length 10 and 2% confusion is used.
        #[clap(short, long)]
        config: Option<std::path::PathBuf>,
        /// Seed of the random plates (overrides the seed of the config)
        #[clap(short, long)]
        seed: Option<u64>,
    },
    /// Decode a fixed observation sequence with a two state HMM
    Demo,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);
    match &opts.command {
        Commands::Simulate { config, seed } => {
            info!("loading configuration..");
            let config = match config {
                Some(path) => SimulationConfig::from_json_file(path)?,
                None => SimulationConfig::default(),
            };
            let seed = seed.unwrap_or(config.seed);
            info!("running simulation (seed={})..", seed);
            let report = run_simulation(&config, seed)?;
            let stdout = std::io::stdout();
            report.to_tsv_writer(stdout.lock())?;
            println!("# {}", report);
        }
        Commands::Demo => {
            let hmm = HiddenMarkovModel::new(
                array![[0.5, 0.5], [0.5, 0.5]],
                array![[0.3, 0.2, 0.5], [0.1, 0.1, 0.8]],
                array![0.5, 0.5],
            )?;
            println!("{}", hmm);
            let viterbi = Viterbi::new(hmm);
            let observations = [0, 1, 2, 1, 2, 0];
            let r = viterbi.run(&observations)?;
            println!("observations={:?}", observations);
            println!("states={:?}", r.states);
            println!("p={}", r.best_path_prob());
        }
    }
    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
