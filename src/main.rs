mod args;
mod assigner;
mod cmd;
mod composition;
mod error;
mod input;
mod output;
mod report;

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run() -> error::Result<()> {
    let config = args::Config::new()?;
    init_logging(config.verbose);
    config.cmd.run(&config)
}

fn main() {
    // The message goes to stdout, the exit status tells callers it failed
    if let Err(e) = run() {
        println!("{}", e);
        std::process::exit(1);
    }
}
