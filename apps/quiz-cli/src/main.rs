use clap::Parser;
use quiz_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = quiz_cli::run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
