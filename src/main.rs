use colored::Colorize;

use bvdl::cli::build_cli;
use bvdl::commands;

fn main() {
    let matches = build_cli().get_matches();

    bvdl::init_logging(matches.get_flag("debug"));

    if let Err(e) = commands::download(&matches) {
        eprintln!("{}", format!("Error: {:#}", e).red().bold());
        std::process::exit(1);
    }
}
