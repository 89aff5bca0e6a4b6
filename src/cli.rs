use clap::{Arg, ArgAction, Command};

const AFTER_HELP: &str = "\
Examples:
    bvdl                 Normal mode (checks node and ffmpeg first)
    bvdl --skip-check    Skip the environment check
    bvdl --debug         Show tool detection details

Downloaded audio lands in the current directory and can be moved into a
folder under ../music.";

pub fn build_cli() -> Command {
    Command::new("bvdl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Batch download Bilibili videos as audio with bv2mp3")
        .after_help(AFTER_HELP)
        .arg(
            Arg::new("skip-check")
                .short('s')
                .long("skip-check")
                .help("Skip the environment check and start right away")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Print tool detection details and enable debug logging")
                .action(ArgAction::SetTrue),
        )
}
