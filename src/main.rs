mod cli;
mod commands;
mod error;
mod structs;
mod util;

use std::{io, process};

use clap::{CommandFactory, Parser};
use cli::{Args, Commands};
use console::style;
use env_logger::Env;
use structs::server::Server;

fn run(args: Args) -> error::Result<()> {
    if let Commands::Completion { shell } = args.subcommand {
        clap_complete::generate(shell, &mut Args::command(), "server-manager", &mut io::stdout());
        return Ok(());
    }

    let server = Server::open(args.server)?;

    match args.subcommand {
        Commands::GetOnlineMode => commands::online_mode::get_online_mode(&server),
        Commands::SetOnlineMode(args) => commands::online_mode::set_online_mode(server, args),
        Commands::List => commands::list::list(&server),
        Commands::Data(args) => commands::data::data(&server, args),
        Commands::DebugFiles => commands::debug_files::debug_files(&server),
        Commands::Whitelist => commands::whitelist::whitelist(&server),
        Commands::ResetPlayers(args) => commands::reset::reset_players(&server, args),
        Commands::Rekey(args) => commands::rekey::rekey(&server, args),
        Commands::Completion { .. } => unreachable!(),
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(err) = run(args) {
        eprintln!("{}", style(err).red());
        process::exit(1);
    }
}
