use std::path::PathBuf;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "server-manager", version, about, long_about = None)]
pub struct Args {
    /// Path to the server folder, overrides server-manager.toml
    #[arg(long, short = 's', global = true)]
    pub server: Option<PathBuf>,

    /// Show debug logs
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub subcommand: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show whether the server runs in online or offline mode
    GetOnlineMode,

    /// Turn online mode on or off
    SetOnlineMode(SetOnlineModeArgs),

    /// List every player with data in the world
    #[command(alias = "ls")]
    List,

    /// Show what the world stores about each player
    Data(DataArgs),

    /// Print every player data file found
    DebugFiles,

    /// Make the whitelist match the server's online mode
    Whitelist,

    /// Move all player data into a backup folder
    ResetPlayers(ResetPlayersArgs),

    /// Rename a player's files to a new uuid
    Rekey(RekeyArgs),

    /// Print shell completions for specified shell
    Completion {
        #[clap(value_enum)]
        shell: Shell
    }
}

#[derive(clap::Args)]
pub struct SetOnlineModeArgs {
    /// true or false
    #[arg(name = "online-mode", action = clap::ArgAction::Set)]
    pub online_mode: bool
}

#[derive(clap::Args)]
pub struct DataArgs {
    /// Only show this player, name or uuid
    pub player: Option<String>
}

#[derive(clap::Args)]
pub struct ResetPlayersArgs {
    /// Don't ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool
}

#[derive(clap::Args)]
pub struct RekeyArgs {
    /// Name or current uuid of the player
    pub player: String,

    /// Defaults to the player's uuid for the server's current online mode
    pub uuid: Option<String>
}
