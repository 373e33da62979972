use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plsearch::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage the Spotify session
    Auth(AuthOptions),

    /// List playlists and search their tracks
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage the Spotify session")]
pub struct AuthOptions {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthSubcommand {
    /// Authorize with the Spotify API (OAuth PKCE flow)
    Login,

    /// Clear the stored session
    Logout,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "List playlists and search their tracks")]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// List your own and collaborative playlists
    List,

    /// Fuzzy-search the tracks of one playlist
    Search(SearchOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOpts {
    /// Playlist ID as shown by `plsearch playlist list`
    pub playlist: usize,

    /// Search term (matched against track names and artists)
    pub term: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => match opt.command {
            AuthSubcommand::Login => cli::login().await,
            AuthSubcommand::Logout => cli::logout().await,
        },

        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::List => cli::list_playlists().await,
            PlaylistSubcommand::Search(s) => cli::search_playlist(s.playlist, s.term).await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
