use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use vkaudio::{cli, config, error};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the link for getting a VK access token
    Auth(AuthOptions),

    /// Store the access token copied from the browser
    Token(TokenOptions),

    /// Fetch playlists and their tracks
    Playlists(PlaylistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Only print the link, don't open a browser
    #[clap(long)]
    pub no_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOptions {
    /// Token or the whole address from the browser; shows the stored token when omitted
    pub value: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Fetch playlists and their tracks")]
pub struct PlaylistsOptions {
    /// Print every track instead of a summary table
    #[clap(long, conflicts_with = "json")]
    pub tracks: bool,

    /// Print the library as JSON
    #[clap(long)]
    pub json: bool,

    /// Only show playlists whose title contains this text
    #[clap(long)]
    pub search: Option<String>,
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
        Command::Auth(opt) => cli::auth(!opt.no_browser),
        Command::Token(opt) => cli::token(opt.value).await,
        Command::Playlists(opt) => {
            let view = if opt.json {
                cli::PlaylistsView::Json
            } else if opt.tracks {
                cli::PlaylistsView::Tracks
            } else {
                cli::PlaylistsView::Table
            };
            cli::playlists(view, opt.search).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
