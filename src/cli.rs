use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "anilist-sync")]
#[command(about = "Sync watch progress reported by a media server to your AniList list")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a watched episode on AniList
    Sync {
        /// The title of the series
        #[arg(long)]
        title: String,

        /// The season number watched
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        season: u32,

        /// The episode number watched
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        episode: u32,
    },

    /// Obtain an access token through AniList's authorization-code flow
    Login,

    /// Verify that the stored access token works
    Check,
}
