use clap::{ArgAction, Args, Parser};

use crate::commands::Hours;

/// 🕒 When does an author commit? Hour-of-day histogram, weekdays vs weekends
#[derive(Parser)]
#[command(
    name = "gitclock",
    version,
    about = "🕒 Hour-of-day commit histogram for one author, weekdays vs weekends",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub hours: Hours,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// 🔊 More log output on stderr (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// 🤫 Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
