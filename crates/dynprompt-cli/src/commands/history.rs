//! History command

use clap::Args;
use dynprompt_core::DEFAULT_HISTORY_LIMIT;

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of entries to show, newest first
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub limit: usize,

    /// Print entries as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn execute(ctx: &Context, args: HistoryArgs) -> CommandResult {
    if args.json {
        let history = ctx.manager.history(args.limit)?;
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else {
        println!("{}", ctx.manager.format_history(args.limit)?);
    }
    Ok(())
}
