//! Load command

use clap::Args;
use dynprompt_core::LoadOutcome;

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// File path, http(s) URL, or the prompt text itself
    pub source: String,

    /// Overwrite an existing active prompt
    #[arg(long)]
    pub force: bool,
}

pub fn execute(ctx: &Context, args: LoadArgs) -> CommandResult {
    match ctx.manager.load(&args.source, args.force)? {
        LoadOutcome::Loaded(content) => {
            println!("Prompt loaded ({} chars)", content.chars().count());
        }
        LoadOutcome::AlreadyLoaded(content) => {
            println!(
                "Prompt already loaded ({} chars); use --force to overwrite",
                content.chars().count()
            );
        }
    }
    Ok(())
}
