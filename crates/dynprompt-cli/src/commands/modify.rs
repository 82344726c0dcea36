//! Modify command

use clap::Args;
use dynprompt_core::DEFAULT_ACTOR;

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct ModifyArgs {
    /// Instruction, e.g. "add rule: cite sources"
    pub instruction: String,

    /// Actor recorded in the audit log
    #[arg(long, default_value = DEFAULT_ACTOR)]
    pub user: String,
}

pub fn execute(ctx: &Context, args: ModifyArgs) -> CommandResult {
    match ctx.manager.modify(&args.instruction, &args.user)? {
        Some(m) if m.is_unrecognized() => {
            println!("Instruction not recognised; prompt unchanged");
        }
        Some(m) => {
            let rules: Vec<&str> = m.edits.iter().map(|e| e.rule_name()).collect();
            println!(
                "Prompt modified ({}); {} chars",
                rules.join(", "),
                m.content.chars().count()
            );
        }
        None => return Err("No active prompt to modify".into()),
    }
    Ok(())
}
