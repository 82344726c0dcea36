use super::{CommandResult, Context};

pub fn execute(ctx: &Context) -> CommandResult {
    match ctx.manager.revert()? {
        Some(backup) => println!("Prompt reverted to original ({} chars)", backup.chars().count()),
        None => return Err("No backup available".into()),
    }
    Ok(())
}
