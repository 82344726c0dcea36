use super::{CommandResult, Context};

pub fn execute(ctx: &Context) -> CommandResult {
    ctx.manager.clear()?;
    println!("All prompts and history cleared");
    Ok(())
}
