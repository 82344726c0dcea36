use super::{CommandResult, Context};

pub fn execute(ctx: &Context) -> CommandResult {
    println!("{}", ctx.manager.diff_text()?);
    Ok(())
}
