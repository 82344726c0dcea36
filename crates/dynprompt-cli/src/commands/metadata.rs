use super::{CommandResult, Context};

pub fn execute(ctx: &Context) -> CommandResult {
    let metadata = ctx.manager.metadata()?;
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
