use super::{CommandResult, Context};

pub fn execute(ctx: &Context) -> CommandResult {
    match ctx.manager.active()? {
        Some(prompt) => print!("{}", prompt),
        None => println!("No active prompt loaded"),
    }
    Ok(())
}
