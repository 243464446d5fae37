//! Schema command handler

use crate::api::schema::sdl;

#[allow(clippy::unnecessary_wraps)]
pub fn cmd_schema() -> anyhow::Result<()> {
    println!("{}", sdl());
    Ok(())
}
