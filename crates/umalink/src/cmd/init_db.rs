//! `init-db` - create the destination schema

use std::path::Path;

use anyhow::Result;
use clap::Args;
use umalink_schema::TableRouter;

use super::{build_writer, load_config};

#[derive(Args, Debug)]
pub struct InitDbArgs {}

pub async fn run(config_path: &Path, _args: InitDbArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let mut writer = build_writer(&config, None).await?;
    let router = TableRouter::new()?;
    writer.ensure_tables(&router).await?;
    println!("created or verified {} tables", router.table_count());
    Ok(())
}
