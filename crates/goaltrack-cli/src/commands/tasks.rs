use clap::Args;
use goaltrack_core::Config;

use crate::context::{resolve_date, Context};

#[derive(Args)]
pub struct TasksArgs {
    /// Day to list (YYYY-MM-DD, default today)
    #[arg(long, conflicts_with = "all")]
    date: Option<String>,
    /// List every task regardless of date
    #[arg(long)]
    all: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TasksArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let date = if args.all {
        None
    } else {
        Some(resolve_date(args.date.as_deref())?)
    };

    let store = ctx.store(&config)?;
    let tasks = store.fetch_tasks(date)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    for task in &tasks {
        let date = task
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".into());
        println!(
            "{date} {:<9} {} ({} min, {}, {})",
            task.time.as_deref().unwrap_or("--"),
            task.activity,
            task.duration_minutes,
            task.energy,
            task.status
        );
    }
    Ok(())
}
