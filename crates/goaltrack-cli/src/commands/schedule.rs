use clap::Args;
use goaltrack_core::{Config, DisabledOracle, Scheduler};

use crate::context::{resolve_date, Context};

#[derive(Args)]
pub struct ScheduleArgs {
    /// Day to show (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<String>,
    /// Minimum free slot length in minutes; defaults to scheduling.overview_min_minutes
    #[arg(long)]
    min: Option<u32>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ScheduleArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let date = resolve_date(args.date.as_deref())?;
    let min = args.min.unwrap_or(config.scheduling.overview_min_minutes);

    let store = ctx.store(&config)?;
    // The overview never ranks, so no configured oracle is built.
    let oracle = DisabledOracle::new("overview does not rank slots");
    let overview = Scheduler::new(&config.profile, store.as_ref(), &oracle).overview(date, min)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    println!("Schedule for {date}");
    println!();
    if overview.tasks.is_empty() {
        println!("Tasks: none");
    } else {
        println!("Tasks:");
        for task in &overview.tasks {
            println!(
                "  {:<9} {} ({} min, {})",
                task.time.as_deref().unwrap_or("--"),
                task.activity,
                task.duration_minutes,
                task.energy
            );
        }
    }
    println!();
    if overview.free_slots.is_empty() {
        println!("Free slots (>= {min} min): none");
    } else {
        println!("Free slots (>= {min} min):");
        for slot in &overview.free_slots {
            println!("  {}", slot.describe());
        }
        println!("Total free: {} min", overview.free_minutes());
    }
    Ok(())
}
