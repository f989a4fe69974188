use clap::Args;
use goaltrack_core::{ActivityRequest, Config, Priority, Scheduler, Suggestion, TaskCategory};

use crate::context::{resolve_date, Context};

#[derive(Args)]
pub struct SuggestArgs {
    /// Activity to schedule
    activity: String,
    /// Duration in minutes (15-180); defaults to scheduling.default_duration
    #[arg(long, value_parser = clap::value_parser!(u32).range(15..=180))]
    duration: Option<u32>,
    /// high, medium or low
    #[arg(long, default_value = "medium")]
    priority: Priority,
    /// personal, work, health, learning or social
    #[arg(long)]
    category: Option<TaskCategory>,
    /// Day to schedule (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<String>,
    /// Add the recommended slot to the task store
    #[arg(long)]
    add: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SuggestArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let request = ActivityRequest {
        activity: args.activity,
        duration_minutes: args.duration.unwrap_or(config.scheduling.default_duration),
        priority: args.priority,
        category: args.category.unwrap_or(config.scheduling.default_category),
        date: resolve_date(args.date.as_deref())?,
    };

    let store = ctx.store(&config)?;
    let oracle = ctx.oracle(&config);
    let scheduler = Scheduler::new(&config.profile, store.as_ref(), oracle.as_ref());

    let suggestion = scheduler.plan(&request)?;
    let added = match (&suggestion, args.add) {
        (Suggestion::Recommended(rec), true) => Some(scheduler.commit(&request, rec)?),
        _ => None,
    };

    if args.json {
        let out = serde_json::json!({
            "suggestion": suggestion,
            "added": added,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let Suggestion::Recommended(rec) = &suggestion else {
        println!(
            "No free slots of at least {} min on {}.",
            request.duration_minutes, request.date
        );
        return Ok(());
    };

    println!("Free slots for {} on {}:", request.activity, request.date);
    for (i, slot) in rec.all_slots.iter().enumerate() {
        let marker = if slot == &rec.slot { "*" } else { " " };
        println!("{marker} {}. {}", i + 1, slot.describe());
    }
    println!();
    println!(
        "Recommended: {} - {} ({} energy)",
        rec.slot.start_label(),
        rec.slot.end_label(),
        rec.slot.energy
    );
    if rec.source.is_fallback() {
        println!("Reason: {} (fallback, via {})", rec.reason, oracle.name());
    } else {
        println!("Reason: {}", rec.reason);
    }

    if let Some(task) = added {
        println!(
            "Added '{}' at {} on {} to {}",
            task.activity,
            task.time_string(),
            task.date_string(),
            store.display_name()
        );
    }
    Ok(())
}
