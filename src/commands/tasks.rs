use anyhow::Result;
use clap::Args;

use mindframe::models::grid::Section;
use mindframe::models::task::{BacklogList, Priority, TaskPatch};

use super::{describe, Session};

#[derive(Args)]
pub struct AddArgs {
    pub title: String,
    /// 1 (high), 2 (medium) or 3 (low)
    #[arg(short, long, default_value = "2")]
    pub priority: Priority,
    /// today or week
    #[arg(short, long, default_value = "today")]
    pub list: BacklogList,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id or unique prefix
    pub id: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub priority: Option<Priority>,
}

pub fn add(session: &mut Session, args: AddArgs) -> Result<()> {
    let task = session.store.create(&args.title, args.priority, args.list)?;
    println!("Added {}", describe(&task));
    Ok(())
}

pub fn list(session: &Session) -> Result<()> {
    for list in [BacklogList::Today, BacklogList::Week] {
        println!("[{}]", list);
        for task in session.store.backlog(list) {
            println!("  {}", describe(task));
        }
    }

    for section in Section::ALL {
        println!("[{}]", section.label());
        for task in session.store.in_section(section) {
            println!("  {}", describe(task));
        }
    }
    Ok(())
}

pub fn edit(session: &mut Session, args: EditArgs) -> Result<()> {
    let id = session.task_id(&args.id)?;

    let mut patch = TaskPatch::new();
    if let Some(title) = args.title {
        patch = patch.title(title);
    }
    if let Some(priority) = args.priority {
        patch = patch.priority(priority);
    }

    session.store.patch(&id, patch);
    println!("Updated {}", describe(session.task(&id)?));
    Ok(())
}

pub fn resolve(session: &mut Session) -> Result<()> {
    let changed = session.store.resolve_all();
    if changed.is_empty() {
        println!("No overlaps");
    } else {
        println!("Adjusted {} task(s)", changed.len());
    }
    Ok(())
}
