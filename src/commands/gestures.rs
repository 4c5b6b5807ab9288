// Each command replays one drag or resize gesture through the coordinator,
// so the CLI commits exactly like the interactive grid does.

use anyhow::{bail, Result};
use clap::Args;

use mindframe::models::grid::Section;
use mindframe::models::task::BacklogList;
use mindframe::services::interaction::{DropOutcome, DropTarget, InputSource};

use super::{describe, Session};

#[derive(Args)]
pub struct PlaceArgs {
    pub id: String,
    /// night, morning, midday or evening
    pub section: Section,
    /// Offset below the top of the section, in slots (or pixels with --pixels)
    #[arg(allow_negative_numbers = true)]
    pub offset: f64,
    #[arg(long)]
    pub pixels: bool,
}

#[derive(Args)]
pub struct BacklogArgs {
    pub id: String,
    #[arg(default_value = "today")]
    pub list: BacklogList,
}

#[derive(Args)]
pub struct ResizeArgs {
    pub id: String,
    /// New height in slots (or pixels with --pixels)
    #[arg(allow_negative_numbers = true)]
    pub height: f64,
    #[arg(long)]
    pub pixels: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub id: String,
}

pub fn place(session: &mut Session, args: PlaceArgs) -> Result<()> {
    let target = if args.pixels {
        session.coordinator.section_target(args.section, args.offset)
    } else {
        DropTarget::Section {
            section: args.section,
            offset_slots: args.offset,
        }
    };
    drag_to(session, &args.id, target)
}

pub fn backlog(session: &mut Session, args: BacklogArgs) -> Result<()> {
    drag_to(session, &args.id, DropTarget::Backlog(args.list))
}

pub fn remove(session: &mut Session, args: RemoveArgs) -> Result<()> {
    drag_to(session, &args.id, DropTarget::Delete)
}

pub fn resize(session: &mut Session, args: ResizeArgs) -> Result<()> {
    let id = session.task_id(&args.id)?;
    if !session.coordinator.begin_resize(&session.store, &id) {
        bail!("task {} is not scheduled", id);
    }

    if args.pixels {
        session.coordinator.resize_to_pixels(args.height);
    } else {
        session.coordinator.resize_to(args.height);
    }

    match session.coordinator.finish_resize(&mut session.store) {
        Some(_) => println!("Resized {}", describe(session.task(&id)?)),
        None => bail!("resize of {} was not applied", id),
    }
    Ok(())
}

fn drag_to(session: &mut Session, prefix: &str, target: DropTarget) -> Result<()> {
    let id = session.task_id(prefix)?;
    session
        .coordinator
        .begin_drag(&session.store, &id, InputSource::Pointer);
    if let Some(preview) = session.coordinator.hover(Some(target)) {
        log::debug!("Drop preview: {:?}", preview.placement());
    }

    match session
        .coordinator
        .drop(&mut session.store, Some(target), InputSource::Pointer)
    {
        Some(DropOutcome::Scheduled(_)) => println!("Scheduled {}", describe(session.task(&id)?)),
        Some(DropOutcome::Backlogged(list)) => {
            println!("Moved to {}: {}", list, describe(session.task(&id)?))
        }
        Some(DropOutcome::Removed) => println!("Removed {}", id),
        None => bail!("drop of {} was not applied", id),
    }
    Ok(())
}
