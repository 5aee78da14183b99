use clap::Subcommand;
use giftwise_core::config::LoadOptions;
use giftwise_core::domain::profile::{CalendarEvent, ProfilePatch};
use giftwise_core::errors::ApplicationError;

use crate::commands::{CommandResult, Session};

#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    #[command(about = "Show the profile, creating the default one on first use")]
    Show,
    #[command(about = "Change the given profile fields")]
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        level: Option<String>,
    },
    #[command(about = "Add a calendar event; events stay ordered by date")]
    AddEvent {
        #[arg(long)]
        title: String,
        #[arg(long, help = "ISO date, YYYY-MM-DD")]
        date: String,
        #[arg(long)]
        person: String,
        #[arg(long)]
        relationship: String,
        #[arg(long, help = "Event id; generated when omitted")]
        id: Option<String>,
    },
    #[command(about = "Remove a calendar event by id")]
    RemoveEvent { id: String },
}

pub fn run(options: &LoadOptions, command: &ProfileCommand) -> CommandResult {
    let session = match Session::open("profile", options) {
        Ok(session) => session,
        Err(result) => return result,
    };
    let profile = session.app.client.profile();

    let outcome = session.block_on(async {
        let message = match command {
            ProfileCommand::Show => "profile".to_string(),
            ProfileCommand::Update { name, avatar, level } => {
                let patch = ProfilePatch {
                    name: name.clone(),
                    avatar: avatar.clone(),
                    level: level.clone(),
                };
                profile.update(patch).await?;
                "profile updated".to_string()
            }
            ProfileCommand::AddEvent { title, date, person, relationship, id } => {
                let mut event = CalendarEvent::new(title, date, person, relationship);
                if let Some(id) = id {
                    event = event.with_id(id);
                }
                let added = profile.add_event(event).await?;
                format!("event {} added", added.id)
            }
            ProfileCommand::RemoveEvent { id } => {
                let before = profile.get().await?.events.len();
                let after = profile.remove_event(id).await?.events.len();
                if before == after {
                    return Err(ApplicationError::not_found("calendar event", id.as_str()));
                }
                format!("event {id} removed")
            }
        };

        Ok::<_, ApplicationError>((message, profile.get().await?))
    });

    match outcome {
        Ok((message, current)) => CommandResult::success("profile", message, current),
        Err(error) => CommandResult::from_error("profile", error),
    }
}
