use clap::{Args, Subcommand};
use giftwise_core::config::LoadOptions;
use giftwise_core::domain::answers::QuizAnswers;
use giftwise_core::errors::ApplicationError;
use serde::Serialize;

use crate::commands::{CommandResult, Session};

/// Questionnaire fields; any subset may be given.
#[derive(Debug, Clone, Default, Args)]
pub struct AnswerArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "age-group", help = "Age-group label, e.g. \"16-24\"")]
    pub age_group: Option<String>,
    #[arg(long, help = "Relationship label, e.g. \"Мама\"")]
    pub relationship: Option<String>,
    #[arg(long, help = "Budget label, e.g. \"2 000 - 5 000\"")]
    pub budget: Option<String>,
    #[arg(long, help = "Comma or space separated interests")]
    pub interests: Option<String>,
}

impl AnswerArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age_group.is_none()
            && self.relationship.is_none()
            && self.budget.is_none()
            && self.interests.is_none()
    }

    /// Overrides the fields of `base` that were given on the command line.
    pub fn apply_to(&self, mut base: QuizAnswers) -> QuizAnswers {
        let fields = [
            (&self.name, &mut base.name),
            (&self.age_group, &mut base.age_group),
            (&self.relationship, &mut base.relationship),
            (&self.budget, &mut base.budget),
            (&self.interests, &mut base.interests),
        ];
        for (given, target) in fields {
            if let Some(value) = given {
                *target = value.clone();
            }
        }
        base
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum AnswersCommand {
    #[command(about = "Show the saved draft and the last submitted answers")]
    Show,
    #[command(about = "Merge the given fields into the draft")]
    SaveDraft(AnswerArgs),
    #[command(about = "Validate the draft merged with the given fields and store it as submitted")]
    Submit(AnswerArgs),
    #[command(about = "Forget the draft and the submitted answers")]
    Clear,
}

#[derive(Debug, Serialize)]
struct AnswersView {
    draft: Option<QuizAnswers>,
    submitted: Option<QuizAnswers>,
}

pub fn run(options: &LoadOptions, command: &AnswersCommand) -> CommandResult {
    let session = match Session::open("answers", options) {
        Ok(session) => session,
        Err(result) => return result,
    };
    let answers = session.app.client.answers();

    let outcome = session.block_on(async {
        match command {
            AnswersCommand::Show => {}
            AnswersCommand::SaveDraft(args) => {
                let draft = args.apply_to(answers.draft().await?.unwrap_or_default());
                answers.save_draft(&draft).await?;
            }
            AnswersCommand::Submit(args) => {
                let submitted = args.apply_to(answers.draft().await?.unwrap_or_default());
                answers.submit(&submitted).await?;
            }
            AnswersCommand::Clear => answers.clear().await?,
        }

        Ok::<_, ApplicationError>(AnswersView {
            draft: answers.draft().await?,
            submitted: answers.last_submitted().await?,
        })
    });

    match outcome {
        Ok(view) => {
            let message = match command {
                AnswersCommand::Show => "current answers",
                AnswersCommand::SaveDraft(_) => "draft saved",
                AnswersCommand::Submit(_) => "answers submitted",
                AnswersCommand::Clear => "answers cleared",
            };
            CommandResult::success("answers", message, view)
        }
        Err(error) => CommandResult::from_error("answers", error),
    }
}

#[cfg(test)]
mod tests {
    use giftwise_core::domain::answers::QuizAnswers;

    use super::AnswerArgs;

    #[test]
    fn given_fields_override_the_base() {
        let base = QuizAnswers::new("Анна", "16-24", "Мама", "до 2 000", "уют");
        let args = AnswerArgs { budget: Some("2 000 - 5 000".into()), ..AnswerArgs::default() };

        let merged = args.apply_to(base.clone());
        assert_eq!(merged.budget, "2 000 - 5 000");
        assert_eq!(merged.name, base.name);
        assert!(!args.is_empty());
        assert!(AnswerArgs::default().is_empty());
    }
}
