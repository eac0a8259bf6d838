use chrono::Utc;
use datepoll_core::errors::{ScheduleError, ScheduleResult};
use datepoll_core::models::{NewSchedule, VoteStatus};
use datepoll_core::validation::{
    parse_candidate_dates, parse_date_line, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
};
use eyre::Result;
use serenity::{
    builder::CreateComponents,
    model::application::{
        component::{ActionRow, ActionRowComponent, InputTextStyle},
        interaction::{
            application_command::{ApplicationCommandInteraction, CommandDataOption},
            modal::ModalSubmitInteraction,
            InteractionResponseType,
        },
    },
    utils::Color,
};
use tracing::info;
use uuid::Uuid;

use crate::commands::schedule::{
    SUBCOMMAND_CANCEL, SUBCOMMAND_CONFIRM, SUBCOMMAND_CREATE, SUBCOMMAND_LIST, SUBCOMMAND_VOTE,
};
use crate::handlers::HandlerContext;
use crate::render;

pub const CREATE_MODAL_ID: &str = "schedule_create";
const TITLE_INPUT: &str = "title";
const DESCRIPTION_INPUT: &str = "description";
const DATES_INPUT: &str = "dates";

/// Handle the /schedule command
pub async fn handle_schedule_command(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
) -> Result<()> {
    let subcommand = command
        .data
        .options
        .first()
        .ok_or_else(|| ScheduleError::Validation("Missing subcommand".to_string()))?;

    info!(
        "Command executed: /schedule {} by {} ({})",
        subcommand.name, command.user.name, command.user.id
    );

    match subcommand.name.as_str() {
        SUBCOMMAND_CREATE => handle_schedule_create(ctx, command).await,
        SUBCOMMAND_LIST => handle_schedule_list(ctx, command).await,
        SUBCOMMAND_VOTE => handle_schedule_vote(ctx, command, subcommand).await,
        SUBCOMMAND_CONFIRM => handle_schedule_confirm(ctx, command, subcommand).await,
        SUBCOMMAND_CANCEL => handle_schedule_cancel(ctx, command, subcommand).await,
        _ => {
            command
                .create_interaction_response(&ctx.ctx.http, |r| {
                    r.kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|m| m.content("Unknown subcommand").ephemeral(true))
                })
                .await?;

            Ok(())
        }
    }
}

/// Open the creation modal. The schedule is stored on submission.
async fn handle_schedule_create(ctx: HandlerContext, command: &ApplicationCommandInteraction) -> Result<()> {
    command
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::Modal)
                .interaction_response_data(|d| {
                    d.custom_id(CREATE_MODAL_ID)
                        .title("Create a schedule")
                        .components(create_modal_components)
                })
        })
        .await?;

    Ok(())
}

/// Input rows of the creation modal. Length limits match the validation
/// applied on submit.
pub fn create_modal_components(components: &mut CreateComponents) -> &mut CreateComponents {
    components
        .create_action_row(|row| {
            row.create_input_text(|input| {
                input
                    .custom_id(TITLE_INPUT)
                    .label("Title")
                    .style(InputTextStyle::Short)
                    .placeholder("Team dinner")
                    .min_length(1)
                    .max_length(MAX_TITLE_LEN as u64)
                    .required(true)
            })
        })
        .create_action_row(|row| {
            row.create_input_text(|input| {
                input
                    .custom_id(DESCRIPTION_INPUT)
                    .label("Description")
                    .style(InputTextStyle::Paragraph)
                    .max_length(MAX_DESCRIPTION_LEN as u64)
                    .required(false)
            })
        })
        .create_action_row(|row| {
            row.create_input_text(|input| {
                input
                    .custom_id(DATES_INPUT)
                    .label("Candidate dates (UTC), one per line")
                    .style(InputTextStyle::Paragraph)
                    .placeholder("2030-01-15 19:00\n2030-01-16 19:00")
                    .required(true)
            })
        })
}

/// Handle a submitted creation modal
pub async fn handle_create_modal(ctx: HandlerContext, modal: &ModalSubmitInteraction) -> Result<()> {
    let components = &modal.data.components;
    let title = modal_value(components, TITLE_INPUT).unwrap_or_default();
    let description = modal_value(components, DESCRIPTION_INPUT).map(str::to_string);
    let dates_input = modal_value(components, DATES_INPUT).unwrap_or_default();

    let now = Utc::now();
    let request = NewSchedule {
        title: title.to_string(),
        description,
        creator_id: modal.user.id.0,
        channel_id: modal.channel_id.0,
        dates: parse_candidate_dates(dates_input, now)?,
    };

    let id = ctx.service.create_schedule(request, now).await?;
    let schedule = ctx.service.get_schedule(id).await?;

    modal
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| {
                    m.embed(|e| {
                        e.title("Schedule created")
                            .description(render::created_description(&schedule))
                            .field("Created by", render::mention(schedule.creator_id), true)
                            .field("ID", format!("`{}`", schedule.id), true)
                            .color(Color::DARK_GREEN)
                            .timestamp(schedule.created_at.to_rfc3339())
                    })
                })
        })
        .await?;

    Ok(())
}

/// Handle the /schedule list subcommand
async fn handle_schedule_list(ctx: HandlerContext, command: &ApplicationCommandInteraction) -> Result<()> {
    let summaries = ctx.service.list_active_schedules().await?;

    if summaries.is_empty() {
        command
            .create_interaction_response(&ctx.ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.content("There are no active schedules.").ephemeral(true))
            })
            .await?;

        return Ok(());
    }

    let (fields, hidden) = render::summary_fields(&summaries);

    command
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| {
                    m.embed(|e| {
                        e.title(render::LIST_TITLE)
                            .color(Color::BLUE)
                            .fields(fields.into_iter().map(|(name, value)| (name, value, false)));
                        if hidden > 0 {
                            e.footer(|f| f.text(render::hidden_footer(hidden)));
                        }
                        e
                    })
                })
        })
        .await?;

    Ok(())
}

/// Handle the /schedule vote subcommand
async fn handle_schedule_vote(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
    subcommand: &CommandDataOption,
) -> Result<()> {
    let id = parse_schedule_id(&get_option_string(subcommand, "id")?)?;
    let date = parse_date_line(&get_option_string(subcommand, "date")?)?;
    let answer: VoteStatus = get_option_string(subcommand, "answer")?.parse()?;

    let vote = ctx
        .service
        .record_vote(id, command.user.id.0, date, answer)
        .await?;

    command
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content(render::vote_recorded(&vote)).ephemeral(true))
        })
        .await?;

    Ok(())
}

/// Handle the /schedule confirm subcommand
async fn handle_schedule_confirm(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
    subcommand: &CommandDataOption,
) -> Result<()> {
    let id = parse_schedule_id(&get_option_string(subcommand, "id")?)?;
    let date = parse_date_line(&get_option_string(subcommand, "date")?)?;

    let schedule = ctx.service.confirm_schedule(id, date).await?;

    command
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| {
                    m.embed(|e| {
                        e.title("Schedule confirmed")
                            .description(render::confirmed_description(&schedule))
                            .color(Color::DARK_GREEN)
                            .timestamp(Utc::now().to_rfc3339())
                    })
                })
        })
        .await?;

    Ok(())
}

/// Handle the /schedule cancel subcommand
async fn handle_schedule_cancel(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
    subcommand: &CommandDataOption,
) -> Result<()> {
    let id = parse_schedule_id(&get_option_string(subcommand, "id")?)?;

    let schedule = ctx.service.cancel_schedule(id).await?;

    command
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| {
                    m.embed(|e| {
                        e.title("Schedule cancelled")
                            .description(render::cancelled_description(&schedule))
                            .color(Color::RED)
                    })
                })
        })
        .await?;

    Ok(())
}

/// Helper to get a string option from a subcommand
fn get_option_string(options: &CommandDataOption, name: &str) -> ScheduleResult<String> {
    options
        .options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ScheduleError::Validation(format!("Missing {} parameter", name)))
}

fn parse_schedule_id(raw: &str) -> ScheduleResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ScheduleError::Validation(format!("Invalid schedule ID: {}", raw)))
}

/// Find the text input with `custom_id` among the submitted rows
fn modal_value<'a>(components: &'a [ActionRow], custom_id: &str) -> Option<&'a str> {
    components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == custom_id => {
                Some(input.value.as_str())
            }
            _ => None,
        })
        .filter(|value| !value.trim().is_empty())
}
