use serenity::{
    builder::{CreateApplicationCommand, CreateApplicationCommandOption},
    model::application::command::CommandOptionType,
};

pub const SUBCOMMAND_CREATE: &str = "create";
pub const SUBCOMMAND_LIST: &str = "list";
pub const SUBCOMMAND_VOTE: &str = "vote";
pub const SUBCOMMAND_CONFIRM: &str = "confirm";
pub const SUBCOMMAND_CANCEL: &str = "cancel";

/// Create the /schedule command with all of its subcommands
pub fn schedule_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("schedule")
        .description("Create and manage date polls")
        .dm_permission(false)
        // Create subcommand opens a modal, so it takes no options
        .create_option(|option| {
            option
                .name(SUBCOMMAND_CREATE)
                .description("Create a new schedule with candidate dates")
                .kind(CommandOptionType::SubCommand)
        })
        .create_option(|option| {
            option
                .name(SUBCOMMAND_LIST)
                .description("List active schedules with their current votes")
                .kind(CommandOptionType::SubCommand)
        })
        .create_option(|option| {
            option
                .name(SUBCOMMAND_VOTE)
                .description("Answer for one candidate date")
                .kind(CommandOptionType::SubCommand)
                .create_sub_option(schedule_id_option)
                .create_sub_option(date_option)
                .create_sub_option(|sub_option| {
                    sub_option
                        .name("answer")
                        .description("Whether you can attend")
                        .kind(CommandOptionType::String)
                        .required(true)
                        .add_string_choice("⭕ Available", "circle")
                        .add_string_choice("🔺 Maybe", "triangle")
                        .add_string_choice("❌ Unavailable", "cross")
                })
        })
        .create_option(|option| {
            option
                .name(SUBCOMMAND_CONFIRM)
                .description("Fix the schedule on one of its candidate dates")
                .kind(CommandOptionType::SubCommand)
                .create_sub_option(schedule_id_option)
                .create_sub_option(date_option)
        })
        .create_option(|option| {
            option
                .name(SUBCOMMAND_CANCEL)
                .description("Cancel an active schedule")
                .kind(CommandOptionType::SubCommand)
                .create_sub_option(schedule_id_option)
        });

    command
}

fn schedule_id_option(option: &mut CreateApplicationCommandOption) -> &mut CreateApplicationCommandOption {
    option
        .name("id")
        .description("Schedule ID as shown by /schedule list")
        .kind(CommandOptionType::String)
        .required(true)
}

fn date_option(option: &mut CreateApplicationCommandOption) -> &mut CreateApplicationCommandOption {
    option
        .name("date")
        .description("Candidate date in UTC, YYYY-MM-DD HH:MM")
        .kind(CommandOptionType::String)
        .required(true)
}
