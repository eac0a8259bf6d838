use serenity::builder::CreateApplicationCommands;

pub mod ping;
pub mod schedule;

/// Register all slash commands the bot responds to.
pub fn register_commands(commands: &mut CreateApplicationCommands) -> &mut CreateApplicationCommands {
    commands.create_application_command(|command| {
        *command = ping::ping_command();
        command
    });

    commands.create_application_command(|command| {
        *command = schedule::schedule_command();
        command
    });

    commands
}
