use serenity::builder::CreateApplicationCommand;

pub fn ping_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name("ping").description("Check that the bot is alive");

    command
}
