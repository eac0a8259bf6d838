use std::sync::Arc;

use datepoll_core::service::ScheduleService;
use datepoll_db::repositories::ScheduleRepository;
use serenity::{
    async_trait,
    model::{
        application::command::Command,
        application::interaction::{Interaction, InteractionResponseType},
        gateway::Ready,
        id::GuildId,
    },
    prelude::*,
};
use tracing::{error, info, warn};

pub mod schedule;

use crate::config::BotConfig;
use crate::render;

/// Schedule service backed by the SQLite repository.
pub type Service = ScheduleService<ScheduleRepository>;

/// Main Discord handler that processes all events.
///
/// Registers the slash commands once connected and routes slash commands
/// and modal submissions to the schedule handlers.
pub struct Handler {
    config: BotConfig,
    service: Arc<Service>,
}

impl Handler {
    pub fn new(config: BotConfig, service: Arc<Service>) -> Self {
        Self { config, service }
    }

    fn context(&self, ctx: &Context) -> HandlerContext {
        HandlerContext {
            ctx: ctx.clone(),
            service: self.service.clone(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Handle ready events (when bot connects to Discord)
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // Guild commands show up immediately, global ones after a cache delay
        if let Some(test_guild_id) = self.config.test_guild_id {
            let guild_id = GuildId(test_guild_id);

            match guild_id
                .set_application_commands(&ctx.http, crate::commands::register_commands)
                .await
            {
                Ok(cmds) => {
                    info!(
                        "Guild commands registered successfully for {}! Total commands: {}",
                        test_guild_id,
                        cmds.len()
                    );
                }
                Err(why) => {
                    error!("Error registering guild commands: {:?}", why);
                }
            }
        }

        match Command::set_global_application_commands(&ctx.http, crate::commands::register_commands).await {
            Ok(cmds) => {
                info!("Global commands registered successfully! Total commands: {}", cmds.len());
                for cmd in cmds {
                    info!("Command registered: /{} - {}", cmd.name, cmd.description);
                }
            }
            Err(why) => {
                error!("Error registering global commands: {:?}", why);
            }
        }
    }

    /// Handle interactions (slash commands and modal submissions)
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                info!("Received command: {} from {}", command.data.name, command.user.id);

                let result = match command.data.name.as_str() {
                    "ping" => handle_ping(&ctx, &command).await,
                    "schedule" => schedule::handle_schedule_command(self.context(&ctx), &command).await,
                    _ => {
                        warn!("Unknown command: {}", command.data.name);
                        Err(eyre::eyre!("Unknown command: {}", command.data.name))
                    }
                };

                if let Err(e) = result {
                    error!("Error handling command /{}: {:?}", command.data.name, e);

                    if let Err(why) = command
                        .create_interaction_response(&ctx.http, |r| {
                            r.kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|m| {
                                    m.content(render::user_message(&e)).ephemeral(true)
                                })
                        })
                        .await
                    {
                        error!("Failed to send error response: {:?}", why);
                    }
                }
            }
            Interaction::ModalSubmit(modal) => {
                info!("Received modal submission: {} from {}", modal.data.custom_id, modal.user.id);

                let result = match modal.data.custom_id.as_str() {
                    schedule::CREATE_MODAL_ID => {
                        schedule::handle_create_modal(self.context(&ctx), &modal).await
                    }
                    _ => {
                        warn!("Unknown modal: {}", modal.data.custom_id);
                        Err(eyre::eyre!("Unknown modal: {}", modal.data.custom_id))
                    }
                };

                if let Err(e) = result {
                    error!("Error handling modal {}: {:?}", modal.data.custom_id, e);

                    if let Err(why) = modal
                        .create_interaction_response(&ctx.http, |r| {
                            r.kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|m| {
                                    m.content(render::user_message(&e)).ephemeral(true)
                                })
                        })
                        .await
                    {
                        error!("Failed to send error response: {:?}", why);
                    }
                }
            }
            _ => {}
        }
    }
}

async fn handle_ping(
    ctx: &Context,
    command: &serenity::model::application::interaction::application_command::ApplicationCommandInteraction,
) -> eyre::Result<()> {
    command
        .create_interaction_response(&ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content("Pong!"))
        })
        .await?;

    Ok(())
}

/// Shared context for command handlers.
pub struct HandlerContext {
    pub ctx: Context,
    pub service: Arc<Service>,
}
