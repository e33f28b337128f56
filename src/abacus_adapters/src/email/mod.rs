pub mod brevo_notification_gateway;
pub mod composer;
pub mod configured;
pub mod logging_notification_gateway;

pub use brevo_notification_gateway::BrevoNotificationGateway;
pub use composer::{EmailComposer, RenderedEmail};
pub use configured::{ConfiguredNotificationGateway, GatewaySetupError};
pub use logging_notification_gateway::LoggingNotificationGateway;
