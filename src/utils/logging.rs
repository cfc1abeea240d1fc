// Logger setup shared by hosts embedding the bridge
use log::info;

use crate::settings::{BridgeSettings, LoggingSettings};

/// Initialize `env_logger` with the configured level
///
/// Safe to call more than once; later calls leave the first logger in place
/// and return `false`.
pub fn init_logging(settings: &LoggingSettings) -> bool {
    let installed = env_logger::Builder::new()
        .parse_filters(&settings.level)
        .try_init()
        .is_ok();
    if installed {
        info!("Logging initialized at level {}", settings.level);
    }
    installed
}

/// Log the effective bridge configuration
pub fn log_settings_summary(settings: &BridgeSettings) {
    info!(
        "Passkey bridge v{}: prefer_immediate={}, password_option={}, accept_passwords={}",
        crate::VERSION,
        settings.passkeys.default_prefer_immediate,
        settings.passkeys.offer_password_option,
        settings.passkeys.accept_password_credentials
    );
    info!("Host channel prefix: {:?}", settings.channel.event_prefix);
}
